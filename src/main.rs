use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use livecast::config::ServerConfig;
use livecast::state::AppState;
use livecast::web;

/// Log level for the application
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// livecast command line arguments
#[derive(Parser, Debug)]
#[command(name = "livecast")]
#[command(version, about = "Signaling hub for one-to-many live broadcasting", long_about = None)]
struct CliArgs {
    /// Log level (error, warn, info, debug, trace)
    #[arg(short = 'l', long, value_name = "LEVEL", default_value = "info")]
    log_level: LogLevel,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_level, args.verbose);

    tracing::info!("Starting livecast v{}", env!("CARGO_PKG_VERSION"));

    // Listen port comes from the environment (PORT, default 3000);
    // everything else about the hub is fixed and nothing survives restarts.
    let config = ServerConfig::from_env()?;
    let state = AppState::new();

    web::serve(state, config.bind_addr()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_logging(level: LogLevel, verbose_count: u8) {
    // Verbose count overrides log level
    let effective_level = match verbose_count {
        0 => level,
        1 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };

    let filter = match effective_level {
        LogLevel::Error => "livecast=error,tower_http=error",
        LogLevel::Warn => "livecast=warn,tower_http=warn",
        LogLevel::Info => "livecast=info,tower_http=info",
        LogLevel::Debug => "livecast=debug,tower_http=debug",
        LogLevel::Trace => "livecast=trace,tower_http=debug",
    };

    // Environment variable takes highest priority
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if let Err(err) = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
    {
        eprintln!("failed to initialize tracing: {}", err);
    }
}

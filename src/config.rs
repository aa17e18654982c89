//! Server configuration
//!
//! The hub is deliberately configuration-poor: the listen port comes from
//! the `PORT` environment variable and everything else is fixed. No state
//! is persisted across restarts.

use std::net::{Ipv4Addr, SocketAddr};

use crate::error::{AppError, Result};

/// Default listen port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port the HTTP/WebSocket listener binds to
    pub port: u16,
}

impl ServerConfig {
    /// Resolve configuration from the process environment
    ///
    /// `PORT` must parse as a TCP port number if set; an unparsable value is
    /// a startup error rather than a silent fallback.
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { port })
    }

    /// Socket address to bind (all interfaces)
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| AppError::Config(format!("invalid PORT value: {:?}", raw)))
}

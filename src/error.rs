use thiserror::Error;

/// Application-wide error type
///
/// Covers bootstrap and transport failures. Semantic join failures travel
/// as typed `ERROR` envelopes on the signaling channel (see
/// [`crate::hub::JoinError`]) and never surface here.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fallible hub operations
pub type Result<T> = std::result::Result<T, AppError>;

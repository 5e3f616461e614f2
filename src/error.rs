//! Error types for the typed-emitter library.
//!
//! Listener failures never show up here: `emit` hands back whatever error the
//! failing listener returned, untouched. This enum only covers the emitter's
//! own setup.

use thiserror::Error;

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for typed-emitter
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration rejected at build time
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration could not be (de)serialized
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl Error {
    /// Create a new configuration error with a custom message
    pub fn config(msg: impl Into<String>) -> Self {
        Error::ConfigError(msg.into())
    }

    /// Check if this error came from configuration validation
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::ConfigError(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

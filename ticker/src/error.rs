//! Ticker error handling
//!
//! Errors only arise while starting up: reading configuration and the
//! fast record. Once the tick loop runs, every state is computable.

use fasting_tracker_core::ValidationError;
use thiserror::Error;

/// Startup error for the ticker service
#[derive(Error, Debug)]
pub enum TickerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid profile: {0}")]
    Profile(#[from] ValidationError),

    #[error("Failed to read fast record from {path}: {source}")]
    FastFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid fast record in {path}: {source}")]
    FastRecord {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for ticker startup
pub type TickerResult<T> = Result<T, TickerError>;

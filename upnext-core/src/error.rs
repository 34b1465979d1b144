//! Error types for the upnext engine.

use thiserror::Error;

/// Errors that can occur while fetching, rebuilding, or notifying.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Malformed event list: {0}")]
    Malformed(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

//! Error types for failscope-core

use thiserror::Error;

/// Result type alias for failscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for failscope operations
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Forge API answered with a non-success status
    #[error("HTTP error: {status} from {url}")]
    Http {
        /// Status code returned by the server
        status: u16,
        /// Request URL (never carries credentials)
        url: String,
    },

    /// Request could not be sent or its body could not be read
    #[error("Transport error: {0}")]
    Transport(String),

    /// The failed-runs listing was empty
    #[error("No failed workflow runs found")]
    NoFailedRuns,

    /// A response did not have the expected shape
    #[error("Unexpected response shape: {0}")]
    DataShape(String),

    /// Generative model provider failure
    #[error("Model provider error: {0}")]
    Provider(String),

    /// A state field was written twice
    #[error("State field `{0}` is already set")]
    StateConflict(&'static str),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::DataShape(format!("JSON error: {}", err))
    }
}

/// Fieldless error category for zero-cost pattern matching.
///
/// Single byte representation (`#[repr(u8)]`), `Copy`, no allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// HTTP status error
    Http,
    /// Transport error
    Transport,
    /// Empty failed-run listing
    NoFailedRuns,
    /// Response shape error
    DataShape,
    /// Model provider error
    Provider,
    /// Write-once violation
    StateConflict,
    /// I/O operation error
    Io,
}

impl Error {
    /// Get the error kind as a Copy enum.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Http { .. } => ErrorKind::Http,
            Error::Transport(_) => ErrorKind::Transport,
            Error::NoFailedRuns => ErrorKind::NoFailedRuns,
            Error::DataShape(_) => ErrorKind::DataShape,
            Error::Provider(_) => ErrorKind::Provider,
            Error::StateConflict(_) => ErrorKind::StateConflict,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// HTTP status carried by the error, if any
    pub const fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

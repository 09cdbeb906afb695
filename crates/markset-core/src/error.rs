//! Error types for markset-core.

use std::fmt;

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    InvalidConnection,
    /// The signal has been closed and accepts no new connections.
    Closed,
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConnection => write!(f, "Invalid or disconnected connection ID"),
            Self::Closed => write!(f, "Signal has been closed"),
        }
    }
}

impl std::error::Error for SignalError {}

/// A specialized Result type for markset-core operations.
pub type Result<T> = std::result::Result<T, SignalError>;

//! Error types for the installer
//!
//! Construction-time problems (bad connection settings, failure to reach the
//! database) are fatal and surface immediately. Statement execution errors
//! are recovered by the engine and only show up in the failure log and the
//! [`ApplyOutcome`](crate::engine::ApplyOutcome); they reach this type only
//! at the single-statement level inside a [`DatabaseClient`](crate::client::DatabaseClient).

use thiserror::Error;

/// Result type alias for installer operations
pub type InstallerResult<T> = Result<T, InstallerError>;

/// Error type for installer operations
#[derive(Debug, Error)]
pub enum InstallerError {
    /// Missing or malformed connection settings
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Failed to establish the database connection
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// Backing store, marker or log file unreadable/unwritable
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A single statement failed against the database
    #[error("Statement execution error: {message}")]
    Statement { message: String },
}

impl InstallerError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn statement(message: impl Into<String>) -> Self {
        Self::Statement {
            message: message.into(),
        }
    }
}

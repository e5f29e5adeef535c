//! Error types for DemoKit
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can surface from the DemoKit core
#[derive(Debug, Error)]
pub enum DemoKitError {
    /// The outer cancellation signal fired while the menu loop was active
    #[error("Operation cancelled")]
    Cancelled,

    /// The API was used in a way no input can cause (e.g. re-running a worker)
    #[error("Usage error: {0}")]
    Usage(String),

    /// Worker arguments could not be parsed or validated
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// A custom menu action could not be registered
    #[error("Invalid menu action: {0}")]
    InvalidAction(String),

    /// A worker mode failed with something other than cancellation
    #[error("Worker mode failed: {0:#}")]
    ModeFailed(eyre::Report),

    /// Configuration is inconsistent
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DemoKitError {
    /// True when this error is the cooperative cancellation path
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DemoKitError::Cancelled)
    }
}

/// Result type alias for DemoKit operations
pub type Result<T> = std::result::Result<T, DemoKitError>;

//! Server error types

use thiserror::Error;

/// Errors that can occur in the accreditor server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open the evaluation database
    #[error("storage error: {0}")]
    Storage(#[from] accreditor_core::EvaluationError),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

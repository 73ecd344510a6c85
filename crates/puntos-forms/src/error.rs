// File: src/error.rs
// Purpose: Submission error types

use thiserror::Error;

/// Why a submission did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Invalid form action {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Error {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

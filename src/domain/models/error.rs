use thiserror::Error;

use super::format_size;

/// Reasons the wizard refuses a file before anything is sent to the server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{name} is not a supported document type. Upload a PDF, DOC, DOCX, TXT, or MD file.")]
    UnsupportedFormat { name: String },
    #[error("{name} is too large ({}). Files must be {} or smaller.", format_size(*size), format_size(*limit))]
    TooLarge { name: String, size: u64, limit: u64 },
}

/// Failures of the three server operations. All of them are terminal for the
/// workflow that hit them, the wizard never retries on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("The upload was rejected: {0}")]
    Submit(String),
    #[error("Processing could not be started: {0}")]
    Trigger(String),
    #[error("The status check failed: {0}")]
    Query(String),
}

//! Error types for the decoding layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides
//! [`BackendError`] that wraps lopdf and I/O failures and converts them to
//! [`AuditError`] for unified error handling across the library.

use propaudit_core::AuditError;
use thiserror::Error;

/// Error type for PDF decoding operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error parsing PDF structure or syntax.
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error decoding a page content stream.
    #[error("content stream error: {0}")]
    Content(String),

    /// Error reading input data or staging the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BackendError> for AuditError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => AuditError::DecodeError(msg),
            BackendError::Content(msg) => AuditError::DecodeError(msg),
            BackendError::Io(e) => AuditError::IoError(e.to_string()),
        }
    }
}

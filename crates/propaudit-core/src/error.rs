//! Error types for statement auditing.
//!
//! Provides [`AuditError`] for fatal conditions that terminate a request.
//! A missing field is never an error; absence is threaded through as
//! `None` and surfaces as an INFO verdict.

use std::fmt;

/// Fatal error types for one audit request.
///
/// Either the input is not a readable PDF, or the transient backing file
/// could not be staged. Both are terminal: no partial report is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditError {
    /// The input bytes could not be decoded as a PDF document.
    DecodeError(String),
    /// I/O failure while staging or reading the document.
    IoError(String),
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::DecodeError(msg) => write!(f, "decode error: {msg}"),
            AuditError::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for AuditError {}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        AuditError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display() {
        let err = AuditError::DecodeError("not a PDF".to_string());
        assert_eq!(err.to_string(), "decode error: not a PDF");
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: AuditError = io_err.into();
        assert!(matches!(err, AuditError::IoError(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn implements_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(AuditError::DecodeError("test".to_string()));
        assert!(err.to_string().contains("test"));
    }
}

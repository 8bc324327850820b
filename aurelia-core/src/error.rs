//! Structured error types for the Aurelia toolkit.

use thiserror::Error;

/// Unified error type for all Aurelia operations.
#[derive(Debug, Error)]
pub enum AureliaError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed input data)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required companion artifact is missing (e.g. the canonical sequence
    /// or the prediction record for a structure). Batch drivers record the
    /// affected structure as skipped and continue.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl AureliaError {
    /// Whether this error marks a missing companion artifact rather than
    /// bad data.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, AureliaError::DataUnavailable(_))
    }
}

/// Convenience alias used throughout the Aurelia toolkit.
pub type Result<T> = std::result::Result<T, AureliaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = AureliaError::Parse("bad record".into());
        assert_eq!(e.to_string(), "parse error: bad record");

        let e = AureliaError::DataUnavailable("no canonical sequence for 1abc".into());
        assert!(e.to_string().contains("1abc"));
        assert!(e.is_data_unavailable());
    }

    #[test]
    fn io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: AureliaError = io.into();
        assert!(matches!(e, AureliaError::Io(_)));
        assert!(!e.is_data_unavailable());
    }
}

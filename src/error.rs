//! Global error handling for codemerger
//!
//! Only failures that abort a whole discovery or combine call end up here.
//! Per-file problems (unreadable files, paths that cannot be labeled) are
//! recovered where they happen and never surface as a `MergeError`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Global error type for codemerger operations
#[derive(Error, Debug)]
pub enum MergeError {
    /// Search root is missing or is not a directory
    #[error("Please select a valid target directory: {}", .0.display())]
    InvalidDirectory(PathBuf),

    /// Extension is empty or does not start with a dot
    #[error("Please enter a valid file extension (e.g., .py), got {0:?}")]
    InvalidExtension(String),

    /// Traversal failed at the search root itself
    #[error("Error during file search: {0}")]
    Walk(#[from] walkdir::Error),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Clipboard errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// Report serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Save requested for output that is empty after trimming
    #[error("There is no output content to save")]
    EmptyOutput,

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for codemerger operations
pub type Result<T> = std::result::Result<T, MergeError>;

/// Creates a MergeError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::MergeError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

// The binary speaks io::Result at its boundary
impl From<MergeError> for io::Error {
    fn from(err: MergeError) -> Self {
        let kind = match &err {
            MergeError::Io(e) => e.kind(),
            MergeError::InvalidDirectory(_) => io::ErrorKind::NotFound,
            MergeError::InvalidExtension(_) | MergeError::Config(_) | MergeError::EmptyOutput => {
                io::ErrorKind::InvalidInput
            }
            _ => io::ErrorKind::Other,
        };
        match err {
            MergeError::Io(e) => e,
            other => io::Error::new(kind, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_positive(n: i32) -> Result<i32> {
        crate::ensure!(n > 0, Config, "expected a positive number, got {}", n);
        Ok(n)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(check_positive(3).unwrap(), 3);

        let err = check_positive(-1).unwrap_err();
        assert!(matches!(err, MergeError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: expected a positive number, got -1"
        );
    }

    #[test]
    fn test_unexpected_message() {
        let err = crate::error!(Unexpected, "Could not resolve search root {}: {}", "/x", "gone");
        assert!(matches!(err, MergeError::Unexpected(_)));
        assert_eq!(
            err.to_string(),
            "Unexpected error: Could not resolve search root /x: gone"
        );
        let err: io::Error = err.into();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: io::Error = MergeError::InvalidDirectory(PathBuf::from("/nope")).into();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        let err: io::Error = MergeError::InvalidExtension("py".into()).into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let err: io::Error = MergeError::EmptyOutput.into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let inner = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: io::Error = MergeError::Io(inner).into();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}

//! Error types for Postura operations.
//!
//! One error enum covers the whole pipeline; every stage recovers at the
//! boundary nearest its origin and surfaces a human-readable message.

use std::fmt;

/// Main error type for Postura operations.
///
/// # Examples
///
/// ```
/// use postura::error::PosturaError;
///
/// let err = PosturaError::Training {
///     message: "no valid data".to_string(),
/// };
/// assert!(err.to_string().contains("no valid data"));
/// ```
#[derive(Debug)]
pub enum PosturaError {
    /// Input file could not be read or parsed as delimited tabular data.
    Load {
        /// Underlying cause
        message: String,
    },

    /// Feature or label set was empty after preprocessing.
    Training {
        /// What was missing
        message: String,
    },

    /// A prediction request field failed type coercion or was absent.
    InvalidInput {
        /// Field (column) name
        field: String,
        /// What was wrong with the value
        message: String,
    },

    /// Predict or accessor called before a successful fit.
    NotFitted,

    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for PosturaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PosturaError::Load { message } => {
                write!(f, "Failed to load dataset: {message}")
            }
            PosturaError::Training { message } => {
                write!(f, "Training failed: {message}")
            }
            PosturaError::InvalidInput { field, message } => {
                write!(f, "Invalid input for '{field}': {message}")
            }
            PosturaError::NotFitted => {
                write!(f, "Pipeline not fitted. Call fit() first.")
            }
            PosturaError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            PosturaError::Io(e) => write!(f, "I/O error: {e}"),
            PosturaError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PosturaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PosturaError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PosturaError {
    fn from(err: std::io::Error) -> Self {
        PosturaError::Io(err)
    }
}

impl From<&str> for PosturaError {
    fn from(msg: &str) -> Self {
        PosturaError::Other(msg.to_string())
    }
}

impl From<String> for PosturaError {
    fn from(msg: String) -> Self {
        PosturaError::Other(msg)
    }
}

impl PosturaError {
    /// Create a load error with descriptive context
    #[must_use]
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    /// Create a training error with descriptive context
    #[must_use]
    pub fn training(message: impl Into<String>) -> Self {
        Self::Training {
            message: message.into(),
        }
    }

    /// Create an invalid-input error for a named field
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, PosturaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_display() {
        let err = PosturaError::load("bad header");
        let msg = err.to_string();
        assert!(msg.contains("Failed to load dataset"));
        assert!(msg.contains("bad header"));
    }

    #[test]
    fn test_training_display() {
        let err = PosturaError::training("no valid data");
        assert!(err.to_string().contains("Training failed"));
        assert!(err.to_string().contains("no valid data"));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = PosturaError::invalid_input("Age", "expected a number, got 'abc'");
        let msg = err.to_string();
        assert!(msg.contains("Age"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_not_fitted_display() {
        let err = PosturaError::NotFitted;
        assert!(err.to_string().contains("not fitted"));
    }

    #[test]
    fn test_dimension_mismatch_helper() {
        let err = PosturaError::dimension_mismatch("cols", 7, 5);
        let msg = err.to_string();
        assert!(msg.contains("cols=7"));
        assert!(msg.contains("5"));
    }

    #[test]
    fn test_from_str() {
        let err: PosturaError = "test error".into();
        assert!(matches!(err, PosturaError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_from_string() {
        let err: PosturaError = "test error".to_string().into();
        assert!(matches!(err, PosturaError::Other(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PosturaError = io_err.into();
        assert!(matches!(err, PosturaError::Io(_)));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = PosturaError::Io(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_other() {
        use std::error::Error;
        let err = PosturaError::Other("test".to_string());
        assert!(err.source().is_none());
    }
}

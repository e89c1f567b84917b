//! Error types for postura-cli.

use postura::error::PosturaError;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Dataset could not be loaded
    #[error("{0}")]
    LoadFailed(String),

    /// Training produced no model
    #[error("{0}")]
    TrainingFailed(String),

    /// Prediction request was rejected
    #[error("{0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other library error
    #[error("{0}")]
    Postura(String),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::LoadFailed(_) => ExitCode::from(3),
            Self::TrainingFailed(_) => ExitCode::from(4),
            Self::InvalidInput(_) => ExitCode::from(5),
            Self::Io(_) => ExitCode::from(7),
            Self::Postura(_) => ExitCode::from(1),
        }
    }
}

impl From<PosturaError> for CliError {
    fn from(e: PosturaError) -> Self {
        match e {
            PosturaError::Load { .. } => Self::LoadFailed(e.to_string()),
            PosturaError::Training { .. } => Self::TrainingFailed(e.to_string()),
            PosturaError::InvalidInput { .. } => Self::InvalidInput(e.to_string()),
            PosturaError::Io(io) => Self::Io(io),
            _ => Self::Postura(e.to_string()),
        }
    }
}

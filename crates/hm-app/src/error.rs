//! Error types for the hm-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives frontends one error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Failed to read data file {path}: {message}")]
    DataFileRead { path: PathBuf, message: String },

    #[error("Column not found: {column} in {path}")]
    ColumnNotFound { column: String, path: PathBuf },

    #[error("Muscle model error: {0}")]
    Muscle(#[from] hm_muscle::MuscleError),

    #[error("Signal error: {0}")]
    Signal(#[from] hm_signals::SignalError),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hm-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<hm_project::ProjectError> for AppError {
    fn from(err: hm_project::ProjectError) -> Self {
        AppError::Scenario(err.to_string())
    }
}

impl From<hm_results::ResultsError> for AppError {
    fn from(err: hm_results::ResultsError) -> Self {
        match err {
            hm_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}

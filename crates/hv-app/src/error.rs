//! Error types for the hv-app service layer.

use std::path::PathBuf;

use hv_project::FieldErrors;

/// Application error type that wraps errors from the backend crates
/// and gives CLI and session callers one error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("ZIP code not found: {zip}")]
    LocationNotFound { zip: String },

    #[error("A calculation is already in progress")]
    CalculationInFlight,

    #[error("{message}")]
    CalculationFailed { message: String },

    #[error("Calculation response discarded: form changed since request {request_id}")]
    StaleResponse { request_id: String },

    #[error("No results available; run a calculation first")]
    NoResults,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hv-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<hv_engine::EngineError> for AppError {
    fn from(err: hv_engine::EngineError) -> Self {
        AppError::Config(err.to_string())
    }
}

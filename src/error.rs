//! Error types for the AquaSentry data layer and level poller

use thiserror::Error;


pub type Result<T> = std::result::Result<T, AquaError>;

#[derive(Error, Debug)]
pub enum AquaError {
    #[error("Database not initialized")]
    NotInitialized,

    #[error("Store operation failed: {0}")]
    StoreOperationFailed(#[from] rusqlite::Error),

    #[error("HTTP error! Status: {status}")]
    Fetch { status: u16 },

    #[error("Invalid level payload: {message}")]
    Validation { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored timestamp is not ISO-8601: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl AquaError {
    /// Shorthand for rejecting a caller-supplied field.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AquaError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True when retrying the same call later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AquaError::NotInitialized
                | AquaError::Fetch { .. }
                | AquaError::Http(_)
                | AquaError::Io(_)
        )
    }
}

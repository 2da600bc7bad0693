use thiserror::Error;

use crate::intake::validation::ValidationError;
use crate::session::stage::Stage;

/// Application-level error type.
///
/// Only `Validation` is meant to be shown to the candidate as something they can fix.
/// Everything else degrades the flow (fallback questions, a save warning) instead of
/// interrupting it.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Operation '{operation}' is not allowed in stage '{stage}'")]
    InvalidStage {
        operation: &'static str,
        stage: Stage,
    },

    #[error("Session {0} not found")]
    SessionNotFound(uuid::Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message safe to show the candidate. Internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            AppError::InvalidStage { .. } | AppError::SessionNotFound(_) => {
                "That action isn't available right now.".to_string()
            }
            AppError::Database(_) | AppError::Io(_) | AppError::Serialization(_) => {
                "Your submission could not be saved.".to_string()
            }
            AppError::Internal(_) => {
                tracing::error!("Internal error: {self:?}");
                "An internal error occurred.".to_string()
            }
        }
    }
}

//! Unified application error type.
//! All modules (db, core, cli) return AppError so that the request layer
//! only has one taxonomy to translate.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Core outcomes surfaced to the caller
    // ---------------------------
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Ambient
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        AppError::NotFound { entity, id }
    }

    /// Status a transport layer should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::NotFound { .. } => 404,
            AppError::Conflict(_) => 409,
            AppError::ValidationFailed(_) => 422,
            AppError::StorageUnavailable(_) => 503,
            _ => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;

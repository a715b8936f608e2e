// src/error/types.rs
use crate::domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No admin account available for assignment")]
    NoAdminAvailable,

    #[error("No authenticated session")]
    NotAuthenticated,

    #[error("Other error: {0}")]
    Other(String),
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl AppError {
    /// Persistence-layer failures are swallowed at the startup boundary;
    /// everything else propagates to the caller.
    pub fn is_persistence_error(&self) -> bool {
        matches!(
            self,
            AppError::Database(_) | AppError::Pool(_) | AppError::Io(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;

//! Server-level error type

use shared::error::AppError;
use thiserror::Error;

/// Errors surfaced by server startup and shutdown
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    App(#[from] AppError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

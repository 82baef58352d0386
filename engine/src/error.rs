//! Error handling for the Food Rescue Platform engine
//!
//! Caller errors (`InvalidArgument`, `InvalidCoordinate`) surface immediately
//! and should not be retried. `ConflictingTransition` is recoverable: the
//! caller may re-fetch the donation and decide whether to retry.

use shared::{DonationStatus, GeoError};
use thiserror::Error;

use crate::services::lifecycle::TransitionEvent;

/// Engine error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid transition: {event} is not allowed from {from}")]
    InvalidTransition {
        from: DonationStatus,
        event: TransitionEvent,
    },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Donation has already expired")]
    AlreadyExpired,

    #[error("Conflicting transition: donation status changed concurrently")]
    ConflictingTransition,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Stable machine-readable code, used in logs and by callers that map
    /// errors onto a transport
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::InvalidCoordinate(_) => "INVALID_COORDINATE",
            AppError::InvalidTransition { .. } => "INVALID_TRANSITION",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::AlreadyExpired => "ALREADY_EXPIRED",
            AppError::ConflictingTransition => "CONFLICTING_TRANSITION",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<GeoError> for AppError {
    fn from(e: GeoError) -> Self {
        AppError::InvalidCoordinate(e.to_string())
    }
}

/// Result type alias for engine operations
pub type AppResult<T> = Result<T, AppError>;

//! Mentoring Error Types

use account::AccountError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::services::DecisionError;

/// Mentoring-specific result type alias
pub type MentoringResult<T> = Result<T, MentoringError>;

#[derive(Debug, Error)]
pub enum MentoringError {
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("Mentoring request not found")]
    RequestNotFound,

    #[error("Mentor not found")]
    MentorNotFound,

    #[error("Only pending requests can be cancelled")]
    CancelNotAllowed,

    #[error("Only pending requests can be matched or rejected")]
    NotPending,

    #[error("Mentor is not available")]
    MentorUnavailable,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DecisionError> for MentoringError {
    fn from(e: DecisionError) -> Self {
        match e {
            DecisionError::NotPending => MentoringError::NotPending,
            DecisionError::MentorUnavailable => MentoringError::MentorUnavailable,
        }
    }
}

impl MentoringError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        use MentoringError::*;
        match self {
            Account(e) => e.kind(),
            RequestNotFound | MentorNotFound => ErrorKind::NotFound,
            CancelNotAllowed | NotPending | Validation(_) => ErrorKind::BadRequest,
            MentorUnavailable => ErrorKind::Conflict,
            Database(_) | Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            MentoringError::Account(e) => e.to_app_error(),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            MentoringError::Database(e) => {
                tracing::error!(error = %e, "Mentoring database error");
            }
            MentoringError::Internal(msg) => {
                tracing::error!(message = %msg, "Mentoring internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Mentoring error");
            }
        }
    }
}

impl IntoResponse for MentoringError {
    fn into_response(self) -> Response {
        match self {
            MentoringError::Account(e) => e.into_response(),
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}

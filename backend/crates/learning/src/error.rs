//! Learning Error Types

use account::AccountError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::InvalidMonth;

/// Learning-specific result type alias
pub type LearningResult<T> = Result<T, LearningError>;

#[derive(Debug, Error)]
pub enum LearningError {
    /// Authentication, access to a child's data
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("Chapter not found")]
    ChapterNotFound,

    #[error("Quiz question not found")]
    QuizNotFound,

    #[error("A chapter with this grade and order already exists")]
    ChapterAlreadyExists,

    #[error("{0}")]
    InvalidMonth(#[from] InvalidMonth),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LearningError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        use LearningError::*;
        match self {
            Account(e) => e.kind(),
            ChapterNotFound | QuizNotFound => ErrorKind::NotFound,
            ChapterAlreadyExists => ErrorKind::Conflict,
            InvalidMonth(_) | Validation(_) => ErrorKind::BadRequest,
            Database(_) | Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            LearningError::Account(e) => e.to_app_error(),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            LearningError::Database(e) => {
                tracing::error!(error = %e, "Learning database error");
            }
            LearningError::Internal(msg) => {
                tracing::error!(message = %msg, "Learning internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Learning error");
            }
        }
    }
}

impl IntoResponse for LearningError {
    fn into_response(self) -> Response {
        match self {
            LearningError::Account(e) => e.into_response(),
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}

//! Billing Error Types

use account::AccountError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Billing-specific result type alias
pub type BillingResult<T> = Result<T, BillingError>;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("Payment request not found.")]
    PaymentNotFound,

    #[error("Payment request is not in PENDING status.")]
    NotPending,

    /// Amount does not cover every linked child
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BillingError {
    /// Payment period or renewed expiry beyond the supported date range
    pub fn period_out_of_range() -> Self {
        BillingError::Validation("startAt/endAt out of range".into())
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        use BillingError::*;
        match self {
            Account(e) => e.kind(),
            PaymentNotFound => ErrorKind::NotFound,
            NotPending => ErrorKind::Conflict,
            InvalidAmount | Validation(_) => ErrorKind::BadRequest,
            Database(_) | Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            BillingError::Account(e) => e.to_app_error(),
            BillingError::InvalidAmount => AppError::new(self.kind(), self.to_string())
                .with_action("Pay the subscription price for every linked child"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            BillingError::Database(e) => {
                tracing::error!(error = %e, "Billing database error");
            }
            BillingError::Internal(msg) => {
                tracing::error!(message = %msg, "Billing internal error");
            }
            BillingError::NotPending => {
                tracing::warn!("Repeated payment approval rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Billing error");
            }
        }
    }
}

impl IntoResponse for BillingError {
    fn into_response(self) -> Response {
        match self {
            BillingError::Account(e) => e.into_response(),
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}

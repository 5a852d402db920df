//! Account Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::client::CredentialError;
use platform::identity::IdentityError;
use thiserror::Error;

use crate::domain::value_object::candy_amount::NonPositiveAmount;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

#[derive(Debug, Error)]
pub enum AccountError {
    /// No usable bearer token on the request
    #[error("{0}")]
    MissingCredentials(#[from] CredentialError),

    /// The identity provider rejected the token
    #[error("Invalid or expired ID token")]
    InvalidToken,

    /// The identity provider could not be reached
    #[error("Identity provider unavailable")]
    IdentityUnavailable(String),

    /// Handler reached without the authentication middleware
    #[error("Authentication required")]
    NotAuthenticated,

    #[error("Administrator role required")]
    AdminRequired,

    #[error("Only parent accounts can manage children")]
    NotAParent,

    #[error("Access to this child's data is not allowed")]
    NotYourChild,

    #[error("Subscription period has expired. Please renew the subscription.")]
    SubscriptionExpired,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Child not found")]
    ChildNotFound,

    #[error("This child is already linked to another parent")]
    ChildAlreadyLinked,

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Insufficient candy balance")]
    InsufficientCandy,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        use AccountError::*;
        match self {
            MissingCredentials(_) | InvalidToken | NotAuthenticated => ErrorKind::Unauthorized,
            IdentityUnavailable(_) => ErrorKind::ServiceUnavailable,
            AdminRequired | NotAParent | NotYourChild => ErrorKind::Forbidden,
            SubscriptionExpired => ErrorKind::NotAcceptable,
            UserAlreadyExists | ChildAlreadyLinked => ErrorKind::Conflict,
            UserNotFound | ChildNotFound => ErrorKind::NotFound,
            InvalidRole(_) | InvalidAmount | InsufficientCandy | Validation(_) => {
                ErrorKind::BadRequest
            }
            Database(_) | Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AccountError::SubscriptionExpired => err.with_action("Ask a parent to renew the subscription"),
            AccountError::MissingCredentials(_) | AccountError::InvalidToken => {
                err.with_action("Sign in again")
            }
            _ => err,
        }
    }

    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::IdentityUnavailable(msg) => {
                tracing::error!(message = %msg, "Identity provider unavailable");
            }
            AccountError::InvalidToken => {
                tracing::warn!("Rejected ID token");
            }
            AccountError::AdminRequired | AccountError::NotYourChild => {
                tracing::warn!(error = %self, "Forbidden account access");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<IdentityError> for AccountError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidToken => AccountError::InvalidToken,
            IdentityError::Unavailable(msg) => AccountError::IdentityUnavailable(msg),
            IdentityError::NotConfigured(key) => {
                AccountError::Internal(format!("identity provider not configured: {key}"))
            }
        }
    }
}

impl From<NonPositiveAmount> for AccountError {
    fn from(_: NonPositiveAmount) -> Self {
        AccountError::InvalidAmount
    }
}

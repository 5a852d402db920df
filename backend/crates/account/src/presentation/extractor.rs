//! Request extractors
//!
//! The authentication middleware stores the caller in request extensions;
//! these extractors read it back in handlers of any bounded context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use platform::identity::VerifiedIdentity;

use crate::domain::entity::User;
use crate::error::AccountError;

/// Account of the authenticated caller
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Verified token claims of a caller that may not have an account yet
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub VerifiedIdentity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AccountError::NotAuthenticated)
    }
}

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentIdentity>()
            .cloned()
            .ok_or(AccountError::NotAuthenticated)
    }
}

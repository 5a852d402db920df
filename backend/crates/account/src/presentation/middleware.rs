//! Account Middleware
//!
//! Bearer-token authentication and role/subscription guards. Mount with
//! `axum::middleware::from_fn_with_state` (authentication) or
//! `axum::middleware::from_fn` (guards, which only need [`CurrentUser`]).

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use platform::client::{extract_bearer_token, extract_client_ip};
use platform::identity::{IdentityVerifier, VerifiedIdentity};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::application::AuthenticateUseCase;
use crate::application::config::AccountConfig;
use crate::domain::repository::UserRepository;
use crate::domain::services::has_active_subscription;
use crate::error::{AccountError, AccountResult};
use crate::presentation::extractor::{CurrentIdentity, CurrentUser};

/// Middleware state
#[derive(Clone)]
pub struct AccountMiddlewareState<R, V>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub verifier: Arc<V>,
    pub config: Arc<AccountConfig>,
}

impl<R, V> AccountMiddlewareState<R, V>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, verifier: V, config: AccountConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            verifier: Arc::new(verifier),
            config: Arc::new(config),
        }
    }
}

async fn verify_bearer<V>(verifier: &V, headers: &HeaderMap) -> AccountResult<VerifiedIdentity>
where
    V: IdentityVerifier,
{
    let token = extract_bearer_token(headers)?;
    Ok(verifier.verify(token).await?)
}

/// Requires a valid ID token. The caller may not have an account yet.
///
/// Inserts [`CurrentIdentity`] into request extensions.
pub async fn require_identity<R, V>(
    State(state): State<AccountMiddlewareState<R, V>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AccountError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    let identity = verify_bearer(state.verifier.as_ref(), req.headers()).await?;
    req.extensions_mut().insert(CurrentIdentity(identity));
    Ok(next.run(req).await)
}

/// Requires a valid ID token and resolves (or creates) the caller's account.
///
/// Inserts [`CurrentUser`] into request extensions.
pub async fn require_user<R, V>(
    State(state): State<AccountMiddlewareState<R, V>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AccountError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let client_ip = extract_client_ip(req.headers(), direct_ip);

    let identity = match verify_bearer(state.verifier.as_ref(), req.headers()).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::info!(client_ip = ?client_ip, error = %e, "Authentication failed");
            return Err(e);
        }
    };

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(&identity).await?;

    tracing::debug!(
        user_id = %user.user_id,
        user_role = %user.user_role,
        client_ip = ?client_ip,
        "Request authenticated"
    );

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

/// Requires the administrator role. Must run after [`require_user`].
pub async fn require_admin(
    CurrentUser(user): CurrentUser,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AccountError> {
    if !user.is_admin() {
        return Err(AccountError::AdminRequired);
    }
    Ok(next.run(req).await)
}

/// Rejects children whose paid period is over. Must run after [`require_user`].
pub async fn require_active_subscription(
    CurrentUser(user): CurrentUser,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AccountError> {
    if !has_active_subscription(&user, Utc::now()) {
        tracing::info!(user_id = %user.user_id, "Subscription required");
        return Err(AccountError::SubscriptionExpired);
    }
    Ok(next.run(req).await)
}

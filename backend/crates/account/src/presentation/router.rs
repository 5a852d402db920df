//! Account Router

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use platform::identity::IdentityVerifier;
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::repository::{UserRepository, WalletRepository};
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::{AccountMiddlewareState, require_identity};

/// Create the Account router with PostgreSQL repository
///
/// Every route expects [`CurrentUser`](crate::presentation::extractor::CurrentUser),
/// so the router must be wrapped in `require_user`.
pub fn account_router(repo: PgAccountRepository, config: AccountConfig) -> Router {
    account_router_generic(repo, config)
}

/// Create a generic Account router for any repository implementation
pub fn account_router_generic<R>(repo: R, config: AccountConfig) -> Router
where
    R: UserRepository + WalletRepository + Clone + Send + Sync + 'static,
{
    let state = AccountAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/auth/login", get(handlers::login))
        .route("/user/set-role", post(handlers::set_role::<R>))
        .route("/user/role", get(handlers::get_role))
        .route("/user/me", get(handlers::me))
        .route(
            "/user/children",
            post(handlers::add_child::<R>).get(handlers::list_children::<R>),
        )
        .route("/user/children/{child_id}", delete(handlers::remove_child::<R>))
        .route("/user/children-count", get(handlers::children_count::<R>))
        .route("/user/candy", get(handlers::candy_balance::<R>))
        .route("/user/spend-candy", post(handlers::spend_candy::<R>))
        .route("/user/purchase-history", get(handlers::purchase_history::<R>))
        .route("/candy", get(handlers::candy_balance::<R>))
        .route("/candy/spend", post(handlers::spend_candy::<R>))
        .route("/candy/transactions", get(handlers::candy_transactions::<R>))
        .route(
            "/rewards",
            post(handlers::purchase_reward::<R>).get(handlers::list_rewards::<R>),
        )
        .with_state(state)
}

/// Operator routes. Nest under `/admin` behind `require_user` and `require_admin`.
pub fn account_admin_router<R>(repo: R, config: AccountConfig) -> Router
where
    R: UserRepository + WalletRepository + Clone + Send + Sync + 'static,
{
    let state = AccountAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/users", get(handlers::admin_list_users::<R>))
        .route("/candy/increment", post(handlers::admin_increment_candy::<R>))
        .with_state(state)
}

/// Sign-up route. Carries its own token check since the caller has no account yet.
pub fn registration_router<R, V>(auth: AccountMiddlewareState<R, V>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    let state = AccountAppState {
        repo: auth.repo.clone(),
        config: auth.config.clone(),
    };

    Router::new()
        .route("/auth/register", post(handlers::register::<R>))
        .route_layer(middleware::from_fn_with_state(
            auth,
            require_identity::<R, V>,
        ))
        .with_state(state)
}

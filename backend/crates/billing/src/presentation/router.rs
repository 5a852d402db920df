//! Billing Router

use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

use crate::application::config::BillingConfig;
use crate::domain::repository::PaymentRepository;
use crate::infra::postgres::PgBillingRepository;
use crate::presentation::handlers::{self, BillingAppState};

/// Create the Billing router with PostgreSQL repository
///
/// Every route expects [`CurrentUser`](account::CurrentUser), so the router
/// must be wrapped in `require_user`.
pub fn billing_router(repo: PgBillingRepository, config: BillingConfig) -> Router {
    billing_router_generic(repo, config)
}

/// Create a generic Billing router for any repository implementation
pub fn billing_router_generic<R>(repo: R, config: BillingConfig) -> Router
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
{
    let state = BillingAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/payment/create", post(handlers::create_payment::<R>))
        .route("/payment", get(handlers::list_payments::<R>))
        .with_state(state)
}

/// Operator routes. Nest under `/admin` behind `require_user` and `require_admin`.
pub fn billing_admin_router<R>(repo: R, config: BillingConfig) -> Router
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
{
    let state = BillingAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/payments/pending", get(handlers::admin_pending_payments::<R>))
        .route(
            "/payments/{payment_id}/approve",
            patch(handlers::admin_approve_payment::<R>),
        )
        .with_state(state)
}

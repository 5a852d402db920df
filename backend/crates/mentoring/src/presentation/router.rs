//! Mentoring Router

use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

use crate::domain::repository::{MentorRepository, RequestRepository};
use crate::infra::postgres::PgMentoringRepository;
use crate::presentation::handlers::{self, MentoringAppState};

/// Create the Mentoring router with PostgreSQL repository
///
/// Every route expects [`CurrentUser`](account::CurrentUser), so the router
/// must be wrapped in `require_user`.
pub fn mentoring_router(repo: PgMentoringRepository) -> Router {
    mentoring_router_generic(repo)
}

/// Create a generic Mentoring router for any repository implementation
pub fn mentoring_router_generic<R>(repo: R) -> Router
where
    R: RequestRepository + MentorRepository + Clone + Send + Sync + 'static,
{
    let state = MentoringAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/mentoring/applications",
            post(handlers::apply::<R>).get(handlers::list_applications::<R>),
        )
        .route(
            "/mentoring/applications/{request_id}",
            get(handlers::get_application::<R>).delete(handlers::cancel_application::<R>),
        )
        .with_state(state)
}

/// Operator routes. Nest under `/admin` behind `require_user` and `require_admin`.
pub fn mentoring_admin_router<R>(repo: R) -> Router
where
    R: RequestRepository + MentorRepository + Clone + Send + Sync + 'static,
{
    let state = MentoringAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/mentoring/pending", get(handlers::admin_pending_requests::<R>))
        .route(
            "/mentoring/{request_id}/status",
            patch(handlers::admin_update_status::<R>),
        )
        .route(
            "/mentors",
            post(handlers::admin_create_mentor::<R>).get(handlers::admin_list_mentors::<R>),
        )
        .with_state(state)
}

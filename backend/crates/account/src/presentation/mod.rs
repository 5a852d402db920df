//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, router, and middleware.

pub mod dto;
pub mod extractor;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extractor::{CurrentIdentity, CurrentUser};
pub use handlers::AccountAppState;
pub use middleware::{
    AccountMiddlewareState, require_active_subscription, require_admin, require_identity,
    require_user,
};
pub use router::{
    account_admin_router, account_router, account_router_generic, registration_router,
};

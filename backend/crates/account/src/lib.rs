//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Accounts keyed by the identity provider's uid, created on first request
//! - Roles (Parent, Child, Mentor, Admin) and parent/child links
//! - Candy wallet with an append-only ledger, and reward purchases
//!
//! ## Security Model
//! - Every request carries an identity-provider ID token as a bearer token
//! - Administrators are designated by configuration, never self-assigned
//! - Balance changes are conditional updates; a balance never goes negative

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountConfig;
pub use error::{AccountError, AccountResult};
pub use infra::postgres::PgAccountRepository;
pub use presentation::extractor::{CurrentIdentity, CurrentUser};
pub use presentation::router::{account_admin_router, account_router, registration_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAccountRepository as AccountStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

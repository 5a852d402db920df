//! Learning Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, reward policy, weakness statistics, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Chapters per grade and quiz questions (multiple choice, short answer)
//! - Answer grading with a weighted random candy reward
//! - Attempt history and monthly reward statistics
//! - Weakness analysis by a language model, with a deterministic fallback
//!
//! Authentication comes from the `account` crate: mount the routers behind
//! its `require_user` middleware.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::LearningConfig;
pub use error::{LearningError, LearningResult};
pub use infra::postgres::PgLearningRepository;
pub use presentation::router::{learning_admin_router, learning_router, learning_router_generic};

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
    pub use crate::infra::postgres::PgLearningRepository as LearningStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;

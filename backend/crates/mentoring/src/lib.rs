//! Mentoring Backend Module
//!
//! Parents apply for a mentor for their child; operators register mentors
//! and match or reject pending applications.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{MentoringError, MentoringResult};
pub use infra::postgres::PgMentoringRepository;
pub use presentation::router::{
    mentoring_admin_router, mentoring_router, mentoring_router_generic,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgMentoringRepository as MentoringStore;
}

#[cfg(test)]
mod tests;

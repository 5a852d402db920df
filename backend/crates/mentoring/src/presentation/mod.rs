//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

// Re-exports
pub use handlers::MentoringAppState;
pub use router::{mentoring_admin_router, mentoring_router, mentoring_router_generic};

//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

// Re-exports
pub use handlers::LearningAppState;
pub use router::{learning_admin_router, learning_router, learning_router_generic};

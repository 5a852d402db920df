//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

// Re-exports
pub use handlers::BillingAppState;
pub use router::{billing_admin_router, billing_router, billing_router_generic};

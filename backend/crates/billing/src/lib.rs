//! Billing Backend Module
//!
//! Subscription payments. Parents announce a bank transfer; an operator
//! approves it, which extends the paid period of every linked child.
//!
//! Approval is transactional and idempotent: the payment and the children
//! are locked, and a payment that is no longer pending is rejected without
//! touching any subscription.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::BillingConfig;
pub use error::{BillingError, BillingResult};
pub use infra::postgres::PgBillingRepository;
pub use presentation::router::{billing_admin_router, billing_router, billing_router_generic};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgBillingRepository as BillingStore;
}

//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod payments;

// Re-exports
pub use config::BillingConfig;
pub use payments::{ApproveOutput, CreatePaymentInput, PaymentUseCase};

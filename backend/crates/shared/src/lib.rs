//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary every bounded context agrees on:
//! - [`error::app_error::AppError`] and the [`error::kind::ErrorKind`] classification
//! - Conversions from infrastructure errors (I/O, JSON, sqlx)
//! - Typed entity identifiers ([`id::Id`])
//!
//! Anything that has a different meaning per domain (roles, balances,
//! subscription rules) belongs in the domain crates, not here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;

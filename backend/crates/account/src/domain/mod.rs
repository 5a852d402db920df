//! Domain Layer - Business logic and entities
//!
//! - Entities (User, CandyTransaction, Reward)
//! - Value objects (UserRole, CandyAmount, TransactionKind)
//! - Domain services (subscription and ownership rules)
//! - Repository traits (interfaces)

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

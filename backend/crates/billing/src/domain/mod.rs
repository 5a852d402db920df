//! Domain Layer - Business logic and entities
//!
//! - Entities (Payment)
//! - Value objects (PaymentStatus)
//! - Domain services (amount check, subscription extension)
//! - Repository traits (interfaces)

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

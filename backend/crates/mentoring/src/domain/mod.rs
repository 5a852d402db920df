//! Domain Layer - Business logic and entities
//!
//! - Entities (MentoringRequest, Mentor)
//! - Value objects (RequestStatus, MentorStatus, Decision)
//! - Domain services (matching rules)
//! - Repository traits (interfaces)

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

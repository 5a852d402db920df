//! Application Layer
//!
//! Use cases and application services.

pub mod mentors;
pub mod requests;

// Re-exports
pub use mentors::{CreateMentorInput, MentorUseCase};
pub use requests::{ApplyInput, DecideInput, RequestUseCase};

//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no business meaning:
//! - Request credential extraction (bearer tokens, client IP)
//! - Identity provider client (ID token verification)
//! - LLM chat-completion client with retry
//! - Environment variable helpers

pub mod client;
pub mod env;
pub mod identity;
pub mod llm;

//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod children;
pub mod config;
pub mod register;
pub mod set_role;
pub mod wallet;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use children::ChildrenUseCase;
pub use config::AccountConfig;
pub use register::{RegisterInput, RegisterUseCase};
pub use set_role::SetRoleUseCase;
pub use wallet::{PurchaseInput, PurchaseOutput, RewardSummary, SpendInput, WalletUseCase};

pub mod candy_transaction;
pub mod reward;
pub mod user;

pub use candy_transaction::CandyTransaction;
pub use reward::Reward;
pub use user::User;

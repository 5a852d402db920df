pub mod candy_amount;
pub mod transaction_kind;
pub mod user_role;

pub use candy_amount::CandyAmount;
pub use kernel::id::UserId;
pub use transaction_kind::TransactionKind;
pub use user_role::UserRole;

pub mod payment_status;

pub use kernel::id::{PaymentId, UserId};
pub use payment_status::PaymentStatus;

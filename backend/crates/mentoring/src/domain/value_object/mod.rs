pub mod status;

pub use kernel::id::{MentorId, MentoringRequestId, UserId};
pub use status::{Decision, MentorStatus, RequestStatus};

pub mod mentor;
pub mod mentoring_request;

pub use mentor::Mentor;
pub use mentoring_request::MentoringRequest;

pub mod priority;
pub mod quiz_type;
pub mod report_source;
pub mod year_month;

pub use kernel::id::{ChapterId, QuizAttemptId, QuizId, UserId, WeaknessReportId};
pub use priority::Priority;
pub use quiz_type::QuizType;
pub use report_source::ReportSource;
pub use year_month::{InvalidMonth, Period, YearMonth};

pub mod attempt;
pub mod chapter;
pub mod quiz_question;
pub mod weakness_report;

pub use attempt::{AttemptDetail, QuizAttempt};
pub use chapter::Chapter;
pub use quiz_question::{QuizQuestion, question_title};
pub use weakness_report::{Weakness, WeaknessAnalysis, WeaknessReport};

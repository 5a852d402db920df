//! Application Layer
//!
//! Use cases and application services.

pub mod analyze;
pub mod chapters;
pub mod config;
pub mod progress;
pub mod quiz;

// Re-exports
pub use analyze::AnalyzeWeaknessUseCase;
pub use chapters::{ChapterUseCase, CreateChapterInput};
pub use config::LearningConfig;
pub use progress::{ProgressUseCase, RewardStats, RewardsOverview};
pub use quiz::{NewQuestionInput, QuizUseCase, SubmitInput, SubmitOutput};

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{AttemptDetail, Chapter, QuizAttempt, QuizQuestion, WeaknessReport};
use crate::domain::value_object::{ChapterId, Period, QuizId, UserId};
use crate::error::LearningResult;

/// Chapter repository trait
#[trait_variant::make(ChapterRepository: Send)]
pub trait LocalChapterRepository {
    async fn create_chapter(&self, chapter: &Chapter) -> LearningResult<()>;

    async fn find_chapter(&self, chapter_id: &ChapterId) -> LearningResult<Option<Chapter>>;

    /// Chapters of one grade ordered by `chapter_order`, or every chapter
    /// ordered by (`grade_level`, `chapter_order`)
    async fn find_chapters(&self, grade_level: Option<i32>) -> LearningResult<Vec<Chapter>>;
}

/// Quiz repository trait
#[trait_variant::make(QuizRepository: Send)]
pub trait LocalQuizRepository {
    /// Insert all questions or none
    async fn create_questions(&self, questions: &[QuizQuestion]) -> LearningResult<()>;

    async fn find_question(&self, quiz_id: &QuizId) -> LearningResult<Option<QuizQuestion>>;

    /// Questions of a chapter in creation order
    async fn find_questions(&self, chapter_id: &ChapterId) -> LearningResult<Vec<QuizQuestion>>;

    /// Questions of a chapter that `child_id` has not answered correctly yet
    async fn find_unsolved(
        &self,
        chapter_id: &ChapterId,
        child_id: &UserId,
    ) -> LearningResult<Vec<QuizQuestion>>;

    /// Store the attempt and credit its reward (with an `earn` ledger entry)
    /// in one transaction
    async fn record_attempt(&self, attempt: &QuizAttempt) -> LearningResult<()>;

    /// Attempts of a child with question data, newest first
    async fn find_attempts(
        &self,
        child_id: &UserId,
        period: Option<Period>,
    ) -> LearningResult<Vec<AttemptDetail>>;

    /// Every attempt, newest first
    async fn find_all_attempts(&self) -> LearningResult<Vec<AttemptDetail>>;
}

/// Weakness report repository trait
#[trait_variant::make(ReportRepository: Send)]
pub trait LocalReportRepository {
    async fn save_report(&self, report: &WeaknessReport) -> LearningResult<()>;

    /// Reports of a user, newest first
    async fn find_reports(&self, user_id: &UserId) -> LearningResult<Vec<WeaknessReport>>;
}

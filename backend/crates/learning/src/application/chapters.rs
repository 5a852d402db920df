//! Chapter Use Case

use std::sync::Arc;

use crate::domain::entity::Chapter;
use crate::domain::repository::ChapterRepository;
use crate::error::{LearningError, LearningResult};

pub struct CreateChapterInput {
    pub grade_level: i32,
    pub chapter_order: i32,
    pub chapter_name: String,
    pub chapter_description: Option<String>,
}

pub struct ChapterUseCase<R>
where
    R: ChapterRepository,
{
    chapter_repo: Arc<R>,
}

impl<R> ChapterUseCase<R>
where
    R: ChapterRepository,
{
    pub fn new(chapter_repo: Arc<R>) -> Self {
        Self { chapter_repo }
    }

    pub async fn list(&self, grade_level: Option<i32>) -> LearningResult<Vec<Chapter>> {
        self.chapter_repo.find_chapters(grade_level).await
    }

    pub async fn create(&self, input: CreateChapterInput) -> LearningResult<Chapter> {
        let name = input.chapter_name.trim();
        if name.is_empty() {
            return Err(LearningError::Validation("chapterName is required".into()));
        }
        if input.grade_level < 1 || input.chapter_order < 1 {
            return Err(LearningError::Validation(
                "gradeLevel and chapterOrder must be positive".into(),
            ));
        }

        let chapter = Chapter::new(
            input.grade_level,
            input.chapter_order,
            name.to_string(),
            input
                .chapter_description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        );

        self.chapter_repo
            .create_chapter(&chapter)
            .await
            .map_err(|e| match e {
                LearningError::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                    LearningError::ChapterAlreadyExists
                }
                other => other,
            })?;

        tracing::info!(
            chapter_id = %chapter.chapter_id,
            grade_level = chapter.grade_level,
            chapter_order = chapter.chapter_order,
            "Chapter created"
        );

        Ok(chapter)
    }
}

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::entity::quiz_question::question_title;
use crate::domain::value_object::{ChapterId, QuizAttemptId, QuizId, QuizType, UserId};

/// One submitted answer
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    pub attempt_id: QuizAttemptId,
    pub child_id: UserId,
    pub quiz_id: QuizId,
    pub selected_choice: String,
    pub is_correct: bool,
    /// Candy credited for this attempt, 0 when nothing was won
    pub reward_candy: i64,
    pub created_at: DateTime<Utc>,
}

impl QuizAttempt {
    pub fn new(
        child_id: UserId,
        quiz_id: QuizId,
        selected_choice: String,
        is_correct: bool,
        reward_candy: i64,
    ) -> Self {
        Self {
            attempt_id: QuizAttemptId::new(),
            child_id,
            quiz_id,
            selected_choice,
            is_correct,
            reward_candy,
            created_at: Utc::now(),
        }
    }
}

/// Attempt joined with its question and chapter
#[derive(Debug, Clone)]
pub struct AttemptDetail {
    pub attempt: QuizAttempt,
    pub chapter_id: ChapterId,
    pub chapter_name: String,
    pub quiz_type: QuizType,
    pub question: Value,
    pub answer: String,
    pub explanation: Option<String>,
}

impl AttemptDetail {
    pub fn question_title(&self) -> String {
        question_title(&self.question)
    }
}

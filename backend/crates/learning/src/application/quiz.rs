//! Quiz Use Case
//!
//! Questions, answer submission with the reward draw, and attempt history.

use std::collections::HashSet;
use std::sync::Arc;

use account::models::User;
use serde_json::Value;

use crate::application::config::LearningConfig;
use crate::domain::entity::{AttemptDetail, QuizAttempt, QuizQuestion};
use crate::domain::repository::{ChapterRepository, QuizRepository};
use crate::domain::value_object::{ChapterId, QuizId, QuizType};
use crate::error::{LearningError, LearningResult};

pub struct SubmitInput {
    pub quiz_id: QuizId,
    pub answer: String,
}

#[derive(Debug)]
pub struct SubmitOutput {
    pub is_correct: bool,
    pub reward_candy: i64,
    /// Only set for wrong answers
    pub explanation: Option<String>,
}

pub struct NewQuestionInput {
    pub grade: i32,
    pub quiz_type: QuizType,
    pub chapter_id: ChapterId,
    pub question: Value,
    pub choices: Option<Vec<String>>,
    pub answer: String,
    pub explanation: Option<String>,
}

pub struct QuizUseCase<R>
where
    R: ChapterRepository + QuizRepository,
{
    repo: Arc<R>,
    config: Arc<LearningConfig>,
}

impl<R> QuizUseCase<R>
where
    R: ChapterRepository + QuizRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LearningConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn questions(&self, chapter_id: &ChapterId) -> LearningResult<Vec<QuizQuestion>> {
        self.repo.find_questions(chapter_id).await
    }

    pub async fn unsolved(
        &self,
        user: &User,
        chapter_id: &ChapterId,
    ) -> LearningResult<Vec<QuizQuestion>> {
        self.repo.find_unsolved(chapter_id, &user.user_id).await
    }

    /// Grade an answer. Correct answers draw a reward that is credited
    /// together with the stored attempt.
    pub async fn submit(&self, user: &User, input: SubmitInput) -> LearningResult<SubmitOutput> {
        let question = self
            .repo
            .find_question(&input.quiz_id)
            .await?
            .ok_or(LearningError::QuizNotFound)?;

        let is_correct = question.is_correct(&input.answer);
        let reward_candy = if is_correct {
            self.config.reward.draw(&mut rand::rng())
        } else {
            0
        };

        let attempt = QuizAttempt::new(
            user.user_id,
            question.quiz_id,
            input.answer.trim().to_string(),
            is_correct,
            reward_candy,
        );
        self.repo.record_attempt(&attempt).await?;

        tracing::info!(
            user_id = %user.user_id,
            quiz_id = %question.quiz_id,
            is_correct,
            reward_candy,
            "Quiz answer submitted"
        );

        Ok(SubmitOutput {
            is_correct,
            reward_candy,
            explanation: if is_correct { None } else { question.explanation },
        })
    }

    pub async fn attempts(&self, user: &User) -> LearningResult<Vec<AttemptDetail>> {
        self.repo.find_attempts(&user.user_id, None).await
    }

    pub async fn all_attempts(&self) -> LearningResult<Vec<AttemptDetail>> {
        self.repo.find_all_attempts().await
    }

    /// Validate and insert a batch of questions atomically
    pub async fn create_questions(
        &self,
        inputs: Vec<NewQuestionInput>,
    ) -> LearningResult<Vec<QuizQuestion>> {
        if inputs.is_empty() {
            return Err(LearningError::Validation("quizzes must not be empty".into()));
        }

        let chapter_ids: HashSet<ChapterId> = inputs.iter().map(|q| q.chapter_id).collect();
        for chapter_id in &chapter_ids {
            if self.repo.find_chapter(chapter_id).await?.is_none() {
                return Err(LearningError::ChapterNotFound);
            }
        }

        let questions = inputs
            .into_iter()
            .enumerate()
            .map(|(index, input)| build_question(index, input))
            .collect::<LearningResult<Vec<_>>>()?;

        self.repo.create_questions(&questions).await?;

        tracing::info!(count = questions.len(), "Quiz questions created");

        Ok(questions)
    }
}

fn build_question(index: usize, input: NewQuestionInput) -> LearningResult<QuizQuestion> {
    let invalid = |msg: &str| LearningError::Validation(format!("quizzes[{index}]: {msg}"));

    let answer = input.answer.trim();
    if answer.is_empty() {
        return Err(invalid("answer is required"));
    }
    if input.question.is_null() {
        return Err(invalid("question is required"));
    }

    let choices = input.choices.map(|choices| {
        choices
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
    });

    if input.quiz_type == QuizType::MultipleChoice {
        match &choices {
            Some(choices) if choices.len() >= 2 => {
                if !choices.iter().any(|c| c == answer) {
                    return Err(invalid("answer must be one of the choices"));
                }
            }
            _ => return Err(invalid("multiple choice questions need at least two choices")),
        }
    }

    Ok(QuizQuestion::new(
        input.grade,
        input.quiz_type,
        input.chapter_id,
        input.question,
        choices,
        answer.to_string(),
        input
            .explanation
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty()),
    ))
}

//! Progress Use Case
//!
//! Reward history and monthly statistics of a learner.

use std::sync::Arc;

use crate::domain::entity::{AttemptDetail, QuizAttempt};
use crate::domain::repository::QuizRepository;
use crate::domain::value_object::{UserId, YearMonth};
use crate::error::LearningResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewardStats {
    pub total_attempts: u32,
    pub correct_count: u32,
    pub total_candy_earned: i64,
}

impl RewardStats {
    pub fn from_attempts(attempts: &[AttemptDetail]) -> Self {
        attempts.iter().fold(Self::default(), |mut stats, detail| {
            stats.total_attempts += 1;
            if detail.attempt.is_correct {
                stats.correct_count += 1;
            }
            stats.total_candy_earned += detail.attempt.reward_candy;
            stats
        })
    }
}

#[derive(Debug)]
pub struct RewardsOverview {
    pub attempts: Vec<AttemptDetail>,
    pub stats: RewardStats,
}

impl RewardsOverview {
    /// Attempts that won candy
    pub fn reward_attempts(&self) -> impl Iterator<Item = &AttemptDetail> {
        self.attempts.iter().filter(|a| a.attempt.reward_candy > 0)
    }
}

pub struct ProgressUseCase<R>
where
    R: QuizRepository,
{
    quiz_repo: Arc<R>,
}

impl<R> ProgressUseCase<R>
where
    R: QuizRepository,
{
    pub fn new(quiz_repo: Arc<R>) -> Self {
        Self { quiz_repo }
    }

    /// Attempts that won candy, newest first
    pub async fn reward_history(&self, child_id: &UserId) -> LearningResult<Vec<QuizAttempt>> {
        let attempts = self.quiz_repo.find_attempts(child_id, None).await?;
        Ok(attempts
            .into_iter()
            .map(|detail| detail.attempt)
            .filter(|attempt| attempt.reward_candy > 0)
            .collect())
    }

    /// Attempts and statistics, optionally limited to one calendar month (`YYYY-MM`)
    pub async fn rewards(
        &self,
        child_id: &UserId,
        month: Option<&str>,
    ) -> LearningResult<RewardsOverview> {
        let period = month
            .filter(|m| !m.trim().is_empty())
            .map(str::parse::<YearMonth>)
            .transpose()?
            .map(|ym| ym.period());

        let attempts = self.quiz_repo.find_attempts(child_id, period).await?;
        let stats = RewardStats::from_attempts(&attempts);

        Ok(RewardsOverview { attempts, stats })
    }
}

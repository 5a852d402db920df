//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::application::{RewardStats, RewardsOverview};
use crate::domain::entity::{
    AttemptDetail, Chapter, QuizAttempt, QuizQuestion, Weakness, WeaknessAnalysis, WeaknessReport,
};
use crate::domain::value_object::{QuizType, ReportSource};

// ============================================================================
// Query parameters
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeQuery {
    pub grade_level: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredGradeQuery {
    pub grade_level: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterQuery {
    pub chapter_id: Uuid,
}

/// `?childId=` selects a child's data; omitted means the caller's own
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildQuery {
    pub child_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsQuery {
    /// `YYYY-MM`
    pub month: Option<String>,
    pub child_id: Option<Uuid>,
}

// ============================================================================
// Chapters
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterResponse {
    pub id: Uuid,
    pub grade_level: i32,
    pub chapter_order: i32,
    pub chapter_name: String,
    pub chapter_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Chapter> for ChapterResponse {
    fn from(chapter: Chapter) -> Self {
        Self {
            id: chapter.chapter_id.into_uuid(),
            grade_level: chapter.grade_level,
            chapter_order: chapter.chapter_order,
            chapter_name: chapter.chapter_name,
            chapter_description: chapter.chapter_description,
            created_at: chapter.created_at,
        }
    }
}

/// Request for POST /api/admin/chapters
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChapterRequest {
    pub grade_level: i32,
    pub chapter_order: i32,
    pub chapter_name: String,
    #[serde(default)]
    pub chapter_description: Option<String>,
}

// ============================================================================
// Quizzes
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub id: Uuid,
    pub grade: i32,
    #[serde(rename = "type")]
    pub quiz_type: QuizType,
    pub chapter_id: Uuid,
    pub question: Value,
    pub choices: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl QuizResponse {
    /// `reveal` exposes the answer and explanation (operators only)
    pub fn from_question(question: QuizQuestion, reveal: bool) -> Self {
        Self {
            id: question.quiz_id.into_uuid(),
            grade: question.grade,
            quiz_type: question.quiz_type,
            chapter_id: question.chapter_id.into_uuid(),
            question: question.question,
            choices: question.choices,
            answer: reveal.then_some(question.answer),
            explanation: if reveal { question.explanation } else { None },
            created_at: question.created_at,
        }
    }
}

/// Request for POST /api/quiz/submit
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub quiz_id: Uuid,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub is_correct: bool,
    pub reward_candy: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuizRequest {
    pub grade: i32,
    #[serde(rename = "type")]
    pub quiz_type: QuizType,
    pub chapter_id: Uuid,
    pub question: Value,
    #[serde(default)]
    pub choices: Option<Vec<String>>,
    pub answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Request for POST /api/admin/quizzes
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuizzesRequest {
    pub quizzes: Vec<NewQuizRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateQuizzesResponse {
    pub count: usize,
    pub quizzes: Vec<QuizResponse>,
}

// ============================================================================
// Attempts and rewards
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResponse {
    pub id: Uuid,
    pub child_id: Uuid,
    pub quiz_id: Uuid,
    pub chapter_id: Uuid,
    pub chapter_name: String,
    pub question_title: String,
    #[serde(rename = "type")]
    pub quiz_type: QuizType,
    pub selected_choice: String,
    pub is_correct: bool,
    pub reward_candy: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&AttemptDetail> for AttemptResponse {
    fn from(detail: &AttemptDetail) -> Self {
        let attempt = &detail.attempt;
        Self {
            id: attempt.attempt_id.into_uuid(),
            child_id: attempt.child_id.into_uuid(),
            quiz_id: attempt.quiz_id.into_uuid(),
            chapter_id: detail.chapter_id.into_uuid(),
            chapter_name: detail.chapter_name.clone(),
            question_title: detail.question_title(),
            quiz_type: detail.quiz_type,
            selected_choice: attempt.selected_choice.clone(),
            is_correct: attempt.is_correct,
            reward_candy: attempt.reward_candy,
            created_at: attempt.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardCandyEntry {
    pub reward_candy: i64,
    pub created_at: DateTime<Utc>,
}

impl From<QuizAttempt> for RewardCandyEntry {
    fn from(attempt: QuizAttempt) -> Self {
        Self {
            reward_candy: attempt.reward_candy,
            created_at: attempt.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardAttemptResponse {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question_title: String,
    pub selected_choice: String,
    pub is_correct: bool,
    pub reward_candy: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&AttemptDetail> for RewardAttemptResponse {
    fn from(detail: &AttemptDetail) -> Self {
        let attempt = &detail.attempt;
        Self {
            id: attempt.attempt_id.into_uuid(),
            quiz_id: attempt.quiz_id.into_uuid(),
            question_title: detail.question_title(),
            selected_choice: attempt.selected_choice.clone(),
            is_correct: attempt.is_correct,
            reward_candy: attempt.reward_candy,
            created_at: attempt.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardStatsResponse {
    pub total_attempts: u32,
    pub correct_count: u32,
    pub total_candy_earned: i64,
}

impl From<RewardStats> for RewardStatsResponse {
    fn from(stats: RewardStats) -> Self {
        Self {
            total_attempts: stats.total_attempts,
            correct_count: stats.correct_count,
            total_candy_earned: stats.total_candy_earned,
        }
    }
}

/// Response for GET /api/user/rewards
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsResponse {
    pub attempts: Vec<RewardAttemptResponse>,
    pub reward_attempts: Vec<RewardAttemptResponse>,
    pub stats: RewardStatsResponse,
}

impl From<RewardsOverview> for RewardsResponse {
    fn from(overview: RewardsOverview) -> Self {
        Self {
            attempts: overview.attempts.iter().map(Into::into).collect(),
            reward_attempts: overview.reward_attempts().map(Into::into).collect(),
            stats: overview.stats.into(),
        }
    }
}

// ============================================================================
// Weakness analysis
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaknessAnalysisResponse {
    pub weaknesses: Vec<Weakness>,
    pub recommendations: Vec<String>,
    pub overall_score: f64,
    pub improvement_areas: Vec<String>,
    pub source: ReportSource,
}

impl From<WeaknessAnalysis> for WeaknessAnalysisResponse {
    fn from(analysis: WeaknessAnalysis) -> Self {
        Self {
            weaknesses: analysis.weaknesses,
            recommendations: analysis.recommendations,
            overall_score: analysis.overall_score,
            improvement_areas: analysis.improvement_areas,
            source: analysis.source,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub analysis: WeaknessAnalysisResponse,
    pub created_at: DateTime<Utc>,
}

impl From<WeaknessReport> for ReportResponse {
    fn from(report: WeaknessReport) -> Self {
        Self {
            id: report.report_id.into_uuid(),
            analysis: report.analysis.into(),
            created_at: report.created_at,
        }
    }
}

//! PostgreSQL Repository Implementations

use account::infra::postgres::credit_candy;
use account::models::CandyAmount;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::{
    AttemptDetail, Chapter, QuizAttempt, QuizQuestion, Weakness, WeaknessAnalysis, WeaknessReport,
};
use crate::domain::repository::{ChapterRepository, QuizRepository, ReportRepository};
use crate::domain::value_object::{
    ChapterId, Period, QuizId, QuizType, ReportSource, UserId, WeaknessReportId,
};
use crate::error::{LearningError, LearningResult};

const QUIZ_REWARD_ITEM: &str = "quiz reward";

/// `SELECT <attempt + question + chapter columns> ... <tail>`
macro_rules! select_attempts {
    ($tail:literal) => {
        concat!(
            r#"
            SELECT
                a.attempt_id,
                a.child_id,
                a.quiz_id,
                a.selected_choice,
                a.is_correct,
                a.reward_candy,
                a.created_at,
                q.chapter_id,
                c.chapter_name,
                q.quiz_type,
                q.question,
                q.answer,
                q.explanation
            FROM quiz_attempts a
            JOIN quiz_questions q ON q.quiz_id = a.quiz_id
            JOIN chapters c ON c.chapter_id = q.chapter_id
            "#,
            $tail
        )
    };
}

const SELECT_QUESTIONS: &str = r#"
    SELECT
        quiz_id,
        grade,
        quiz_type,
        chapter_id,
        question,
        choices,
        answer,
        explanation,
        created_at,
        updated_at
    FROM quiz_questions
"#;

/// PostgreSQL-backed learning repository
#[derive(Clone)]
pub struct PgLearningRepository {
    pool: PgPool,
}

impl PgLearningRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Chapter Repository Implementation
// ============================================================================

impl ChapterRepository for PgLearningRepository {
    async fn create_chapter(&self, chapter: &Chapter) -> LearningResult<()> {
        sqlx::query(
            r#"
            INSERT INTO chapters (
                chapter_id,
                grade_level,
                chapter_order,
                chapter_name,
                chapter_description,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(chapter.chapter_id.as_uuid())
        .bind(chapter.grade_level)
        .bind(chapter.chapter_order)
        .bind(&chapter.chapter_name)
        .bind(chapter.chapter_description.as_deref())
        .bind(chapter.created_at)
        .bind(chapter.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_chapter(&self, chapter_id: &ChapterId) -> LearningResult<Option<Chapter>> {
        let row = sqlx::query_as::<_, ChapterRow>(
            r#"
            SELECT chapter_id, grade_level, chapter_order, chapter_name,
                   chapter_description, created_at, updated_at
            FROM chapters
            WHERE chapter_id = $1
            "#,
        )
        .bind(chapter_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_chapters(&self, grade_level: Option<i32>) -> LearningResult<Vec<Chapter>> {
        let rows = sqlx::query_as::<_, ChapterRow>(
            r#"
            SELECT chapter_id, grade_level, chapter_order, chapter_name,
                   chapter_description, created_at, updated_at
            FROM chapters
            WHERE ($1::INTEGER IS NULL OR grade_level = $1)
            ORDER BY grade_level, chapter_order
            "#,
        )
        .bind(grade_level)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// Quiz Repository Implementation
// ============================================================================

impl QuizRepository for PgLearningRepository {
    async fn create_questions(&self, questions: &[QuizQuestion]) -> LearningResult<()> {
        let mut tx = self.pool.begin().await?;

        for question in questions {
            sqlx::query(
                r#"
                INSERT INTO quiz_questions (
                    quiz_id,
                    grade,
                    quiz_type,
                    chapter_id,
                    question,
                    choices,
                    answer,
                    explanation,
                    created_at,
                    updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(question.quiz_id.as_uuid())
            .bind(question.grade)
            .bind(question.quiz_type.id())
            .bind(question.chapter_id.as_uuid())
            .bind(Json(&question.question))
            .bind(question.choices.as_deref())
            .bind(&question.answer)
            .bind(question.explanation.as_deref())
            .bind(question.created_at)
            .bind(question.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_question(&self, quiz_id: &QuizId) -> LearningResult<Option<QuizQuestion>> {
        let row = sqlx::query_as::<_, QuestionRow>(&format!(
            "{SELECT_QUESTIONS} WHERE quiz_id = $1"
        ))
        .bind(quiz_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(QuestionRow::into_question).transpose()
    }

    async fn find_questions(&self, chapter_id: &ChapterId) -> LearningResult<Vec<QuizQuestion>> {
        let rows = sqlx::query_as::<_, QuestionRow>(&format!(
            "{SELECT_QUESTIONS} WHERE chapter_id = $1 ORDER BY created_at, quiz_id"
        ))
        .bind(chapter_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(QuestionRow::into_question).collect()
    }

    async fn find_unsolved(
        &self,
        chapter_id: &ChapterId,
        child_id: &UserId,
    ) -> LearningResult<Vec<QuizQuestion>> {
        let rows = sqlx::query_as::<_, QuestionRow>(&format!(
            r#"{SELECT_QUESTIONS} q
            WHERE q.chapter_id = $1
              AND NOT EXISTS (
                  SELECT 1 FROM quiz_attempts a
                  WHERE a.quiz_id = q.quiz_id AND a.child_id = $2 AND a.is_correct
              )
            ORDER BY q.created_at, q.quiz_id"#
        ))
        .bind(chapter_id.as_uuid())
        .bind(child_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(QuestionRow::into_question).collect()
    }

    async fn record_attempt(&self, attempt: &QuizAttempt) -> LearningResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO quiz_attempts (
                attempt_id,
                child_id,
                quiz_id,
                selected_choice,
                is_correct,
                reward_candy,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(attempt.attempt_id.as_uuid())
        .bind(attempt.child_id.as_uuid())
        .bind(attempt.quiz_id.as_uuid())
        .bind(&attempt.selected_choice)
        .bind(attempt.is_correct)
        .bind(attempt.reward_candy)
        .bind(attempt.created_at)
        .execute(&mut *tx)
        .await?;

        if let Ok(amount) = CandyAmount::new(attempt.reward_candy) {
            credit_candy(&mut *tx, &attempt.child_id, amount, Some(QUIZ_REWARD_ITEM))
                .await?
                .ok_or_else(|| LearningError::Internal("attempt owner vanished".into()))?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_attempts(
        &self,
        child_id: &UserId,
        period: Option<Period>,
    ) -> LearningResult<Vec<AttemptDetail>> {
        let rows = sqlx::query_as::<_, AttemptRow>(select_attempts!(
            r#"
            WHERE a.child_id = $1
              AND ($2::TIMESTAMPTZ IS NULL OR a.created_at >= $2)
              AND ($3::TIMESTAMPTZ IS NULL OR a.created_at < $3)
            ORDER BY a.created_at DESC
            "#
        ))
        .bind(child_id.as_uuid())
        .bind(period.map(|p| p.start))
        .bind(period.map(|p| p.end))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttemptRow::into_detail).collect()
    }

    async fn find_all_attempts(&self) -> LearningResult<Vec<AttemptDetail>> {
        let rows = sqlx::query_as::<_, AttemptRow>(select_attempts!("ORDER BY a.created_at DESC"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(AttemptRow::into_detail).collect()
    }
}

// ============================================================================
// Report Repository Implementation
// ============================================================================

impl ReportRepository for PgLearningRepository {
    async fn save_report(&self, report: &WeaknessReport) -> LearningResult<()> {
        let analysis = &report.analysis;
        sqlx::query(
            r#"
            INSERT INTO weakness_reports (
                report_id,
                user_id,
                overall_score,
                recommendations,
                improvement_areas,
                weaknesses,
                source,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(report.report_id.as_uuid())
        .bind(report.user_id.as_uuid())
        .bind(analysis.overall_score)
        .bind(&analysis.recommendations)
        .bind(&analysis.improvement_areas)
        .bind(Json(&analysis.weaknesses))
        .bind(analysis.source.id())
        .bind(report.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_reports(&self, user_id: &UserId) -> LearningResult<Vec<WeaknessReport>> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT report_id, user_id, overall_score, recommendations,
                   improvement_areas, weaknesses, source, created_at
            FROM weakness_reports
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReportRow::into_report).collect()
    }
}

// ============================================================================
// Database Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ChapterRow {
    chapter_id: Uuid,
    grade_level: i32,
    chapter_order: i32,
    chapter_name: String,
    chapter_description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ChapterRow> for Chapter {
    fn from(row: ChapterRow) -> Self {
        Chapter {
            chapter_id: ChapterId::from_uuid(row.chapter_id),
            grade_level: row.grade_level,
            chapter_order: row.chapter_order,
            chapter_name: row.chapter_name,
            chapter_description: row.chapter_description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn quiz_type(id: i16) -> LearningResult<QuizType> {
    QuizType::from_id(id).ok_or_else(|| LearningError::Internal(format!("unknown quiz_type {id}")))
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    quiz_id: Uuid,
    grade: i32,
    quiz_type: i16,
    chapter_id: Uuid,
    question: Value,
    choices: Option<Vec<String>>,
    answer: String,
    explanation: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QuestionRow {
    fn into_question(self) -> LearningResult<QuizQuestion> {
        Ok(QuizQuestion {
            quiz_id: QuizId::from_uuid(self.quiz_id),
            grade: self.grade,
            quiz_type: quiz_type(self.quiz_type)?,
            chapter_id: ChapterId::from_uuid(self.chapter_id),
            question: self.question,
            choices: self.choices,
            answer: self.answer,
            explanation: self.explanation,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AttemptRow {
    attempt_id: Uuid,
    child_id: Uuid,
    quiz_id: Uuid,
    selected_choice: String,
    is_correct: bool,
    reward_candy: i64,
    created_at: DateTime<Utc>,
    chapter_id: Uuid,
    chapter_name: String,
    quiz_type: i16,
    question: Value,
    answer: String,
    explanation: Option<String>,
}

impl AttemptRow {
    fn into_detail(self) -> LearningResult<AttemptDetail> {
        Ok(AttemptDetail {
            attempt: QuizAttempt {
                attempt_id: self.attempt_id.into(),
                child_id: UserId::from_uuid(self.child_id),
                quiz_id: QuizId::from_uuid(self.quiz_id),
                selected_choice: self.selected_choice,
                is_correct: self.is_correct,
                reward_candy: self.reward_candy,
                created_at: self.created_at,
            },
            chapter_id: ChapterId::from_uuid(self.chapter_id),
            chapter_name: self.chapter_name,
            quiz_type: quiz_type(self.quiz_type)?,
            question: self.question,
            answer: self.answer,
            explanation: self.explanation,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReportRow {
    report_id: Uuid,
    user_id: Uuid,
    overall_score: f64,
    recommendations: Vec<String>,
    improvement_areas: Vec<String>,
    weaknesses: Json<Vec<Weakness>>,
    source: i16,
    created_at: DateTime<Utc>,
}

impl ReportRow {
    fn into_report(self) -> LearningResult<WeaknessReport> {
        let source = ReportSource::from_id(self.source).ok_or_else(|| {
            LearningError::Internal(format!("unknown report source {}", self.source))
        })?;

        Ok(WeaknessReport {
            report_id: WeaknessReportId::from_uuid(self.report_id),
            user_id: UserId::from_uuid(self.user_id),
            analysis: WeaknessAnalysis {
                weaknesses: self.weaknesses.0,
                recommendations: self.recommendations,
                overall_score: self.overall_score,
                improvement_areas: self.improvement_areas,
                source,
            },
            created_at: self.created_at,
        })
    }
}

//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::entity::{Mentor, MentoringRequest};
use crate::domain::repository::{
    DecisionOutcome, MentorRepository, RequestRepository,
};
use crate::domain::services::apply_decision;
use crate::domain::value_object::{
    Decision, MentorId, MentorStatus, MentoringRequestId, RequestStatus, UserId,
};
use crate::error::{MentoringError, MentoringResult};

/// `SELECT <request columns> FROM mentoring_requests <tail>`
macro_rules! select_requests {
    ($tail:literal) => {
        concat!(
            r#"
            SELECT
                request_id,
                parent_id,
                child_id,
                title,
                child_name,
                child_age,
                requirement,
                request_status,
                mentor_id,
                mentor_name,
                created_at,
                updated_at
            FROM mentoring_requests
            "#,
            $tail
        )
    };
}

/// `SELECT <mentor columns> FROM mentors <tail>`
macro_rules! select_mentors {
    ($tail:literal) => {
        concat!(
            r#"
            SELECT
                mentor_id,
                mentor_name,
                mobile_number,
                email,
                bio,
                mentor_status,
                mentoring_request_id,
                created_at,
                updated_at
            FROM mentors
            "#,
            $tail
        )
    };
}

/// PostgreSQL-backed mentoring repository
#[derive(Clone)]
pub struct PgMentoringRepository {
    pool: PgPool,
}

impl PgMentoringRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn update_request(conn: &mut PgConnection, request: &MentoringRequest) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE mentoring_requests
        SET request_status = $2, mentor_id = $3, mentor_name = $4, updated_at = $5
        WHERE request_id = $1
        "#,
    )
    .bind(request.request_id.as_uuid())
    .bind(request.status.id())
    .bind(request.mentor_id.map(MentorId::into_uuid))
    .bind(request.mentor_name.as_deref())
    .bind(request.updated_at)
    .execute(conn)
    .await?;

    Ok(())
}

async fn update_mentor(conn: &mut PgConnection, mentor: &Mentor) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE mentors
        SET mentor_status = $2, mentoring_request_id = $3, updated_at = $4
        WHERE mentor_id = $1
        "#,
    )
    .bind(mentor.mentor_id.as_uuid())
    .bind(mentor.status.id())
    .bind(mentor.mentoring_request_id.map(MentoringRequestId::into_uuid))
    .bind(mentor.updated_at)
    .execute(conn)
    .await?;

    Ok(())
}

// ============================================================================
// Request Repository Implementation
// ============================================================================

impl RequestRepository for PgMentoringRepository {
    async fn create_request(&self, request: &MentoringRequest) -> MentoringResult<()> {
        sqlx::query(
            r#"
            INSERT INTO mentoring_requests (
                request_id,
                parent_id,
                child_id,
                title,
                child_name,
                child_age,
                requirement,
                request_status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(request.request_id.as_uuid())
        .bind(request.parent_id.as_uuid())
        .bind(request.child_id.map(UserId::into_uuid))
        .bind(&request.title)
        .bind(&request.child_name)
        .bind(&request.child_age)
        .bind(&request.requirement)
        .bind(request.status.id())
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_request(
        &self,
        request_id: &MentoringRequestId,
    ) -> MentoringResult<Option<MentoringRequest>> {
        let row = sqlx::query_as::<_, RequestRow>(select_requests!("WHERE request_id = $1"))
            .bind(request_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(RequestRow::into_request).transpose()
    }

    async fn find_requests_by_parent(
        &self,
        parent_id: &UserId,
    ) -> MentoringResult<Vec<MentoringRequest>> {
        let rows = sqlx::query_as::<_, RequestRow>(select_requests!(
            "WHERE parent_id = $1 ORDER BY created_at DESC"
        ))
        .bind(parent_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RequestRow::into_request).collect()
    }

    async fn find_pending_requests(&self) -> MentoringResult<Vec<MentoringRequest>> {
        let rows = sqlx::query_as::<_, RequestRow>(select_requests!(
            "WHERE request_status = $1 ORDER BY created_at ASC"
        ))
        .bind(RequestStatus::Pending.id())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RequestRow::into_request).collect()
    }

    async fn cancel_request(
        &self,
        request_id: &MentoringRequestId,
        parent_id: &UserId,
    ) -> MentoringResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE mentoring_requests
            SET request_status = $3, updated_at = now()
            WHERE request_id = $1 AND parent_id = $2 AND request_status = $4
            "#,
        )
        .bind(request_id.as_uuid())
        .bind(parent_id.as_uuid())
        .bind(RequestStatus::Cancelled.id())
        .bind(RequestStatus::Pending.id())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn is_child_of(&self, child_id: &UserId, parent_id: &UserId) -> MentoringResult<bool> {
        let linked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1 AND parent_id = $2)",
        )
        .bind(child_id.as_uuid())
        .bind(parent_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(linked)
    }

    async fn decide(
        &self,
        request_id: &MentoringRequestId,
        decision: Decision,
        mentor_id: Option<&MentorId>,
        mentor_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> MentoringResult<DecisionOutcome> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, RequestRow>(select_requests!(
            "WHERE request_id = $1 FOR UPDATE"
        ))
        .bind(request_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Ok(DecisionOutcome::RequestNotFound);
        };
        let mut request = row.into_request()?;

        // A mentor is only involved in a match
        let mut mentor = match (decision, mentor_id) {
            (Decision::Matched, Some(mentor_id)) => {
                let row = sqlx::query_as::<_, MentorRow>(select_mentors!(
                    "WHERE mentor_id = $1 FOR UPDATE"
                ))
                .bind(mentor_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;
                match row {
                    Some(row) => Some(row.into_mentor()?),
                    None => return Ok(DecisionOutcome::MentorNotFound),
                }
            }
            _ => None,
        };

        if let Err(e) = apply_decision(&mut request, decision, mentor.as_mut(), mentor_name, now) {
            return Ok(DecisionOutcome::Rejected(e));
        }

        if let Some(mentor) = &mentor {
            update_mentor(&mut *tx, mentor).await?;
        }
        update_request(&mut *tx, &request).await?;

        tx.commit().await?;

        Ok(DecisionOutcome::Decided(request))
    }
}

// ============================================================================
// Mentor Repository Implementation
// ============================================================================

impl MentorRepository for PgMentoringRepository {
    async fn create_mentor(&self, mentor: &Mentor) -> MentoringResult<()> {
        sqlx::query(
            r#"
            INSERT INTO mentors (
                mentor_id,
                mentor_name,
                mobile_number,
                email,
                bio,
                mentor_status,
                mentoring_request_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(mentor.mentor_id.as_uuid())
        .bind(&mentor.name)
        .bind(&mentor.mobile_number)
        .bind(mentor.email.as_deref())
        .bind(mentor.bio.as_deref())
        .bind(mentor.status.id())
        .bind(mentor.mentoring_request_id.map(MentoringRequestId::into_uuid))
        .bind(mentor.created_at)
        .bind(mentor.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_mentors(&self) -> MentoringResult<Vec<Mentor>> {
        let rows = sqlx::query_as::<_, MentorRow>(select_mentors!("ORDER BY created_at DESC"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(MentorRow::into_mentor).collect()
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct RequestRow {
    request_id: Uuid,
    parent_id: Uuid,
    child_id: Option<Uuid>,
    title: String,
    child_name: String,
    child_age: String,
    requirement: String,
    request_status: i16,
    mentor_id: Option<Uuid>,
    mentor_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RequestRow {
    fn into_request(self) -> MentoringResult<MentoringRequest> {
        let status = RequestStatus::from_id(self.request_status).ok_or_else(|| {
            MentoringError::Internal(format!("Invalid request_status: {}", self.request_status))
        })?;

        Ok(MentoringRequest {
            request_id: MentoringRequestId::from_uuid(self.request_id),
            parent_id: UserId::from_uuid(self.parent_id),
            child_id: self.child_id.map(UserId::from_uuid),
            title: self.title,
            child_name: self.child_name,
            child_age: self.child_age,
            requirement: self.requirement,
            status,
            mentor_id: self.mentor_id.map(MentorId::from_uuid),
            mentor_name: self.mentor_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MentorRow {
    mentor_id: Uuid,
    mentor_name: String,
    mobile_number: String,
    email: Option<String>,
    bio: Option<String>,
    mentor_status: i16,
    mentoring_request_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MentorRow {
    fn into_mentor(self) -> MentoringResult<Mentor> {
        let status = MentorStatus::from_id(self.mentor_status).ok_or_else(|| {
            MentoringError::Internal(format!("Invalid mentor_status: {}", self.mentor_status))
        })?;

        Ok(Mentor {
            mentor_id: MentorId::from_uuid(self.mentor_id),
            name: self.mentor_name,
            mobile_number: self.mobile_number,
            email: self.email,
            bio: self.bio,
            status,
            mentoring_request_id: self.mentoring_request_id.map(MentoringRequestId::from_uuid),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

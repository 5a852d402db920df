//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{Mentor, MentoringRequest};
use crate::domain::value_object::{Decision, MentorStatus, RequestStatus};

/// Request for POST /api/mentoring/applications
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    #[serde(default)]
    pub child_id: Option<Uuid>,
    pub title: String,
    pub child_name: String,
    pub child_age: String,
    pub requirement: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentoringRequestResponse {
    pub id: Uuid,
    pub parent_id: Uuid,
    pub child_id: Option<Uuid>,
    pub title: String,
    pub child_name: String,
    pub child_age: String,
    pub requirement: String,
    pub status: RequestStatus,
    pub mentor_id: Option<Uuid>,
    pub mentor_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MentoringRequest> for MentoringRequestResponse {
    fn from(request: MentoringRequest) -> Self {
        Self {
            id: request.request_id.into_uuid(),
            parent_id: request.parent_id.into_uuid(),
            child_id: request.child_id.map(|id| id.into_uuid()),
            title: request.title,
            child_name: request.child_name,
            child_age: request.child_age,
            requirement: request.requirement,
            status: request.status,
            mentor_id: request.mentor_id.map(|id| id.into_uuid()),
            mentor_name: request.mentor_name,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

/// Request for PATCH /api/admin/mentoring/{request_id}/status
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: Decision,
    #[serde(default)]
    pub mentor_id: Option<Uuid>,
    #[serde(default)]
    pub mentor_name: Option<String>,
}

/// Request for POST /api/admin/mentors
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMentorRequest {
    pub name: String,
    pub mobile_number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorResponse {
    pub id: Uuid,
    pub name: String,
    pub mobile_number: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub status: MentorStatus,
    pub mentoring_request_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Mentor> for MentorResponse {
    fn from(mentor: Mentor) -> Self {
        Self {
            id: mentor.mentor_id.into_uuid(),
            name: mentor.name,
            mobile_number: mentor.mobile_number,
            email: mentor.email,
            bio: mentor.bio,
            status: mentor.status,
            mentoring_request_id: mentor.mentoring_request_id.map(|id| id.into_uuid()),
            created_at: mentor.created_at,
        }
    }
}

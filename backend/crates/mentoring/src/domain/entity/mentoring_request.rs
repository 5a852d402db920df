use chrono::{DateTime, Utc};

use crate::domain::value_object::{MentorId, MentoringRequestId, RequestStatus, UserId};

/// A parent's application for a mentor
#[derive(Debug, Clone)]
pub struct MentoringRequest {
    pub request_id: MentoringRequestId,
    pub parent_id: UserId,
    pub child_id: Option<UserId>,
    pub title: String,
    pub child_name: String,
    /// Free text such as a school grade
    pub child_age: String,
    pub requirement: String,
    pub status: RequestStatus,
    pub mentor_id: Option<MentorId>,
    pub mentor_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MentoringRequest {
    pub fn new(
        parent_id: UserId,
        child_id: Option<UserId>,
        title: String,
        child_name: String,
        child_age: String,
        requirement: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            request_id: MentoringRequestId::new(),
            parent_id,
            child_id,
            title,
            child_name,
            child_age,
            requirement,
            status: RequestStatus::Pending,
            mentor_id: None,
            mentor_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

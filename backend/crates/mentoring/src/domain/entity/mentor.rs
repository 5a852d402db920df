use chrono::{DateTime, Utc};

use crate::domain::value_object::{MentorId, MentorStatus, MentoringRequestId};

#[derive(Debug, Clone)]
pub struct Mentor {
    pub mentor_id: MentorId,
    pub name: String,
    pub mobile_number: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub status: MentorStatus,
    /// Request the mentor is matched to
    pub mentoring_request_id: Option<MentoringRequestId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Mentor {
    pub fn new(
        name: String,
        mobile_number: String,
        email: Option<String>,
        bio: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            mentor_id: MentorId::new(),
            name,
            mobile_number,
            email,
            bio,
            status: MentorStatus::Available,
            mentoring_request_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == MentorStatus::Available
    }
}

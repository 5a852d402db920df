//! Mentor Use Case

use std::sync::Arc;

use crate::domain::entity::Mentor;
use crate::domain::repository::MentorRepository;
use crate::error::{MentoringError, MentoringResult};

pub struct CreateMentorInput {
    pub name: String,
    pub mobile_number: String,
    pub email: Option<String>,
    pub bio: Option<String>,
}

pub struct MentorUseCase<R>
where
    R: MentorRepository,
{
    mentor_repo: Arc<R>,
}

impl<R> MentorUseCase<R>
where
    R: MentorRepository,
{
    pub fn new(mentor_repo: Arc<R>) -> Self {
        Self { mentor_repo }
    }

    pub async fn create(&self, input: CreateMentorInput) -> MentoringResult<Mentor> {
        let name = input.name.trim();
        let mobile_number = input.mobile_number.trim();
        if name.is_empty() || mobile_number.is_empty() {
            return Err(MentoringError::Validation(
                "name and mobileNumber are required".into(),
            ));
        }

        let optional = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let mentor = Mentor::new(
            name.to_string(),
            mobile_number.to_string(),
            optional(input.email),
            optional(input.bio),
        );
        self.mentor_repo.create_mentor(&mentor).await?;

        tracing::info!(mentor_id = %mentor.mentor_id, "Mentor registered");

        Ok(mentor)
    }

    pub async fn list(&self) -> MentoringResult<Vec<Mentor>> {
        self.mentor_repo.find_mentors().await
    }
}

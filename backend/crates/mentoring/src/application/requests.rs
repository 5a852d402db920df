//! Mentoring Request Use Case

use std::sync::Arc;

use account::AccountError;
use account::models::User;
use chrono::Utc;

use crate::domain::entity::MentoringRequest;
use crate::domain::repository::{DecisionOutcome, RequestRepository};
use crate::domain::value_object::{Decision, MentorId, MentoringRequestId, UserId};
use crate::error::{MentoringError, MentoringResult};

pub struct ApplyInput {
    pub child_id: Option<UserId>,
    pub title: String,
    pub child_name: String,
    pub child_age: String,
    pub requirement: String,
}

pub struct DecideInput {
    pub decision: Decision,
    pub mentor_id: Option<MentorId>,
    pub mentor_name: Option<String>,
}

pub struct RequestUseCase<R>
where
    R: RequestRepository,
{
    request_repo: Arc<R>,
}

impl<R> RequestUseCase<R>
where
    R: RequestRepository,
{
    pub fn new(request_repo: Arc<R>) -> Self {
        Self { request_repo }
    }

    pub async fn apply(&self, parent: &User, input: ApplyInput) -> MentoringResult<MentoringRequest> {
        let title = required("title", &input.title)?;
        let requirement = required("requirement", &input.requirement)?;
        let child_name = required("childName", &input.child_name)?;

        if let Some(child_id) = &input.child_id
            && !self.request_repo.is_child_of(child_id, &parent.user_id).await?
        {
            return Err(AccountError::NotYourChild.into());
        }

        let request = MentoringRequest::new(
            parent.user_id,
            input.child_id,
            title,
            child_name,
            input.child_age.trim().to_string(),
            requirement,
        );
        self.request_repo.create_request(&request).await?;

        tracing::info!(
            request_id = %request.request_id,
            user_id = %parent.user_id,
            "Mentoring request created"
        );

        Ok(request)
    }

    pub async fn list(&self, parent: &User) -> MentoringResult<Vec<MentoringRequest>> {
        self.request_repo
            .find_requests_by_parent(&parent.user_id)
            .await
    }

    /// A request of the caller. Requests of other parents are reported as missing.
    pub async fn get(
        &self,
        parent: &User,
        request_id: &MentoringRequestId,
    ) -> MentoringResult<MentoringRequest> {
        self.request_repo
            .find_request(request_id)
            .await?
            .filter(|r| r.parent_id == parent.user_id)
            .ok_or(MentoringError::RequestNotFound)
    }

    pub async fn cancel(&self, parent: &User, request_id: &MentoringRequestId) -> MentoringResult<()> {
        let request = self.get(parent, request_id).await?;
        if !request.is_pending() {
            return Err(MentoringError::CancelNotAllowed);
        }

        // Decided concurrently by an operator
        if !self
            .request_repo
            .cancel_request(request_id, &parent.user_id)
            .await?
        {
            return Err(MentoringError::CancelNotAllowed);
        }

        tracing::info!(request_id = %request_id, user_id = %parent.user_id, "Mentoring request cancelled");
        Ok(())
    }

    pub async fn pending(&self) -> MentoringResult<Vec<MentoringRequest>> {
        self.request_repo.find_pending_requests().await
    }

    pub async fn decide(
        &self,
        request_id: &MentoringRequestId,
        input: DecideInput,
    ) -> MentoringResult<MentoringRequest> {
        let outcome = self
            .request_repo
            .decide(
                request_id,
                input.decision,
                input.mentor_id.as_ref(),
                input.mentor_name.as_deref(),
                Utc::now(),
            )
            .await?;

        match outcome {
            DecisionOutcome::Decided(request) => {
                tracing::info!(
                    request_id = %request.request_id,
                    status = %request.status,
                    mentor_id = ?request.mentor_id,
                    "Mentoring request decided"
                );
                Ok(request)
            }
            DecisionOutcome::RequestNotFound => Err(MentoringError::RequestNotFound),
            DecisionOutcome::MentorNotFound => Err(MentoringError::MentorNotFound),
            DecisionOutcome::Rejected(e) => Err(e.into()),
        }
    }
}

fn required(field: &str, value: &str) -> MentoringResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MentoringError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::{Mentor, MentoringRequest};
use crate::domain::services::DecisionError;
use crate::domain::value_object::{Decision, MentorId, MentoringRequestId, UserId};
use crate::error::MentoringResult;

/// Result of deciding a request
#[derive(Debug)]
pub enum DecisionOutcome {
    Decided(MentoringRequest),
    RequestNotFound,
    MentorNotFound,
    Rejected(DecisionError),
}

/// Mentoring request repository trait
#[trait_variant::make(RequestRepository: Send)]
pub trait LocalRequestRepository {
    async fn create_request(&self, request: &MentoringRequest) -> MentoringResult<()>;

    async fn find_request(
        &self,
        request_id: &MentoringRequestId,
    ) -> MentoringResult<Option<MentoringRequest>>;

    /// Requests of a parent, newest first
    async fn find_requests_by_parent(
        &self,
        parent_id: &UserId,
    ) -> MentoringResult<Vec<MentoringRequest>>;

    /// Pending requests, oldest first
    async fn find_pending_requests(&self) -> MentoringResult<Vec<MentoringRequest>>;

    /// Cancel a request of `parent_id` that is still pending.
    /// Returns `false` when nothing was updated.
    async fn cancel_request(
        &self,
        request_id: &MentoringRequestId,
        parent_id: &UserId,
    ) -> MentoringResult<bool>;

    /// Whether `child_id` is linked to `parent_id`
    async fn is_child_of(&self, child_id: &UserId, parent_id: &UserId) -> MentoringResult<bool>;

    /// Lock the request (and the mentor, if any), apply
    /// [`apply_decision`](crate::domain::services::apply_decision) and store
    /// both rows in one transaction.
    async fn decide(
        &self,
        request_id: &MentoringRequestId,
        decision: Decision,
        mentor_id: Option<&MentorId>,
        mentor_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> MentoringResult<DecisionOutcome>;
}

/// Mentor repository trait
#[trait_variant::make(MentorRepository: Send)]
pub trait LocalMentorRepository {
    async fn create_mentor(&self, mentor: &Mentor) -> MentoringResult<()>;

    /// All mentors, newest first
    async fn find_mentors(&self) -> MentoringResult<Vec<Mentor>>;
}

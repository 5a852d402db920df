//! HTTP Handlers

use account::CurrentUser;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    ApplyInput, CreateMentorInput, DecideInput, MentorUseCase, RequestUseCase,
};
use crate::domain::repository::{MentorRepository, RequestRepository};
use crate::domain::value_object::{MentorId, MentoringRequestId, UserId};
use crate::error::MentoringResult;
use crate::presentation::dto::{
    ApplyRequest, CreateMentorRequest, MentorResponse, MentoringRequestResponse, SuccessResponse,
    UpdateStatusRequest,
};

/// Shared state for mentoring handlers
#[derive(Clone)]
pub struct MentoringAppState<R>
where
    R: Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

// ============================================================================
// Applications
// ============================================================================

/// POST /api/mentoring/applications
pub async fn apply<R>(
    State(state): State<MentoringAppState<R>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ApplyRequest>,
) -> MentoringResult<(StatusCode, Json<MentoringRequestResponse>)>
where
    R: RequestRepository + Clone + Send + Sync + 'static,
{
    let use_case = RequestUseCase::new(state.repo.clone());
    let request = use_case
        .apply(
            &user,
            ApplyInput {
                child_id: req.child_id.map(UserId::from_uuid),
                title: req.title,
                child_name: req.child_name,
                child_age: req.child_age,
                requirement: req.requirement,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(request.into())))
}

/// GET /api/mentoring/applications
pub async fn list_applications<R>(
    State(state): State<MentoringAppState<R>>,
    CurrentUser(user): CurrentUser,
) -> MentoringResult<Json<Vec<MentoringRequestResponse>>>
where
    R: RequestRepository + Clone + Send + Sync + 'static,
{
    let use_case = RequestUseCase::new(state.repo.clone());
    let requests = use_case.list(&user).await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

/// GET /api/mentoring/applications/{request_id}
pub async fn get_application<R>(
    State(state): State<MentoringAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(request_id): Path<Uuid>,
) -> MentoringResult<Json<MentoringRequestResponse>>
where
    R: RequestRepository + Clone + Send + Sync + 'static,
{
    let use_case = RequestUseCase::new(state.repo.clone());
    let request = use_case
        .get(&user, &MentoringRequestId::from_uuid(request_id))
        .await?;
    Ok(Json(request.into()))
}

/// DELETE /api/mentoring/applications/{request_id}
pub async fn cancel_application<R>(
    State(state): State<MentoringAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(request_id): Path<Uuid>,
) -> MentoringResult<Json<SuccessResponse>>
where
    R: RequestRepository + Clone + Send + Sync + 'static,
{
    let use_case = RequestUseCase::new(state.repo.clone());
    use_case
        .cancel(&user, &MentoringRequestId::from_uuid(request_id))
        .await?;

    Ok(Json(SuccessResponse {
        success: true,
        message: "Mentoring request cancelled".into(),
    }))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/admin/mentoring/pending
pub async fn admin_pending_requests<R>(
    State(state): State<MentoringAppState<R>>,
) -> MentoringResult<Json<Vec<MentoringRequestResponse>>>
where
    R: RequestRepository + Clone + Send + Sync + 'static,
{
    let use_case = RequestUseCase::new(state.repo.clone());
    let requests = use_case.pending().await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

/// PATCH /api/admin/mentoring/{request_id}/status
pub async fn admin_update_status<R>(
    State(state): State<MentoringAppState<R>>,
    Path(request_id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> MentoringResult<Json<MentoringRequestResponse>>
where
    R: RequestRepository + Clone + Send + Sync + 'static,
{
    let use_case = RequestUseCase::new(state.repo.clone());
    let request = use_case
        .decide(
            &MentoringRequestId::from_uuid(request_id),
            DecideInput {
                decision: req.status,
                mentor_id: req.mentor_id.map(MentorId::from_uuid),
                mentor_name: req.mentor_name,
            },
        )
        .await?;
    Ok(Json(request.into()))
}

/// POST /api/admin/mentors
pub async fn admin_create_mentor<R>(
    State(state): State<MentoringAppState<R>>,
    Json(req): Json<CreateMentorRequest>,
) -> MentoringResult<(StatusCode, Json<MentorResponse>)>
where
    R: MentorRepository + Clone + Send + Sync + 'static,
{
    let use_case = MentorUseCase::new(state.repo.clone());
    let mentor = use_case
        .create(CreateMentorInput {
            name: req.name,
            mobile_number: req.mobile_number,
            email: req.email,
            bio: req.bio,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(mentor.into())))
}

/// GET /api/admin/mentors
pub async fn admin_list_mentors<R>(
    State(state): State<MentoringAppState<R>>,
) -> MentoringResult<Json<Vec<MentorResponse>>>
where
    R: MentorRepository + Clone + Send + Sync + 'static,
{
    let use_case = MentorUseCase::new(state.repo.clone());
    let mentors = use_case.list().await?;
    Ok(Json(mentors.into_iter().map(Into::into).collect()))
}

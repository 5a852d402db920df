//! HTTP Handlers

use account::CurrentUser;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::BillingConfig;
use crate::application::{CreatePaymentInput, PaymentUseCase};
use crate::domain::repository::PaymentRepository;
use crate::domain::value_object::PaymentId;
use crate::error::BillingResult;
use crate::presentation::dto::{ApproveResponse, CreatePaymentRequest, PaymentResponse};

/// Shared state for billing handlers
#[derive(Clone)]
pub struct BillingAppState<R>
where
    R: Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<BillingConfig>,
}

/// POST /api/payment/create
pub async fn create_payment<R>(
    State(state): State<BillingAppState<R>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreatePaymentRequest>,
) -> BillingResult<(StatusCode, Json<PaymentResponse>)>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
{
    let use_case = PaymentUseCase::new(state.repo.clone(), state.config.clone());
    let payment = use_case
        .create(
            &user,
            CreatePaymentInput {
                amount: req.payment.amount,
                depositor_name: req.payment.depositor_name,
                start_at: req.payment.start_at,
                end_at: req.payment.end_at,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(payment.into())))
}

/// GET /api/payment
pub async fn list_payments<R>(
    State(state): State<BillingAppState<R>>,
    CurrentUser(user): CurrentUser,
) -> BillingResult<Json<Vec<PaymentResponse>>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
{
    let use_case = PaymentUseCase::new(state.repo.clone(), state.config.clone());
    let payments = use_case.list(&user).await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

/// GET /api/admin/payments/pending
pub async fn admin_pending_payments<R>(
    State(state): State<BillingAppState<R>>,
) -> BillingResult<Json<Vec<PaymentResponse>>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
{
    let use_case = PaymentUseCase::new(state.repo.clone(), state.config.clone());
    let payments = use_case.pending().await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

/// PATCH /api/admin/payments/{payment_id}/approve
pub async fn admin_approve_payment<R>(
    State(state): State<BillingAppState<R>>,
    Path(payment_id): Path<Uuid>,
) -> BillingResult<Json<ApproveResponse>>
where
    R: PaymentRepository + Clone + Send + Sync + 'static,
{
    let use_case = PaymentUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.approve(&PaymentId::from_uuid(payment_id)).await?;

    Ok(Json(ApproveResponse {
        payment_id: output.payment.payment_id.into_uuid(),
        status: output.payment.status,
        children_updated: output.children_updated,
    }))
}

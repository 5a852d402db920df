//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::Payment;
use crate::domain::value_object::PaymentStatus;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    pub amount: i64,
    pub depositor_name: String,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
}

/// Request for POST /api/payment/create
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    pub payment: PaymentInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: Uuid,
    pub parent_id: Uuid,
    pub amount: i64,
    pub depositor_name: String,
    pub status: PaymentStatus,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.payment_id.into_uuid(),
            parent_id: payment.parent_id.into_uuid(),
            amount: payment.amount,
            depositor_name: payment.depositor_name,
            status: payment.status,
            start_at: payment.start_at,
            end_at: payment.end_at,
            paid_at: payment.paid_at,
            created_at: payment.created_at,
        }
    }
}

/// Response for PATCH /api/admin/payments/{payment_id}/approve
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveResponse {
    pub payment_id: Uuid,
    pub status: PaymentStatus,
    pub children_updated: usize,
}

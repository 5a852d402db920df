//! Payment Use Case
//!
//! Parents announce a deposit; an operator approves it, which extends the
//! subscription of every linked child.

use std::sync::Arc;

use account::AccountError;
use account::models::{User, UserRole};
use chrono::{DateTime, Duration, Utc};

use crate::application::config::BillingConfig;
use crate::domain::entity::Payment;
use crate::domain::repository::{Approval, PaymentRepository};
use crate::domain::services::covers_children;
use crate::domain::value_object::PaymentId;
use crate::error::{BillingError, BillingResult};

pub struct CreatePaymentInput {
    pub amount: i64,
    pub depositor_name: String,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct ApproveOutput {
    pub payment: Payment,
    pub children_updated: usize,
}

pub struct PaymentUseCase<R>
where
    R: PaymentRepository,
{
    payment_repo: Arc<R>,
    config: Arc<BillingConfig>,
}

impl<R> PaymentUseCase<R>
where
    R: PaymentRepository,
{
    pub fn new(payment_repo: Arc<R>, config: Arc<BillingConfig>) -> Self {
        Self {
            payment_repo,
            config,
        }
    }

    pub async fn create(&self, parent: &User, input: CreatePaymentInput) -> BillingResult<Payment> {
        if parent.user_role != UserRole::Parent {
            return Err(AccountError::NotAParent.into());
        }
        if input.amount <= 0 {
            return Err(BillingError::Validation("amount must be greater than zero".into()));
        }
        let depositor_name = input.depositor_name.trim();
        if depositor_name.is_empty() {
            return Err(BillingError::Validation("depositorName is required".into()));
        }

        let children = self.payment_repo.count_children(&parent.user_id).await?;
        if !covers_children(input.amount, children, self.config.price_per_child) {
            tracing::info!(
                user_id = %parent.user_id,
                amount = input.amount,
                children,
                "Payment amount does not cover the linked children"
            );
            return Err(BillingError::InvalidAmount);
        }

        let start_at = input.start_at.unwrap_or_else(Utc::now);
        let end_at = match input.end_at {
            Some(end_at) => end_at,
            None => Duration::try_days(self.config.default_subscription_days)
                .and_then(|period| start_at.checked_add_signed(period))
                .ok_or_else(BillingError::period_out_of_range)?,
        };
        if end_at <= start_at {
            return Err(BillingError::Validation("endAt must be after startAt".into()));
        }

        let payment = Payment::new(
            parent.user_id,
            input.amount,
            depositor_name.to_string(),
            start_at,
            end_at,
        );
        self.payment_repo.create(&payment).await?;

        tracing::info!(
            payment_id = %payment.payment_id,
            user_id = %parent.user_id,
            amount = payment.amount,
            "Payment request created"
        );

        Ok(payment)
    }

    pub async fn list(&self, parent: &User) -> BillingResult<Vec<Payment>> {
        self.payment_repo.find_by_parent(&parent.user_id).await
    }

    pub async fn pending(&self) -> BillingResult<Vec<Payment>> {
        self.payment_repo.find_pending().await
    }

    /// Approve a pending payment. A processed payment is never applied twice.
    pub async fn approve(&self, payment_id: &PaymentId) -> BillingResult<ApproveOutput> {
        match self.payment_repo.approve(payment_id, Utc::now()).await? {
            Approval::Approved {
                payment,
                children_updated,
            } => {
                tracing::info!(
                    payment_id = %payment.payment_id,
                    parent_id = %payment.parent_id,
                    children_updated,
                    "Payment approved"
                );
                Ok(ApproveOutput {
                    payment,
                    children_updated,
                })
            }
            Approval::NotFound => Err(BillingError::PaymentNotFound),
            Approval::NotPending(payment) => {
                tracing::debug!(payment_id = %payment.payment_id, status = %payment.status, "Payment already processed");
                Err(BillingError::NotPending)
            }
        }
    }
}

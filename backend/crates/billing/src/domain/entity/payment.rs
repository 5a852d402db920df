use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::value_object::{PaymentId, PaymentStatus, UserId};

/// Bank-transfer style subscription payment of a parent
#[derive(Debug, Clone)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub parent_id: UserId,
    pub amount: i64,
    pub depositor_name: String,
    pub status: PaymentStatus,
    /// Paid period; `end_at > start_at`
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        parent_id: UserId,
        amount: i64,
        depositor_name: String,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Self {
        Self {
            payment_id: PaymentId::new(),
            parent_id,
            amount,
            depositor_name,
            status: PaymentStatus::Pending,
            start_at,
            end_at,
            paid_at: None,
            created_at: Utc::now(),
        }
    }

    /// Length of the paid period
    pub fn duration(&self) -> TimeDelta {
        self.end_at - self.start_at
    }

    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }

    pub fn mark_paid(&mut self, at: DateTime<Utc>) {
        self.status = PaymentStatus::Paid;
        self.paid_at = Some(at);
    }
}

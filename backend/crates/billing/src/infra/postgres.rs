//! PostgreSQL Repository Implementations

use account::models::UserRole;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::Payment;
use crate::domain::repository::{Approval, PaymentRepository};
use crate::domain::services::extend_subscription;
use crate::domain::value_object::{PaymentId, PaymentStatus, UserId};
use crate::error::{BillingError, BillingResult};

/// `SELECT <payment columns> FROM payments <tail>`
macro_rules! select_payments {
    ($tail:literal) => {
        concat!(
            r#"
            SELECT
                payment_id,
                parent_id,
                amount,
                depositor_name,
                payment_status,
                start_at,
                end_at,
                paid_at,
                created_at
            FROM payments
            "#,
            $tail
        )
    };
}

/// PostgreSQL-backed payment repository
#[derive(Clone)]
pub struct PgBillingRepository {
    pool: PgPool,
}

impl PgBillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PaymentRepository for PgBillingRepository {
    async fn create(&self, payment: &Payment) -> BillingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                payment_id,
                parent_id,
                amount,
                depositor_name,
                payment_status,
                start_at,
                end_at,
                paid_at,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(payment.payment_id.as_uuid())
        .bind(payment.parent_id.as_uuid())
        .bind(payment.amount)
        .bind(&payment.depositor_name)
        .bind(payment.status.id())
        .bind(payment.start_at)
        .bind(payment.end_at)
        .bind(payment.paid_at)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_parent(&self, parent_id: &UserId) -> BillingResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(select_payments!(
            "WHERE parent_id = $1 ORDER BY created_at DESC"
        ))
        .bind(parent_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PaymentRow::into_payment).collect()
    }

    async fn find_pending(&self) -> BillingResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(select_payments!(
            "WHERE payment_status = $1 ORDER BY created_at ASC"
        ))
        .bind(PaymentStatus::Pending.id())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PaymentRow::into_payment).collect()
    }

    async fn count_children(&self, parent_id: &UserId) -> BillingResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE parent_id = $1 AND user_role = $2",
        )
        .bind(parent_id.as_uuid())
        .bind(UserRole::Child.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn approve(&self, payment_id: &PaymentId, now: DateTime<Utc>) -> BillingResult<Approval> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, PaymentRow>(select_payments!(
            "WHERE payment_id = $1 FOR UPDATE"
        ))
        .bind(payment_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(Approval::NotFound);
        };
        let mut payment = row.into_payment()?;
        if !payment.is_pending() {
            return Ok(Approval::NotPending(payment));
        }

        let children = sqlx::query_as::<_, (Uuid, Option<DateTime<Utc>>)>(
            r#"
            SELECT user_id, subscription_expires_at
            FROM users
            WHERE parent_id = $1 AND user_role = $2
            ORDER BY user_id
            FOR UPDATE
            "#,
        )
        .bind(payment.parent_id.as_uuid())
        .bind(UserRole::Child.id())
        .fetch_all(&mut *tx)
        .await?;

        for (child_id, current) in &children {
            let expires_at = extend_subscription(*current, &payment, now)
                .ok_or_else(BillingError::period_out_of_range)?;
            sqlx::query(
                r#"
                UPDATE users
                SET subscription_expires_at = $2, updated_at = now()
                WHERE user_id = $1
                "#,
            )
            .bind(child_id)
            .bind(expires_at)
            .execute(&mut *tx)
            .await?;
        }

        payment.mark_paid(now);
        sqlx::query("UPDATE payments SET payment_status = $2, paid_at = $3 WHERE payment_id = $1")
            .bind(payment.payment_id.as_uuid())
            .bind(payment.status.id())
            .bind(payment.paid_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Approval::Approved {
            payment,
            children_updated: children.len(),
        })
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PaymentRow {
    payment_id: Uuid,
    parent_id: Uuid,
    amount: i64,
    depositor_name: String,
    payment_status: i16,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl PaymentRow {
    fn into_payment(self) -> BillingResult<Payment> {
        let status = PaymentStatus::from_id(self.payment_status).ok_or_else(|| {
            BillingError::Internal(format!("Invalid payment_status: {}", self.payment_status))
        })?;

        Ok(Payment {
            payment_id: PaymentId::from_uuid(self.payment_id),
            parent_id: UserId::from_uuid(self.parent_id),
            amount: self.amount,
            depositor_name: self.depositor_name,
            status,
            start_at: self.start_at,
            end_at: self.end_at,
            paid_at: self.paid_at,
            created_at: self.created_at,
        })
    }
}

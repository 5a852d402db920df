//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::Payment;
use crate::domain::value_object::{PaymentId, UserId};
use crate::error::BillingResult;

/// Result of an approval attempt
#[derive(Debug)]
pub enum Approval {
    /// Payment marked paid and `children_updated` subscriptions extended
    Approved {
        payment: Payment,
        children_updated: usize,
    },
    NotFound,
    /// The payment was already processed; nothing was written
    NotPending(Payment),
}

/// Payment repository trait
#[trait_variant::make(PaymentRepository: Send)]
pub trait LocalPaymentRepository {
    async fn create(&self, payment: &Payment) -> BillingResult<()>;

    /// Payments of a parent, newest first
    async fn find_by_parent(&self, parent_id: &UserId) -> BillingResult<Vec<Payment>>;

    /// Pending payments, oldest first
    async fn find_pending(&self) -> BillingResult<Vec<Payment>>;

    /// Linked users that currently hold the child role
    async fn count_children(&self, parent_id: &UserId) -> BillingResult<i64>;

    /// Lock the payment and the parent's children, extend every child's
    /// subscription and mark the payment paid, all in one transaction.
    async fn approve(&self, payment_id: &PaymentId, now: DateTime<Utc>) -> BillingResult<Approval>;
}

//! Domain services
//!
//! Pure rules over accounts. No I/O.

use chrono::{DateTime, Utc};

use crate::domain::entity::User;
use crate::domain::value_object::UserRole;

/// Whether `user` may use subscription-gated features at `now`.
///
/// Only children are gated. A child without any paid period is treated as
/// expired.
pub fn has_active_subscription(user: &User, now: DateTime<Utc>) -> bool {
    match user.user_role {
        UserRole::Child => user
            .subscription_expires_at
            .is_some_and(|expires_at| expires_at > now),
        UserRole::Parent | UserRole::Mentor | UserRole::Admin => true,
    }
}

/// Whether `viewer` may read learning data that belongs to `owner`.
pub fn can_view_progress_of(viewer: &User, owner: &User) -> bool {
    viewer.user_id == owner.user_id || viewer.is_parent_of(owner) || viewer.is_admin()
}

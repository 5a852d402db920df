//! User Entity

use chrono::{DateTime, Utc};
use platform::identity::VerifiedIdentity;

use crate::domain::value_object::{UserId, UserRole};

/// Account known to the application.
///
/// Created on the first authenticated request of a new identity-provider user.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Stable id issued by the identity provider
    pub identity_uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub profile_image: Option<String>,
    pub user_role: UserRole,
    /// Never negative
    pub candy_balance: i64,
    /// Set for children linked to a parent account
    pub parent_id: Option<UserId>,
    /// End of the paid period. Only meaningful for children.
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New account from verified token claims
    pub fn from_identity(identity: &VerifiedIdentity, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            identity_uid: identity.uid.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            profile_image: identity.photo_url.clone(),
            user_role: role,
            candy_balance: 0,
            parent_id: None,
            subscription_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.user_role = role;
        self.updated_at = Utc::now();
    }

    pub fn is_parent_of(&self, other: &User) -> bool {
        other.parent_id == Some(self.user_id)
    }

    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }
}

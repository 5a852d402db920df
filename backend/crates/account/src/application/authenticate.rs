//! Authenticate Use Case
//!
//! Maps a verified identity onto an application account, creating the
//! account on first sight.

use std::sync::Arc;

use platform::identity::VerifiedIdentity;

use crate::application::config::AccountConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserRole;
use crate::error::AccountResult;

pub struct AuthenticateUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> AuthenticateUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Find-or-create the account for `identity`
    pub async fn execute(&self, identity: &VerifiedIdentity) -> AccountResult<User> {
        if let Some(mut user) = self.user_repo.find_by_identity_uid(&identity.uid).await? {
            if self.config.is_admin_uid(&identity.uid) && !user.is_admin() {
                self.user_repo
                    .update_role(&user.user_id, UserRole::Admin)
                    .await?;
                user.set_role(UserRole::Admin);
                tracing::info!(user_id = %user.user_id, "User promoted to admin");
            }
            return Ok(user);
        }

        let role = self.config.initial_role(&identity.uid, None);
        let user = self
            .user_repo
            .create_if_absent(&User::from_identity(identity, role))
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_role = %user.user_role,
            "User created on first request"
        );

        Ok(user)
    }
}

//! Register Use Case
//!
//! Explicit sign-up with a chosen role.

use std::sync::Arc;

use platform::identity::VerifiedIdentity;

use crate::application::config::AccountConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserRole;
use crate::error::{AccountError, AccountResult};

pub struct RegisterInput {
    pub identity: VerifiedIdentity,
    pub role: UserRole,
}

pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<User> {
        if !input.role.is_self_assignable() {
            return Err(AccountError::InvalidRole(input.role.to_string()));
        }

        if self
            .user_repo
            .find_by_identity_uid(&input.identity.uid)
            .await?
            .is_some()
        {
            return Err(AccountError::UserAlreadyExists);
        }

        let role = self
            .config
            .initial_role(&input.identity.uid, Some(input.role));
        let user = User::from_identity(&input.identity, role);

        // A concurrent first request may have created the row in between.
        self.user_repo.create(&user).await.map_err(|e| match e {
            AccountError::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                AccountError::UserAlreadyExists
            }
            other => other,
        })?;

        tracing::info!(
            user_id = %user.user_id,
            user_role = %user.user_role,
            "User registered"
        );

        Ok(user)
    }
}

//! Set Role Use Case

use std::sync::Arc;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserRole;
use crate::error::{AccountError, AccountResult};

pub struct SetRoleUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> SetRoleUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    /// Change the caller's own role. Administrators are managed by configuration.
    pub async fn execute(&self, mut user: User, role: UserRole) -> AccountResult<User> {
        if !role.is_self_assignable() {
            return Err(AccountError::InvalidRole(role.to_string()));
        }
        if user.is_admin() {
            return Err(AccountError::Validation(
                "Administrator role cannot be changed here".into(),
            ));
        }

        self.user_repo.update_role(&user.user_id, role).await?;
        user.set_role(role);

        tracing::info!(user_id = %user.user_id, user_role = %role, "User role changed");

        Ok(user)
    }
}

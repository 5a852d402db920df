//! Children Use Case
//!
//! Parent/child links and access to a child's data.

use std::sync::Arc;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::services::can_view_progress_of;
use crate::domain::value_object::{UserId, UserRole};
use crate::error::{AccountError, AccountResult};

pub struct ChildrenUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> ChildrenUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    /// Link the account registered under `child_email` to `parent`
    pub async fn link(&self, parent: &User, child_email: &str) -> AccountResult<User> {
        ensure_parent(parent)?;

        let child_email = child_email.trim();
        if child_email.is_empty() {
            return Err(AccountError::Validation("childEmail is required".into()));
        }

        let child = self
            .user_repo
            .find_by_email(child_email)
            .await?
            .ok_or(AccountError::ChildNotFound)?;

        if child.user_id == parent.user_id {
            return Err(AccountError::Validation(
                "A parent cannot be linked as their own child".into(),
            ));
        }
        if child.user_role.is_admin() {
            return Err(AccountError::Validation(
                "Administrator accounts cannot be linked as children".into(),
            ));
        }

        let child = self
            .user_repo
            .link_child(&child.user_id, &parent.user_id)
            .await?
            .ok_or(AccountError::ChildAlreadyLinked)?;

        tracing::info!(
            parent_id = %parent.user_id,
            child_id = %child.user_id,
            "Child linked"
        );

        Ok(child)
    }

    pub async fn list(&self, parent: &User) -> AccountResult<Vec<User>> {
        self.user_repo.find_children(&parent.user_id).await
    }

    pub async fn count(&self, parent: &User) -> AccountResult<i64> {
        self.user_repo.count_children(&parent.user_id).await
    }

    pub async fn unlink(&self, parent: &User, child_id: &UserId) -> AccountResult<()> {
        ensure_parent(parent)?;

        if !self.user_repo.unlink_child(child_id, &parent.user_id).await? {
            return Err(AccountError::ChildNotFound);
        }

        tracing::info!(parent_id = %parent.user_id, child_id = %child_id, "Child unlinked");
        Ok(())
    }

    /// Whose learning data a request is about.
    ///
    /// Without `child_id` the viewer reads their own data. With it, the
    /// viewer must be that child, its parent, or an administrator.
    pub async fn resolve_subject(
        &self,
        viewer: &User,
        child_id: Option<UserId>,
    ) -> AccountResult<User> {
        let Some(child_id) = child_id else {
            return Ok(viewer.clone());
        };
        if child_id == viewer.user_id {
            return Ok(viewer.clone());
        }

        let owner = self
            .user_repo
            .find_by_id(&child_id)
            .await?
            .ok_or(AccountError::ChildNotFound)?;

        if !can_view_progress_of(viewer, &owner) {
            return Err(AccountError::NotYourChild);
        }
        Ok(owner)
    }
}

fn ensure_parent(user: &User) -> AccountResult<()> {
    match user.user_role {
        UserRole::Parent => Ok(()),
        _ => Err(AccountError::NotAParent),
    }
}

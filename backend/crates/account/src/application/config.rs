//! Application Configuration
//!
//! Configuration for the Account application layer.

use std::collections::HashSet;

use platform::env::{env_list, env_string};

use crate::domain::value_object::UserRole;

/// Account application configuration
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Identity-provider uids that are promoted to administrator
    pub admin_uids: HashSet<String>,
    /// Role of users created implicitly on their first request
    pub default_role: UserRole,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            admin_uids: HashSet::new(),
            default_role: UserRole::Parent,
        }
    }
}

impl AccountConfig {
    /// `ADMIN_UIDS` (comma separated) and `DEFAULT_USER_ROLE`
    pub fn from_env() -> Self {
        let default_role = env_string("DEFAULT_USER_ROLE")
            .and_then(|code| UserRole::from_code(&code))
            .filter(UserRole::is_self_assignable)
            .unwrap_or_default();

        Self {
            admin_uids: env_list("ADMIN_UIDS").into_iter().collect(),
            default_role,
        }
    }

    pub fn with_admins<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admin_uids: admins.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn is_admin_uid(&self, uid: &str) -> bool {
        self.admin_uids.contains(uid)
    }

    /// Role a new account for `uid` should start with
    pub fn initial_role(&self, uid: &str, requested: Option<UserRole>) -> UserRole {
        if self.is_admin_uid(uid) {
            UserRole::Admin
        } else {
            requested.unwrap_or(self.default_role)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AccountConfig::default();
        assert!(config.admin_uids.is_empty());
        assert_eq!(config.default_role, UserRole::Parent);
    }

    #[test]
    fn test_initial_role() {
        let config = AccountConfig::with_admins(["ops-uid"]);
        assert_eq!(config.initial_role("ops-uid", Some(UserRole::Child)), UserRole::Admin);
        assert_eq!(config.initial_role("kid", Some(UserRole::Child)), UserRole::Child);
        assert_eq!(config.initial_role("someone", None), UserRole::Parent);
    }
}

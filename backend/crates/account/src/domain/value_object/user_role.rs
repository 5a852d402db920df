use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

/// Role of an account.
///
/// Stored as SMALLINT. `Admin` is an operator role: it is never
/// self-assigned and is granted only through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Parent = 0,
    Child = 1,
    Mentor = 2,
    Admin = 3,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Parent => "PARENT",
            Child => "CHILD",
            Mentor => "MENTOR",
            Admin => "ADMIN",
        }
    }

    #[inline]
    pub const fn from_id(id: i16) -> Option<Self> {
        use UserRole::*;
        match id {
            0 => Some(Parent),
            1 => Some(Child),
            2 => Some(Mentor),
            3 => Some(Admin),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code.trim().to_ascii_uppercase().as_str() {
            "PARENT" => Some(Parent),
            "CHILD" => Some(Child),
            "MENTOR" => Some(Mentor),
            "ADMIN" => Some(Admin),
            _ => None,
        }
    }

    /// Roles a user may pick for themselves at registration or later.
    #[inline]
    pub const fn is_self_assignable(&self) -> bool {
        !matches!(self, UserRole::Admin)
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// Accepts role codes in any case (`"child"`, `"CHILD"`)
impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        UserRole::from_code(&code)
            .ok_or_else(|| de::Error::unknown_variant(&code, &["PARENT", "CHILD", "MENTOR", "ADMIN"]))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_id_roundtrip() {
        for role in [
            UserRole::Parent,
            UserRole::Child,
            UserRole::Mentor,
            UserRole::Admin,
        ] {
            assert_eq!(UserRole::from_id(role.id()), Some(role));
        }
        assert_eq!(UserRole::from_id(9), None);
    }

    #[test]
    fn test_user_role_from_code_is_case_insensitive() {
        assert_eq!(UserRole::from_code("parent"), Some(UserRole::Parent));
        assert_eq!(UserRole::from_code(" Child "), Some(UserRole::Child));
        assert_eq!(UserRole::from_code("MENTOR"), Some(UserRole::Mentor));
        assert_eq!(UserRole::from_code("teacher"), None);
    }

    #[test]
    fn test_admin_is_not_self_assignable() {
        assert!(UserRole::Parent.is_self_assignable());
        assert!(UserRole::Child.is_self_assignable());
        assert!(UserRole::Mentor.is_self_assignable());
        assert!(!UserRole::Admin.is_self_assignable());
    }

    #[test]
    fn test_serde_uses_upper_case_codes() {
        assert_eq!(serde_json::to_string(&UserRole::Child).unwrap(), r#""CHILD""#);
        let role: UserRole = serde_json::from_str(r#""MENTOR""#).unwrap();
        assert_eq!(role, UserRole::Mentor);
        let role: UserRole = serde_json::from_str(r#""child""#).unwrap();
        assert_eq!(role, UserRole::Child);
        assert!(serde_json::from_str::<UserRole>(r#""teacher""#).is_err());
    }
}

//! Typed entity identifiers
//!
//! Every row in the system is keyed by a UUID v4. Wrapping it in
//! `Id<Marker>` keeps a quiz id from being passed where a user id is expected.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
/// let id = UserId::new();
/// assert_eq!(id.as_uuid().get_version_num(), 4);
/// ```
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// New random ID (UUID v4)
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

// Manual impls: the marker types carry no data and should not need any derives.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

/// Marker types for entity IDs
pub mod markers {
    pub struct User;
    pub struct CandyTransaction;
    pub struct Reward;
    pub struct Chapter;
    pub struct Quiz;
    pub struct QuizAttempt;
    pub struct WeaknessReport;
    pub struct Payment;
    pub struct MentoringRequest;
    pub struct Mentor;
}

pub type UserId = Id<markers::User>;
pub type CandyTransactionId = Id<markers::CandyTransaction>;
pub type RewardId = Id<markers::Reward>;
pub type ChapterId = Id<markers::Chapter>;
pub type QuizId = Id<markers::Quiz>;
pub type QuizAttemptId = Id<markers::QuizAttempt>;
pub type WeaknessReportId = Id<markers::WeaknessReport>;
pub type PaymentId = Id<markers::Payment>;
pub type MentoringRequestId = Id<markers::MentoringRequest>;
pub type MentorId = Id<markers::Mentor>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_v4() {
        let id = UserId::new();
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_copy_and_eq_without_marker_derives() {
        let a = QuizId::new();
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, QuizId::new());
    }

    #[test]
    fn test_serde_is_transparent() {
        let uuid = Uuid::new_v4();
        let id = PaymentId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));

        let back: PaymentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

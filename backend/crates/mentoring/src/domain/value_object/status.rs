use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Lifecycle of a mentoring request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum RequestStatus {
    #[default]
    #[display("pending")]
    Pending = 0,
    #[display("matched")]
    Matched = 1,
    #[display("rejected")]
    Rejected = 2,
    /// Withdrawn by the parent
    #[display("cancelled")]
    Cancelled = 3,
}

impl RequestStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn from_id(id: i16) -> Option<Self> {
        use RequestStatus::*;
        match id {
            0 => Some(Pending),
            1 => Some(Matched),
            2 => Some(Rejected),
            3 => Some(Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum MentorStatus {
    #[default]
    #[display("available")]
    Available = 0,
    #[display("matched")]
    Matched = 1,
    #[display("unavailable")]
    Unavailable = 2,
}

impl MentorStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn from_id(id: i16) -> Option<Self> {
        use MentorStatus::*;
        match id {
            0 => Some(Available),
            1 => Some(Matched),
            2 => Some(Unavailable),
            _ => None,
        }
    }
}

/// Operator decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Matched,
    Rejected,
}

impl From<Decision> for RequestStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Matched => RequestStatus::Matched,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Lifecycle of a subscription payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum PaymentStatus {
    /// Deposit announced, waiting for an operator
    #[default]
    #[display("pending")]
    Pending = 0,
    /// Approved; the children's subscriptions were extended
    #[display("paid")]
    Paid = 1,
    #[display("active")]
    Active = 2,
    #[display("expired")]
    Expired = 3,
}

impl PaymentStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn from_id(id: i16) -> Option<Self> {
        use PaymentStatus::*;
        match id {
            0 => Some(Pending),
            1 => Some(Paid),
            2 => Some(Active),
            3 => Some(Expired),
            _ => None,
        }
    }
}

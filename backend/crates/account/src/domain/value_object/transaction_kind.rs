use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Direction of a candy ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum TransactionKind {
    #[display("earn")]
    Earn = 0,
    #[display("spend")]
    Spend = 1,
}

impl TransactionKind {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(TransactionKind::Earn),
            1 => Some(TransactionKind::Spend),
            _ => None,
        }
    }
}

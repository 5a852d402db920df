use chrono::{DateTime, Utc};
use kernel::id::CandyTransactionId;

use crate::domain::value_object::{CandyAmount, TransactionKind, UserId};

/// One entry of the candy ledger
#[derive(Debug, Clone)]
pub struct CandyTransaction {
    pub transaction_id: CandyTransactionId,
    pub user_id: UserId,
    pub kind: TransactionKind,
    pub amount: i64,
    pub item_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CandyTransaction {
    pub fn new(
        user_id: UserId,
        kind: TransactionKind,
        amount: CandyAmount,
        item_name: Option<String>,
    ) -> Self {
        Self {
            transaction_id: CandyTransactionId::new(),
            user_id,
            kind,
            amount: amount.value(),
            item_name,
            created_at: Utc::now(),
        }
    }
}

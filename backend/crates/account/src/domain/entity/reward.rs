use chrono::{DateTime, Utc};
use kernel::id::RewardId;

use crate::domain::value_object::{CandyAmount, UserId};

/// Goods a child bought with candy
#[derive(Debug, Clone)]
pub struct Reward {
    pub reward_id: RewardId,
    pub child_id: UserId,
    pub goods_name: String,
    pub used_candy: i64,
    pub created_at: DateTime<Utc>,
}

impl Reward {
    pub fn new(child_id: UserId, goods_name: String, used_candy: CandyAmount) -> Self {
        Self {
            reward_id: RewardId::new(),
            child_id,
            goods_name,
            used_candy: used_candy.value(),
            created_at: Utc::now(),
        }
    }
}

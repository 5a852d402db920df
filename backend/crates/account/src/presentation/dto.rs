//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{CandyTransaction, Reward, User};
use crate::domain::value_object::{TransactionKind, UserRole};

// ============================================================================
// Users
// ============================================================================

/// Request for POST /api/auth/register and POST /api/user/set-role
#[derive(Debug, Clone, Deserialize)]
pub struct RoleRequest {
    pub role: UserRole,
}

/// Full account view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: UserRole,
    pub profile_image: Option<String>,
    pub candy: i64,
    pub parent_id: Option<Uuid>,
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.into_uuid(),
            email: user.email.clone(),
            name: user.display_name.clone(),
            role: user.user_role,
            profile_image: user.profile_image.clone(),
            candy: user.candy_balance,
            parent_id: user.parent_id.map(|id| id.into_uuid()),
            subscription_expires_at: user.subscription_expires_at,
            created_at: user.created_at,
        }
    }
}

/// Response for GET /api/auth/login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

/// Response for GET /api/user/role
#[derive(Debug, Clone, Serialize)]
pub struct RoleResponse {
    pub role: UserRole,
}

/// Response for GET /api/user/me
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub email: Option<String>,
    pub role: UserRole,
    pub candy: i64,
}

// ============================================================================
// Children
// ============================================================================

/// Request for POST /api/user/children
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChildRequest {
    pub child_email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Candy
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CandyResponse {
    pub candy: i64,
}

/// Request for POST /api/candy/spend and POST /api/user/spend-candy
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendCandyRequest {
    pub amount: i64,
    #[serde(default)]
    pub item_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendCandyResponse {
    pub success: bool,
    pub remaining_candy: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: i64,
    pub item_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CandyTransaction> for TransactionResponse {
    fn from(entry: CandyTransaction) -> Self {
        Self {
            id: entry.transaction_id.into_uuid(),
            kind: entry.kind,
            amount: entry.amount,
            item_name: entry.item_name,
            created_at: entry.created_at,
        }
    }
}

/// Request for POST /api/admin/candy/increment
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncrementCandyRequest {
    pub user_id: Uuid,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncrementCandyResponse {
    pub user_id: Uuid,
    pub amount: i64,
    pub candy: i64,
}

// ============================================================================
// Rewards
// ============================================================================

/// Request for POST /api/rewards
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRewardRequest {
    pub goods_name: String,
    pub used_candy: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardResponse {
    pub id: Uuid,
    pub child_id: Uuid,
    pub goods_name: String,
    pub used_candy: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Reward> for RewardResponse {
    fn from(reward: Reward) -> Self {
        Self {
            id: reward.reward_id.into_uuid(),
            child_id: reward.child_id.into_uuid(),
            goods_name: reward.goods_name,
            used_candy: reward.used_candy,
            created_at: reward.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRewardResponse {
    pub reward: RewardResponse,
    pub remaining_candy: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardListResponse {
    pub rewards: Vec<RewardResponse>,
    pub total_used_candy: i64,
}

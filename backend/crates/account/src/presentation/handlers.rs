//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AccountConfig;
use crate::application::{
    ChildrenUseCase, PurchaseInput, RegisterInput, RegisterUseCase, SetRoleUseCase, SpendInput,
    WalletUseCase,
};
use crate::domain::repository::{UserRepository, WalletRepository};
use crate::domain::value_object::{TransactionKind, UserId};
use crate::error::AccountResult;
use crate::presentation::dto::{
    AddChildRequest, CandyResponse, CountResponse, IncrementCandyRequest, IncrementCandyResponse,
    LoginResponse, MeResponse, PurchaseRewardRequest, PurchaseRewardResponse, RewardListResponse,
    RoleRequest, RoleResponse, SpendCandyRequest, SpendCandyResponse, SuccessResponse,
    TransactionResponse, UserResponse,
};
use crate::presentation::extractor::{CurrentIdentity, CurrentUser};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<R>
where
    R: Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountConfig>,
}

// ============================================================================
// Authentication
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AccountAppState<R>>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(req): Json<RoleRequest>,
) -> AccountResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case
        .execute(RegisterInput {
            identity,
            role: req.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/auth/login
pub async fn login(CurrentUser(user): CurrentUser) -> Json<LoginResponse> {
    Json(LoginResponse {
        message: "Login successful",
        user: UserResponse::from(&user),
    })
}

// ============================================================================
// Profile
// ============================================================================

/// POST /api/user/set-role
pub async fn set_role<R>(
    State(state): State<AccountAppState<R>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<RoleRequest>,
) -> AccountResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SetRoleUseCase::new(state.repo.clone());
    let user = use_case.execute(user, req.role).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// GET /api/user/role
pub async fn get_role(CurrentUser(user): CurrentUser) -> Json<RoleResponse> {
    Json(RoleResponse {
        role: user.user_role,
    })
}

/// GET /api/user/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.user_id.into_uuid(),
        email: user.email,
        role: user.user_role,
        candy: user.candy_balance,
    })
}

// ============================================================================
// Children
// ============================================================================

/// POST /api/user/children
pub async fn add_child<R>(
    State(state): State<AccountAppState<R>>,
    CurrentUser(parent): CurrentUser,
    Json(req): Json<AddChildRequest>,
) -> AccountResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ChildrenUseCase::new(state.repo.clone());
    let child = use_case.link(&parent, &req.child_email).await?;
    Ok(Json(UserResponse::from(&child)))
}

/// GET /api/user/children
pub async fn list_children<R>(
    State(state): State<AccountAppState<R>>,
    CurrentUser(parent): CurrentUser,
) -> AccountResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ChildrenUseCase::new(state.repo.clone());
    let children = use_case.list(&parent).await?;
    Ok(Json(children.iter().map(UserResponse::from).collect()))
}

/// GET /api/user/children-count
pub async fn children_count<R>(
    State(state): State<AccountAppState<R>>,
    CurrentUser(parent): CurrentUser,
) -> AccountResult<Json<CountResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ChildrenUseCase::new(state.repo.clone());
    let count = use_case.count(&parent).await?;
    Ok(Json(CountResponse { count }))
}

/// DELETE /api/user/children/{child_id}
pub async fn remove_child<R>(
    State(state): State<AccountAppState<R>>,
    CurrentUser(parent): CurrentUser,
    Path(child_id): Path<Uuid>,
) -> AccountResult<Json<SuccessResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ChildrenUseCase::new(state.repo.clone());
    use_case.unlink(&parent, &UserId::from_uuid(child_id)).await?;
    Ok(Json(SuccessResponse {
        success: true,
        message: "Child removed".into(),
    }))
}

// ============================================================================
// Candy
// ============================================================================

/// GET /api/candy and GET /api/user/candy
pub async fn candy_balance<R>(
    State(state): State<AccountAppState<R>>,
    CurrentUser(user): CurrentUser,
) -> AccountResult<Json<CandyResponse>>
where
    R: WalletRepository + Clone + Send + Sync + 'static,
{
    let use_case = WalletUseCase::new(state.repo.clone());
    let candy = use_case.balance(&user.user_id).await?;
    Ok(Json(CandyResponse { candy }))
}

/// POST /api/candy/spend and POST /api/user/spend-candy
pub async fn spend_candy<R>(
    State(state): State<AccountAppState<R>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<SpendCandyRequest>,
) -> AccountResult<Json<SpendCandyResponse>>
where
    R: WalletRepository + Clone + Send + Sync + 'static,
{
    let use_case = WalletUseCase::new(state.repo.clone());
    let remaining_candy = use_case
        .spend(
            &user,
            SpendInput {
                amount: req.amount,
                item_name: req.item_name,
            },
        )
        .await?;

    Ok(Json(SpendCandyResponse {
        success: true,
        remaining_candy,
    }))
}

/// GET /api/user/purchase-history
pub async fn purchase_history<R>(
    State(state): State<AccountAppState<R>>,
    CurrentUser(user): CurrentUser,
) -> AccountResult<Json<Vec<TransactionResponse>>>
where
    R: WalletRepository + Clone + Send + Sync + 'static,
{
    let use_case = WalletUseCase::new(state.repo.clone());
    let entries = use_case
        .history(&user.user_id, Some(TransactionKind::Spend))
        .await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// GET /api/candy/transactions
pub async fn candy_transactions<R>(
    State(state): State<AccountAppState<R>>,
    CurrentUser(user): CurrentUser,
) -> AccountResult<Json<Vec<TransactionResponse>>>
where
    R: WalletRepository + Clone + Send + Sync + 'static,
{
    let use_case = WalletUseCase::new(state.repo.clone());
    let entries = use_case.history(&user.user_id, None).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Rewards
// ============================================================================

/// POST /api/rewards
pub async fn purchase_reward<R>(
    State(state): State<AccountAppState<R>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<PurchaseRewardRequest>,
) -> AccountResult<(StatusCode, Json<PurchaseRewardResponse>)>
where
    R: WalletRepository + Clone + Send + Sync + 'static,
{
    let use_case = WalletUseCase::new(state.repo.clone());
    let output = use_case
        .purchase(
            &user,
            PurchaseInput {
                goods_name: req.goods_name,
                used_candy: req.used_candy,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PurchaseRewardResponse {
            reward: output.reward.into(),
            remaining_candy: output.remaining_candy,
        }),
    ))
}

/// GET /api/rewards
pub async fn list_rewards<R>(
    State(state): State<AccountAppState<R>>,
    CurrentUser(user): CurrentUser,
) -> AccountResult<Json<RewardListResponse>>
where
    R: WalletRepository + Clone + Send + Sync + 'static,
{
    let use_case = WalletUseCase::new(state.repo.clone());
    let summary = use_case.rewards(&user.user_id).await?;
    Ok(Json(RewardListResponse {
        rewards: summary.rewards.into_iter().map(Into::into).collect(),
        total_used_candy: summary.total_used_candy,
    }))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/admin/users
pub async fn admin_list_users<R>(
    State(state): State<AccountAppState<R>>,
) -> AccountResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let users = state.repo.find_all().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// POST /api/admin/candy/increment
pub async fn admin_increment_candy<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<IncrementCandyRequest>,
) -> AccountResult<Json<IncrementCandyResponse>>
where
    R: WalletRepository + Clone + Send + Sync + 'static,
{
    let use_case = WalletUseCase::new(state.repo.clone());
    let candy = use_case
        .grant(&UserId::from_uuid(req.user_id), req.amount)
        .await?;

    Ok(Json(IncrementCandyResponse {
        user_id: req.user_id,
        amount: req.amount,
        candy,
    }))
}

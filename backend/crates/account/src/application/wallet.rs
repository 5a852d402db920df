//! Wallet Use Case
//!
//! Candy balance, spending, grants and reward purchases.

use std::sync::Arc;

use crate::domain::entity::{CandyTransaction, Reward, User};
use crate::domain::repository::WalletRepository;
use crate::domain::value_object::{CandyAmount, TransactionKind, UserId};
use crate::error::{AccountError, AccountResult};

pub struct SpendInput {
    pub amount: i64,
    pub item_name: Option<String>,
}

pub struct PurchaseInput {
    pub goods_name: String,
    pub used_candy: i64,
}

pub struct PurchaseOutput {
    pub reward: Reward,
    pub remaining_candy: i64,
}

pub struct RewardSummary {
    pub rewards: Vec<Reward>,
    pub total_used_candy: i64,
}

pub struct WalletUseCase<W>
where
    W: WalletRepository,
{
    wallet_repo: Arc<W>,
}

impl<W> WalletUseCase<W>
where
    W: WalletRepository,
{
    pub fn new(wallet_repo: Arc<W>) -> Self {
        Self { wallet_repo }
    }

    pub async fn balance(&self, user_id: &UserId) -> AccountResult<i64> {
        self.wallet_repo
            .balance(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }

    /// Debit the caller. Returns the remaining balance.
    pub async fn spend(&self, user: &User, input: SpendInput) -> AccountResult<i64> {
        let amount = CandyAmount::new(input.amount)?;
        let item_name = input
            .item_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let remaining = self
            .wallet_repo
            .debit(&user.user_id, amount, item_name)
            .await?
            .ok_or(AccountError::InsufficientCandy)?;

        tracing::info!(
            user_id = %user.user_id,
            amount = amount.value(),
            remaining,
            "Candy spent"
        );

        Ok(remaining)
    }

    /// Operator credit. Returns the new balance.
    pub async fn grant(&self, user_id: &UserId, amount: i64) -> AccountResult<i64> {
        let amount = CandyAmount::new(amount)?;
        let balance = self
            .wallet_repo
            .credit(user_id, amount, Some("admin grant"))
            .await?
            .ok_or(AccountError::UserNotFound)?;

        tracing::info!(user_id = %user_id, amount = amount.value(), balance, "Candy granted");

        Ok(balance)
    }

    pub async fn history(
        &self,
        user_id: &UserId,
        kind: Option<TransactionKind>,
    ) -> AccountResult<Vec<CandyTransaction>> {
        self.wallet_repo.transactions(user_id, kind).await
    }

    pub async fn purchase(&self, user: &User, input: PurchaseInput) -> AccountResult<PurchaseOutput> {
        let goods_name = input.goods_name.trim();
        if goods_name.is_empty() {
            return Err(AccountError::Validation("goodsName is required".into()));
        }
        let used_candy = CandyAmount::new(input.used_candy)?;

        let reward = Reward::new(user.user_id, goods_name.to_string(), used_candy);
        let remaining_candy = self
            .wallet_repo
            .purchase(&reward)
            .await?
            .ok_or(AccountError::InsufficientCandy)?;

        tracing::info!(
            user_id = %user.user_id,
            reward_id = %reward.reward_id,
            used_candy = reward.used_candy,
            "Reward purchased"
        );

        Ok(PurchaseOutput {
            reward,
            remaining_candy,
        })
    }

    pub async fn rewards(&self, user_id: &UserId) -> AccountResult<RewardSummary> {
        let rewards = self.wallet_repo.rewards(user_id).await?;
        let total_used_candy = rewards.iter().map(|r| r.used_candy).sum();
        Ok(RewardSummary {
            rewards,
            total_used_candy,
        })
    }
}

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{CandyTransaction, Reward, User};
use crate::domain::value_object::{CandyAmount, TransactionKind, UserId, UserRole};
use crate::error::AccountResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert `user` unless the identity uid is already registered.
    /// Returns the stored row either way.
    async fn create_if_absent(&self, user: &User) -> AccountResult<User>;

    /// Insert a new user, failing on a duplicate identity uid
    async fn create(&self, user: &User) -> AccountResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>>;

    async fn find_by_identity_uid(&self, uid: &str) -> AccountResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AccountResult<Option<User>>;

    /// All users, newest first
    async fn find_all(&self) -> AccountResult<Vec<User>>;

    /// Users whose `parent_id` is `parent_id`
    async fn find_children(&self, parent_id: &UserId) -> AccountResult<Vec<User>>;

    /// Linked users that currently hold the child role
    async fn count_children(&self, parent_id: &UserId) -> AccountResult<i64>;

    async fn update_role(&self, user_id: &UserId, role: UserRole) -> AccountResult<()>;

    /// Link `child_id` to `parent_id` and make it a child.
    /// Returns `None` when the child already belongs to another parent.
    async fn link_child(&self, child_id: &UserId, parent_id: &UserId)
    -> AccountResult<Option<User>>;

    /// Clear the link. Returns `false` when `child_id` is not a child of `parent_id`.
    async fn unlink_child(&self, child_id: &UserId, parent_id: &UserId) -> AccountResult<bool>;
}

/// Candy wallet repository trait
///
/// Every balance change is written together with its ledger entry in one
/// database transaction.
#[trait_variant::make(WalletRepository: Send)]
pub trait LocalWalletRepository {
    /// Current balance, `None` for an unknown user
    async fn balance(&self, user_id: &UserId) -> AccountResult<Option<i64>>;

    /// Conditional debit. Returns the new balance, or `None` when the balance
    /// is insufficient (nothing is written in that case).
    async fn debit(
        &self,
        user_id: &UserId,
        amount: CandyAmount,
        item_name: Option<&str>,
    ) -> AccountResult<Option<i64>>;

    /// Credit. Returns the new balance, or `None` for an unknown user.
    async fn credit(
        &self,
        user_id: &UserId,
        amount: CandyAmount,
        item_name: Option<&str>,
    ) -> AccountResult<Option<i64>>;

    /// Debit `reward.used_candy` and store the reward.
    /// Returns the new balance, or `None` when the balance is insufficient.
    async fn purchase(&self, reward: &Reward) -> AccountResult<Option<i64>>;

    /// Ledger entries of a user, newest first
    async fn transactions(
        &self,
        user_id: &UserId,
        kind: Option<TransactionKind>,
    ) -> AccountResult<Vec<CandyTransaction>>;

    /// Purchased rewards of a child, newest first
    async fn rewards(&self, child_id: &UserId) -> AccountResult<Vec<Reward>>;
}

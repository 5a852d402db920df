//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::entity::{CandyTransaction, Reward, User};
use crate::domain::repository::{UserRepository, WalletRepository};
use crate::domain::value_object::{CandyAmount, TransactionKind, UserId, UserRole};
use crate::error::{AccountError, AccountResult};

/// `SELECT <user columns> FROM users <tail>`
macro_rules! select_users {
    ($tail:literal) => {
        concat!(
            r#"
            SELECT
                user_id,
                identity_uid,
                email,
                display_name,
                profile_image,
                user_role,
                candy_balance,
                parent_id,
                subscription_expires_at,
                created_at,
                updated_at
            FROM users
            "#,
            $tail
        )
    };
}

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Ledger helpers (shared with other bounded contexts writing candy)
// ============================================================================

/// Append one ledger entry on an open connection or transaction.
pub async fn insert_candy_transaction(
    conn: &mut PgConnection,
    entry: &CandyTransaction,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO candy_transactions (
            transaction_id,
            user_id,
            kind,
            amount,
            item_name,
            created_at
        ) VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(entry.transaction_id.as_uuid())
    .bind(entry.user_id.as_uuid())
    .bind(entry.kind.id())
    .bind(entry.amount)
    .bind(entry.item_name.as_deref())
    .bind(entry.created_at)
    .execute(conn)
    .await?;

    Ok(())
}

/// Credit `amount` and log an `earn` entry. Must run inside a transaction.
///
/// Returns the new balance, or `None` for an unknown user.
pub async fn credit_candy(
    conn: &mut PgConnection,
    user_id: &UserId,
    amount: CandyAmount,
    item_name: Option<&str>,
) -> Result<Option<i64>, sqlx::Error> {
    let balance = sqlx::query_scalar::<_, i64>(
        r#"
        UPDATE users
        SET candy_balance = candy_balance + $2, updated_at = now()
        WHERE user_id = $1
        RETURNING candy_balance
        "#,
    )
    .bind(user_id.as_uuid())
    .bind(amount.value())
    .fetch_optional(&mut *conn)
    .await?;

    if balance.is_some() {
        let entry = CandyTransaction::new(
            *user_id,
            TransactionKind::Earn,
            amount,
            item_name.map(str::to_string),
        );
        insert_candy_transaction(conn, &entry).await?;
    }

    Ok(balance)
}

/// Conditional debit and `spend` entry. Must run inside a transaction.
///
/// Returns `None` and writes nothing when the balance is insufficient.
async fn debit_candy(
    conn: &mut PgConnection,
    user_id: &UserId,
    amount: CandyAmount,
    item_name: Option<&str>,
) -> Result<Option<i64>, sqlx::Error> {
    let balance = sqlx::query_scalar::<_, i64>(
        r#"
        UPDATE users
        SET candy_balance = candy_balance - $2, updated_at = now()
        WHERE user_id = $1 AND candy_balance >= $2
        RETURNING candy_balance
        "#,
    )
    .bind(user_id.as_uuid())
    .bind(amount.value())
    .fetch_optional(&mut *conn)
    .await?;

    if balance.is_some() {
        let entry = CandyTransaction::new(
            *user_id,
            TransactionKind::Spend,
            amount,
            item_name.map(str::to_string),
        );
        insert_candy_transaction(conn, &entry).await?;
    }

    Ok(balance)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAccountRepository {
    async fn create_if_absent(&self, user: &User) -> AccountResult<User> {
        insert_user(&self.pool, user, true).await?;

        let row = sqlx::query_as::<_, UserRow>(select_users!("WHERE identity_uid = $1"))
            .bind(&user.identity_uid)
            .fetch_one(&self.pool)
            .await?;

        row.into_user()
    }

    async fn create(&self, user: &User) -> AccountResult<()> {
        insert_user(&self.pool, user, false).await
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(select_users!("WHERE user_id = $1"))
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_identity_uid(&self, uid: &str) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(select_users!("WHERE identity_uid = $1"))
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(select_users!(
            "WHERE lower(email) = lower($1) ORDER BY created_at LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_all(&self) -> AccountResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(select_users!("ORDER BY created_at DESC"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn find_children(&self, parent_id: &UserId) -> AccountResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(select_users!(
            "WHERE parent_id = $1 ORDER BY created_at"
        ))
        .bind(parent_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn count_children(&self, parent_id: &UserId) -> AccountResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE parent_id = $1 AND user_role = $2",
        )
        .bind(parent_id.as_uuid())
        .bind(UserRole::Child.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn update_role(&self, user_id: &UserId, role: UserRole) -> AccountResult<()> {
        let result =
            sqlx::query("UPDATE users SET user_role = $2, updated_at = now() WHERE user_id = $1")
                .bind(user_id.as_uuid())
                .bind(role.id())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AccountError::UserNotFound);
        }
        Ok(())
    }

    async fn link_child(
        &self,
        child_id: &UserId,
        parent_id: &UserId,
    ) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET parent_id = $2, user_role = $3, updated_at = now()
            WHERE user_id = $1 AND (parent_id IS NULL OR parent_id = $2)
            RETURNING
                user_id,
                identity_uid,
                email,
                display_name,
                profile_image,
                user_role,
                candy_balance,
                parent_id,
                subscription_expires_at,
                created_at,
                updated_at
            "#,
        )
        .bind(child_id.as_uuid())
        .bind(parent_id.as_uuid())
        .bind(UserRole::Child.id())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn unlink_child(&self, child_id: &UserId, parent_id: &UserId) -> AccountResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET parent_id = NULL, updated_at = now()
            WHERE user_id = $1 AND parent_id = $2
            "#,
        )
        .bind(child_id.as_uuid())
        .bind(parent_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn insert_user(pool: &PgPool, user: &User, ignore_conflict: bool) -> AccountResult<()> {
    let sql = if ignore_conflict {
        concat!(
            "INSERT INTO users (user_id, identity_uid, email, display_name, profile_image, ",
            "user_role, candy_balance, parent_id, subscription_expires_at, created_at, updated_at) ",
            "VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) ",
            "ON CONFLICT (identity_uid) DO NOTHING"
        )
    } else {
        concat!(
            "INSERT INTO users (user_id, identity_uid, email, display_name, profile_image, ",
            "user_role, candy_balance, parent_id, subscription_expires_at, created_at, updated_at) ",
            "VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"
        )
    };

    sqlx::query(sql)
        .bind(user.user_id.as_uuid())
        .bind(&user.identity_uid)
        .bind(user.email.as_deref())
        .bind(user.display_name.as_deref())
        .bind(user.profile_image.as_deref())
        .bind(user.user_role.id())
        .bind(user.candy_balance)
        .bind(user.parent_id.map(UserId::into_uuid))
        .bind(user.subscription_expires_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(pool)
        .await?;

    Ok(())
}

// ============================================================================
// Wallet Repository Implementation
// ============================================================================

impl WalletRepository for PgAccountRepository {
    async fn balance(&self, user_id: &UserId) -> AccountResult<Option<i64>> {
        let balance =
            sqlx::query_scalar::<_, i64>("SELECT candy_balance FROM users WHERE user_id = $1")
                .bind(user_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        Ok(balance)
    }

    async fn debit(
        &self,
        user_id: &UserId,
        amount: CandyAmount,
        item_name: Option<&str>,
    ) -> AccountResult<Option<i64>> {
        let mut tx = self.pool.begin().await?;
        let balance = debit_candy(&mut *tx, user_id, amount, item_name).await?;
        tx.commit().await?;
        Ok(balance)
    }

    async fn credit(
        &self,
        user_id: &UserId,
        amount: CandyAmount,
        item_name: Option<&str>,
    ) -> AccountResult<Option<i64>> {
        let mut tx = self.pool.begin().await?;
        let balance = credit_candy(&mut *tx, user_id, amount, item_name).await?;
        tx.commit().await?;
        Ok(balance)
    }

    async fn purchase(&self, reward: &Reward) -> AccountResult<Option<i64>> {
        let amount = CandyAmount::new(reward.used_candy)?;

        let mut tx = self.pool.begin().await?;
        let Some(balance) =
            debit_candy(&mut *tx, &reward.child_id, amount, Some(&reward.goods_name)).await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            r#"
            INSERT INTO rewards (
                reward_id,
                child_id,
                goods_name,
                used_candy,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(reward.reward_id.as_uuid())
        .bind(reward.child_id.as_uuid())
        .bind(&reward.goods_name)
        .bind(reward.used_candy)
        .bind(reward.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(balance))
    }

    async fn transactions(
        &self,
        user_id: &UserId,
        kind: Option<TransactionKind>,
    ) -> AccountResult<Vec<CandyTransaction>> {
        let rows = sqlx::query_as::<_, CandyTransactionRow>(
            r#"
            SELECT
                transaction_id,
                user_id,
                kind,
                amount,
                item_name,
                created_at
            FROM candy_transactions
            WHERE user_id = $1 AND ($2::SMALLINT IS NULL OR kind = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(kind.map(|k| k.id()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(CandyTransactionRow::into_transaction)
            .collect()
    }

    async fn rewards(&self, child_id: &UserId) -> AccountResult<Vec<Reward>> {
        let rows = sqlx::query_as::<_, RewardRow>(
            r#"
            SELECT
                reward_id,
                child_id,
                goods_name,
                used_candy,
                created_at
            FROM rewards
            WHERE child_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(child_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RewardRow::into_reward).collect())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    identity_uid: String,
    email: Option<String>,
    display_name: Option<String>,
    profile_image: Option<String>,
    user_role: i16,
    candy_balance: i64,
    parent_id: Option<Uuid>,
    subscription_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountResult<User> {
        let user_role = UserRole::from_id(self.user_role)
            .ok_or_else(|| AccountError::Internal(format!("Invalid user_role: {}", self.user_role)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            identity_uid: self.identity_uid,
            email: self.email,
            display_name: self.display_name,
            profile_image: self.profile_image,
            user_role,
            candy_balance: self.candy_balance,
            parent_id: self.parent_id.map(UserId::from_uuid),
            subscription_expires_at: self.subscription_expires_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CandyTransactionRow {
    transaction_id: Uuid,
    user_id: Uuid,
    kind: i16,
    amount: i64,
    item_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl CandyTransactionRow {
    fn into_transaction(self) -> AccountResult<CandyTransaction> {
        let kind = TransactionKind::from_id(self.kind)
            .ok_or_else(|| AccountError::Internal(format!("Invalid transaction kind: {}", self.kind)))?;

        Ok(CandyTransaction {
            transaction_id: self.transaction_id.into(),
            user_id: UserId::from_uuid(self.user_id),
            kind,
            amount: self.amount,
            item_name: self.item_name,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RewardRow {
    reward_id: Uuid,
    child_id: Uuid,
    goods_name: String,
    used_candy: i64,
    created_at: DateTime<Utc>,
}

impl RewardRow {
    fn into_reward(self) -> Reward {
        Reward {
            reward_id: self.reward_id.into(),
            child_id: UserId::from_uuid(self.child_id),
            goods_name: self.goods_name,
            used_candy: self.used_candy,
            created_at: self.created_at,
        }
    }
}

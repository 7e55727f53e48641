//! Reward ledger: append-only coin transactions and discount coupons.
//!
//! Coin balances are never stored — a user's balance is the sum of all
//! signed `coins_earned` entries, and ledger rows are never updated or
//! deleted.

use sqlx::PgExecutor;

use crate::error::StoreError;
use crate::persistence::models::RewardRow;

/// Sums the user's signed ledger entries; zero if there are none.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
pub async fn coin_balance(db: impl PgExecutor<'_>, user_id: i64) -> Result<i64, StoreError> {
    let balance = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(coins_earned), 0)::BIGINT FROM transactions WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(db)
    .await?;

    Ok(balance)
}

/// Whether any ledger entry already references the order. Guards the
/// idempotent coin award.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
pub async fn award_exists(db: impl PgExecutor<'_>, order_id: i64) -> Result<bool, StoreError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM transactions WHERE order_id = $1)",
    )
    .bind(order_id)
    .fetch_one(db)
    .await?;

    Ok(exists)
}

/// Appends an earning entry tied to an order.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on insert failure.
pub async fn insert_award(
    db: impl PgExecutor<'_>,
    user_id: i64,
    order_id: i64,
    coins: i64,
) -> Result<i64, StoreError> {
    let transaction_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO transactions (user_id, order_id, coins_earned) VALUES ($1, $2, $3) \
         RETURNING transaction_id",
    )
    .bind(user_id)
    .bind(order_id)
    .bind(coins)
    .fetch_one(db)
    .await?;

    Ok(transaction_id)
}

/// Appends a spend entry (negative coins, no order reference). The
/// caller verifies sufficient balance first.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on insert failure.
pub async fn insert_spend(
    db: impl PgExecutor<'_>,
    user_id: i64,
    amount: i64,
) -> Result<(), StoreError> {
    sqlx::query("INSERT INTO transactions (user_id, order_id, coins_earned) VALUES ($1, NULL, $2)")
        .bind(user_id)
        .bind(-amount)
        .execute(db)
        .await?;

    Ok(())
}

/// Finds one pet owned by the user, if any. Coupons are bound to a pet.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
pub async fn find_pet(db: impl PgExecutor<'_>, user_id: i64) -> Result<Option<i64>, StoreError> {
    let pet_id =
        sqlx::query_scalar::<_, i64>("SELECT pet_id FROM pets WHERE user_id = $1 LIMIT 1")
            .bind(user_id)
            .fetch_optional(db)
            .await?;

    Ok(pet_id)
}

/// Creates a discount coupon worth `percent`% off.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on insert failure.
pub async fn insert_discount(
    db: impl PgExecutor<'_>,
    user_id: i64,
    pet_id: i64,
    percent: i64,
) -> Result<i64, StoreError> {
    let reward_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO rewards (user_id, pet_id, reward_type, value) \
         VALUES ($1, $2, 'discount', $3) RETURNING reward_id",
    )
    .bind(user_id)
    .bind(pet_id)
    .bind(format!("{percent}%"))
    .fetch_one(db)
    .await?;

    Ok(reward_id)
}

/// Consumes a coupon: sets `is_used` and stamps `used_at`, constrained
/// to not-yet-used rows. Returns the number of rows updated — zero
/// means the coupon was unknown or already consumed.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on update failure.
pub async fn consume(db: impl PgExecutor<'_>, reward_id: i64) -> Result<u64, StoreError> {
    let result = sqlx::query(
        "UPDATE rewards SET is_used = TRUE, used_at = now() \
         WHERE reward_id = $1 AND is_used = FALSE",
    )
    .bind(reward_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}

/// Lists the user's unconsumed discount coupons, oldest first.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
pub async fn unused_discounts(
    db: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Vec<RewardRow>, StoreError> {
    let rows = sqlx::query_as::<_, RewardRow>(
        "SELECT reward_id, reward_type, value, is_used FROM rewards \
         WHERE user_id = $1 AND is_used = FALSE ORDER BY reward_id",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

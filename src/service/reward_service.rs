//! Reward service: coin balances, the idempotent coin award, and
//! coupon redemption.

use sqlx::PgPool;

use crate::domain::line_item::coins_for;
use crate::error::StoreError;
use crate::persistence::models::RewardRow;
use crate::persistence::{orders, rewards};

/// Operations over the append-only coin ledger and discount coupons.
#[derive(Debug, Clone)]
pub struct RewardService {
    pool: PgPool,
}

impl RewardService {
    /// Creates a new `RewardService` over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the user's coin balance: the arithmetic sum of all their
    /// signed ledger entries.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    pub async fn coin_balance(&self, user_id: i64) -> Result<i64, StoreError> {
        rewards::coin_balance(&self.pool, user_id).await
    }

    /// Awards `floor(total × 0.1)` coins to the order's owner, at most
    /// once per order. A repeat invocation finds the existing ledger
    /// entry and awards nothing.
    ///
    /// Returns the number of coins awarded (zero when already awarded).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OrderNotFound`] for an unknown order id, or
    /// [`StoreError::Database`] on storage failure.
    pub async fn award_coins(&self, order_id: i64) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let Some((user_id, total_amount)) = orders::owner_and_total(&mut *tx, order_id).await?
        else {
            return Err(StoreError::OrderNotFound(order_id));
        };

        if rewards::award_exists(&mut *tx, order_id).await? {
            tracing::info!(%order_id, "coins already awarded");
            return Ok(0);
        }

        let coins = coins_for(total_amount);
        rewards::insert_award(&mut *tx, user_id, order_id, coins).await?;
        tx.commit().await?;

        tracing::info!(%order_id, %user_id, coins, "coins awarded");
        Ok(coins)
    }

    /// Trades `cost` coins for a `percent`% discount coupon bound to one
    /// of the user's pets. Balance check, coin spend, and coupon insert
    /// run in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRequest`] when any field is missing
    /// or non-positive, [`StoreError::InsufficientCoins`] when the
    /// balance does not cover the cost, [`StoreError::PetNotFound`] when
    /// the user owns no pet, or [`StoreError::Database`] on storage
    /// failure.
    pub async fn trade_discount(
        &self,
        user_id: i64,
        percent: i64,
        cost: i64,
    ) -> Result<(), StoreError> {
        if user_id <= 0 || percent <= 0 || cost <= 0 {
            return Err(StoreError::InvalidRequest("Missing data.".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let balance = rewards::coin_balance(&mut *tx, user_id).await?;
        if balance < cost {
            return Err(StoreError::InsufficientCoins);
        }

        let Some(pet_id) = rewards::find_pet(&mut *tx, user_id).await? else {
            return Err(StoreError::PetNotFound(user_id));
        };

        rewards::insert_spend(&mut *tx, user_id, cost).await?;
        let reward_id = rewards::insert_discount(&mut *tx, user_id, pet_id, percent).await?;
        tx.commit().await?;

        tracing::info!(%user_id, %reward_id, percent, cost, "discount coupon traded");
        Ok(())
    }

    /// Lists the user's unconsumed discount coupons.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    pub async fn unused_discounts(&self, user_id: i64) -> Result<Vec<RewardRow>, StoreError> {
        rewards::unused_discounts(&self.pool, user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    // Validation runs before the first database access, so these tests
    // use a lazy pool that never connects.
    fn make_service() -> RewardService {
        let Ok(pool) = PgPoolOptions::new().connect_lazy("postgres://localhost/storefront_test")
        else {
            panic!("lazy pool construction failed");
        };
        RewardService::new(pool)
    }

    #[tokio::test]
    async fn trade_rejects_missing_fields() {
        let service = make_service();
        for (user_id, percent, cost) in [(0, 10, 100), (5, 0, 100), (5, 10, 0)] {
            let result = service.trade_discount(user_id, percent, cost).await;
            let Err(StoreError::InvalidRequest(message)) = result else {
                panic!("expected InvalidRequest");
            };
            assert_eq!(message, "Missing data.");
        }
    }
}

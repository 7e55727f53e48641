//! Order lifecycle engine: creation, cancellation, and status
//! transitions with their inventory and reward compensations.
//!
//! Every mutation method follows the pattern: validate → open one
//! transaction → ordered fallible steps composed with `?` → commit →
//! post-commit best-effort side effects.

use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::line_item::order_total;
use crate::domain::{LineItem, OrderStatus, PaymentMethod};
use crate::error::StoreError;
use crate::persistence::models::{AdminOrderSummary, CustomerOrderSummary, SellerOrderRow};
use crate::persistence::{inventory, orders, rewards};
use crate::service::{NotificationService, RewardService, log_side_effect};

/// A validated-but-unpersisted order, as submitted by checkout.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Ordering user.
    pub user_id: i64,
    /// Requested lines with price snapshots.
    pub items: Vec<LineItem>,
    /// Percentage discount to subtract from the line total.
    pub discount_percent: Decimal,
    /// Absolute discount recorded on the header.
    pub discount_amount: Decimal,
    /// Discount code, if one was applied.
    pub discount_code: Option<String>,
    /// Reward coupon to consume, if one was applied.
    pub reward_id: Option<i64>,
    /// Raw payment method; anything unrecognized downgrades to `cod`.
    pub payment_method: Option<String>,
}

/// The outcome of a successful order creation.
#[derive(Debug, Clone, Copy)]
pub struct PlacedOrder {
    /// New order id.
    pub order_id: i64,
    /// Payment method actually recorded.
    pub payment_method: PaymentMethod,
}

/// Orchestration layer for the order lifecycle.
///
/// Owns the connection pool for its transactions plus the reward and
/// notification services it triggers as post-commit side effects.
#[derive(Debug, Clone)]
pub struct OrderService {
    pool: PgPool,
    rewards: Arc<RewardService>,
    notifications: Arc<NotificationService>,
}

impl OrderService {
    /// Creates a new `OrderService`.
    #[must_use]
    pub fn new(
        pool: PgPool,
        rewards: Arc<RewardService>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            pool,
            rewards,
            notifications,
        }
    }

    /// Creates an order: availability check, header and line inserts,
    /// total computation, and inventory reservation, all in one
    /// transaction. Any failure rolls the whole creation back. The
    /// reward coupon, if given, is consumed after commit as a logged
    /// best-effort side effect.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRequest`] on a missing user, empty
    /// item list, or malformed line; [`StoreError::InsufficientStock`]
    /// naming the first short product; [`StoreError::Database`] on
    /// storage failure.
    pub async fn create_order(&self, new_order: NewOrder) -> Result<PlacedOrder, StoreError> {
        if new_order.user_id <= 0 || new_order.items.is_empty() {
            return Err(StoreError::InvalidRequest(
                "Missing user_id or items".to_string(),
            ));
        }
        for item in &new_order.items {
            if item.quantity < 1 || item.price < Decimal::ZERO {
                return Err(StoreError::InvalidRequest(format!(
                    "invalid line for product_id {}",
                    item.product_id
                )));
            }
        }

        let payment_method = PaymentMethod::resolve(new_order.payment_method.as_deref());

        let mut tx = self.pool.begin().await?;

        inventory::check_availability(&mut *tx, &new_order.items).await?;

        let order_id = orders::insert_header(
            &mut *tx,
            new_order.user_id,
            new_order.discount_percent,
            new_order.discount_amount,
            new_order.discount_code.as_deref(),
            new_order.reward_id,
            payment_method,
        )
        .await?;
        orders::insert_lines(&mut *tx, order_id, &new_order.items).await?;

        let total_amount = order_total(&new_order.items, new_order.discount_percent);
        orders::set_total(&mut *tx, order_id, total_amount).await?;

        inventory::reserve(&mut *tx, &new_order.items).await?;
        tx.commit().await?;

        tracing::info!(%order_id, %payment_method, %total_amount, "order created");

        if let Some(reward_id) = new_order.reward_id {
            log_side_effect("consume reward", self.consume_reward(reward_id).await);
        }

        Ok(PlacedOrder {
            order_id,
            payment_method,
        })
    }

    /// Cancels a pending order: releases inventory for every line and
    /// marks the header cancelled with the trimmed reason, in one
    /// transaction. The status read takes a row lock, and the final
    /// update is constrained to still-pending rows; losing that race
    /// rolls the inventory release back.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRequest`] on a missing order id or
    /// blank reason, [`StoreError::OrderNotFound`] for an unknown order,
    /// [`StoreError::Conflict`] when the order is no longer pending, or
    /// [`StoreError::Database`] on storage failure.
    pub async fn cancel_order(&self, order_id: i64, reason: &str) -> Result<(), StoreError> {
        if order_id <= 0 {
            return Err(StoreError::InvalidRequest(
                "order_id is required".to_string(),
            ));
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(StoreError::InvalidRequest(
                "Cancellation reason is required".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let Some(status) = orders::lock_status(&mut *tx, order_id).await? else {
            return Err(StoreError::OrderNotFound(order_id));
        };
        if status != OrderStatus::Pending {
            return Err(StoreError::Conflict(
                "Only pending orders can be cancelled".to_string(),
            ));
        }

        let lines = orders::lines(&mut *tx, order_id).await?;
        inventory::release(&mut *tx, &lines).await?;

        let updated = orders::mark_cancelled_if_pending(&mut *tx, order_id, reason).await?;
        if updated == 0 {
            // a concurrent transition won between the locked read and the
            // constrained write; dropping the transaction rolls back the
            // inventory release
            return Err(StoreError::Conflict(
                "Order not found or not in pending status".to_string(),
            ));
        }
        tx.commit().await?;

        tracing::info!(%order_id, "order cancelled, stock restored");
        Ok(())
    }

    /// Administrative status update. Transitioning to `cancelled`
    /// releases inventory for every line in the same transaction as the
    /// status write; transitioning to `received` awards coins after
    /// commit as a logged best-effort side effect.
    ///
    /// Unlike [`Self::cancel_order`], this path does not require the
    /// order to be pending and captures no reason.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OrderNotFound`] for an unknown order, or
    /// [`StoreError::Database`] on storage failure.
    pub async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        if status == OrderStatus::Cancelled {
            let lines = orders::lines(&mut *tx, order_id).await?;
            inventory::release(&mut *tx, &lines).await?;
        }

        let updated = orders::set_status(&mut *tx, order_id, status, false).await?;
        if updated == 0 {
            return Err(StoreError::OrderNotFound(order_id));
        }
        tx.commit().await?;

        tracing::info!(%order_id, %status, "order status updated");

        if status == OrderStatus::Received {
            log_side_effect(
                "award coins",
                self.rewards.award_coins(order_id).await.map(|_| ()),
            );
        }
        Ok(())
    }

    /// Seller status update. Stamps `date_shipped` when transitioning to
    /// `shipped`. After the status write commits, optionally notifies
    /// the customer, and awards coins on `received` — both as logged
    /// best-effort side effects.
    ///
    /// This path performs no inventory release on cancellation; only
    /// the customer and administrative paths compensate stock.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OrderNotFound`] for an unknown order, or
    /// [`StoreError::Database`] on storage failure.
    pub async fn update_order_status_seller(
        &self,
        order_id: i64,
        status: OrderStatus,
        notes: Option<&str>,
        notify_customer: bool,
    ) -> Result<(), StoreError> {
        let stamp_shipped = status == OrderStatus::Shipped;
        let updated = orders::set_status(&self.pool, order_id, status, stamp_shipped).await?;
        if updated == 0 {
            return Err(StoreError::OrderNotFound(order_id));
        }

        tracing::info!(%order_id, %status, "order status updated by seller");

        if notify_customer {
            log_side_effect(
                "notify customer",
                self.notifications
                    .notify(order_id, status, notes)
                    .await
                    .map(|_| ()),
            );
        }
        if status == OrderStatus::Received {
            log_side_effect(
                "award coins",
                self.rewards.award_coins(order_id).await.map(|_| ()),
            );
        }
        Ok(())
    }

    /// Per-order summaries for one customer, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    pub async fn customer_orders(
        &self,
        user_id: i64,
    ) -> Result<Vec<CustomerOrderSummary>, StoreError> {
        orders::customer_orders(&self.pool, user_id).await
    }

    /// Per-order summaries across all customers, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    pub async fn all_orders(&self) -> Result<Vec<AdminOrderSummary>, StoreError> {
        orders::all_orders(&self.pool).await
    }

    /// One row per order line touching the seller's products, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    pub async fn seller_orders(&self, seller_id: i64) -> Result<Vec<SellerOrderRow>, StoreError> {
        orders::seller_orders(&self.pool, seller_id).await
    }

    /// Consumes a reward coupon after order creation. A coupon that is
    /// unknown or already used logs a warning; the order stands either
    /// way.
    async fn consume_reward(&self, reward_id: i64) -> Result<(), StoreError> {
        let updated = rewards::consume(&self.pool, reward_id).await?;
        if updated == 0 {
            tracing::warn!(%reward_id, "reward unknown or already used; order kept");
        } else {
            tracing::info!(%reward_id, "reward marked as used");
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    // Validation runs before the first database access, so these tests
    // use a lazy pool that never connects.
    fn make_service() -> OrderService {
        let Ok(pool) = PgPoolOptions::new().connect_lazy("postgres://localhost/storefront_test")
        else {
            panic!("lazy pool construction failed");
        };
        let rewards = Arc::new(RewardService::new(pool.clone()));
        let notifications = Arc::new(NotificationService::new(pool.clone()));
        OrderService::new(pool, rewards, notifications)
    }

    fn valid_line() -> LineItem {
        LineItem {
            product_id: 1,
            quantity: 2,
            price: Decimal::from(100),
        }
    }

    #[tokio::test]
    async fn create_order_rejects_missing_user() {
        let service = make_service();
        let result = service
            .create_order(NewOrder {
                user_id: 0,
                items: vec![valid_line()],
                discount_percent: Decimal::ZERO,
                discount_amount: Decimal::ZERO,
                discount_code: None,
                reward_id: None,
                payment_method: None,
            })
            .await;
        let Err(StoreError::InvalidRequest(message)) = result else {
            panic!("expected InvalidRequest");
        };
        assert_eq!(message, "Missing user_id or items");
    }

    #[tokio::test]
    async fn create_order_rejects_empty_items() {
        let service = make_service();
        let result = service
            .create_order(NewOrder {
                user_id: 3,
                items: vec![],
                discount_percent: Decimal::ZERO,
                discount_amount: Decimal::ZERO,
                discount_code: None,
                reward_id: None,
                payment_method: None,
            })
            .await;
        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn create_order_rejects_non_positive_quantity() {
        let service = make_service();
        let result = service
            .create_order(NewOrder {
                user_id: 3,
                items: vec![LineItem {
                    product_id: 7,
                    quantity: 0,
                    price: Decimal::from(10),
                }],
                discount_percent: Decimal::ZERO,
                discount_amount: Decimal::ZERO,
                discount_code: None,
                reward_id: None,
                payment_method: None,
            })
            .await;
        let Err(StoreError::InvalidRequest(message)) = result else {
            panic!("expected InvalidRequest");
        };
        assert!(message.contains("product_id 7"));
    }

    #[tokio::test]
    async fn cancel_order_requires_a_reason() {
        let service = make_service();
        let result = service.cancel_order(5, "   ").await;
        let Err(StoreError::InvalidRequest(message)) = result else {
            panic!("expected InvalidRequest");
        };
        assert_eq!(message, "Cancellation reason is required");
    }

    #[tokio::test]
    async fn cancel_order_requires_an_order_id() {
        let service = make_service();
        let result = service.cancel_order(0, "changed my mind").await;
        let Err(StoreError::InvalidRequest(message)) = result else {
            panic!("expected InvalidRequest");
        };
        assert_eq!(message, "order_id is required");
    }
}

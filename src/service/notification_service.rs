//! Notification service: status-change messages for customers.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::OrderStatus;
use crate::error::StoreError;
use crate::persistence::models::NotificationRow;
use crate::persistence::{notifications, orders};

/// Operations over the per-user notification log.
#[derive(Debug, Clone)]
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    /// Creates a new `NotificationService` over the given connection
    /// pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Notifies the order's owner of a status change. Blank or missing
    /// notes fall back to the templated message.
    ///
    /// Returns the new notification id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OrderNotFound`] for an unknown order id, or
    /// [`StoreError::Database`] on storage failure.
    pub async fn notify(
        &self,
        order_id: i64,
        status: OrderStatus,
        notes: Option<&str>,
    ) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let Some(user_id) = orders::owner(&mut *tx, order_id).await? else {
            return Err(StoreError::OrderNotFound(order_id));
        };

        let notes = match notes {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => format!("Your order status has been updated to {status}"),
        };

        let notification_id =
            notifications::insert(&mut *tx, order_id, user_id, status.as_str(), &notes).await?;
        tx.commit().await?;

        tracing::info!(%order_id, %user_id, %status, "notification created");
        Ok(notification_id)
    }

    /// Inserts a notification row directly, without resolving the order
    /// owner. Back-office utility; the status text is stored as given.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on insert failure.
    pub async fn notify_manual(
        &self,
        user_id: i64,
        order_id: i64,
        status: &str,
        notes: Option<&str>,
    ) -> Result<i64, StoreError> {
        let notes = match notes {
            Some(text) if !text.trim().is_empty() => text,
            _ => "Manual notification",
        };
        notifications::insert(&self.pool, order_id, user_id, status, notes).await
    }

    /// Lists the user's notifications, newest first, capped at 50,
    /// optionally filtered to rows created after `since`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    pub async fn list(
        &self,
        user_id: i64,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<NotificationRow>, StoreError> {
        notifications::list_since(&self.pool, user_id, since).await
    }

    /// Marks every unread notification read. Returns the number of rows
    /// updated.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on update failure.
    pub async fn mark_all_read(&self, user_id: i64) -> Result<u64, StoreError> {
        notifications::mark_all_read(&self.pool, user_id).await
    }
}

//! Notification sink: append-only per-user message log keyed by order.
//!
//! Rows are append-only except for the `is_read` flag.

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;

use crate::error::StoreError;
use crate::persistence::models::NotificationRow;

/// Listing cap for a single fetch.
const LIST_CAP: i64 = 50;

/// Appends an unread notification and returns its id.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on insert failure.
pub async fn insert(
    db: impl PgExecutor<'_>,
    order_id: i64,
    user_id: i64,
    status: &str,
    notes: &str,
) -> Result<i64, StoreError> {
    let notification_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO notifications (order_id, user_id, status, notes, is_read) \
         VALUES ($1, $2, $3, $4, FALSE) RETURNING notification_id",
    )
    .bind(order_id)
    .bind(user_id)
    .bind(status)
    .bind(notes)
    .fetch_one(db)
    .await?;

    Ok(notification_id)
}

/// Lists the user's notifications, newest first, capped at 50 and
/// optionally filtered to rows created after `since`.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
pub async fn list_since(
    db: impl PgExecutor<'_>,
    user_id: i64,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<NotificationRow>, StoreError> {
    let rows = if let Some(since) = since {
        sqlx::query_as::<_, NotificationRow>(
            "SELECT notification_id, order_id, user_id, status, notes, is_read, created_at, updated_at \
             FROM notifications WHERE user_id = $1 AND created_at > $2 \
             ORDER BY created_at DESC LIMIT $3",
        )
        .bind(user_id)
        .bind(since)
        .bind(LIST_CAP)
        .fetch_all(db)
        .await
    } else {
        sqlx::query_as::<_, NotificationRow>(
            "SELECT notification_id, order_id, user_id, status, notes, is_read, created_at, updated_at \
             FROM notifications WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(LIST_CAP)
        .fetch_all(db)
        .await
    }?;

    Ok(rows)
}

/// Flips every unread notification to read. Returns the number of rows
/// updated.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on update failure.
pub async fn mark_all_read(db: impl PgExecutor<'_>, user_id: i64) -> Result<u64, StoreError> {
    let result = sqlx::query(
        "UPDATE notifications SET is_read = TRUE, updated_at = now() \
         WHERE user_id = $1 AND is_read = FALSE",
    )
    .bind(user_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}

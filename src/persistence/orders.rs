//! Order aggregate store: header and line persistence, guarded status
//! writes, and the read-only dashboard queries.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgExecutor};

use crate::domain::{LineItem, OrderStatus, PaymentMethod};
use crate::error::StoreError;
use crate::persistence::models::{
    AdminOrderSummary, CustomerOrderSummary, OrderLineQty, SellerOrderRow,
};

/// Inserts the order header with a zero total placeholder and returns
/// the new order id. The committed total is written by [`set_total`]
/// once the lines are persisted.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on insert failure (including an
/// unknown `reward_id` tripping the foreign key).
#[allow(clippy::too_many_arguments)]
pub async fn insert_header(
    db: impl PgExecutor<'_>,
    user_id: i64,
    discount_percent: Decimal,
    discount_amount: Decimal,
    discount_code: Option<&str>,
    reward_id: Option<i64>,
    payment_method: PaymentMethod,
) -> Result<i64, StoreError> {
    let order_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders \
         (user_id, total_amount, discount_percent, discount_amount, discount_code, reward_id, payment_method) \
         VALUES ($1, 0, $2, $3, $4, $5, $6) RETURNING order_id",
    )
    .bind(user_id)
    .bind(discount_percent)
    .bind(discount_amount)
    .bind(discount_code)
    .bind(reward_id)
    .bind(payment_method.as_str())
    .fetch_one(db)
    .await?;

    Ok(order_id)
}

/// Inserts one `order_items` row per line, snapshotting the unit price.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on insert failure, aborting the
/// caller's transaction.
pub async fn insert_lines(
    conn: &mut PgConnection,
    order_id: i64,
    items: &[LineItem],
) -> Result<(), StoreError> {
    for item in items {
        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, quantity, price) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.price)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Writes the computed total onto the order header.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on update failure.
pub async fn set_total(
    db: impl PgExecutor<'_>,
    order_id: i64,
    total_amount: Decimal,
) -> Result<(), StoreError> {
    sqlx::query("UPDATE orders SET total_amount = $1 WHERE order_id = $2")
        .bind(total_amount)
        .bind(order_id)
        .execute(db)
        .await?;
    Ok(())
}

/// Reads the order's status under a row lock (`FOR UPDATE`), giving the
/// caller mutual exclusion against concurrent transitions of the same
/// order for the remainder of its transaction.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure, or
/// [`StoreError::InvalidStatus`] if the stored text is not a known
/// state.
pub async fn lock_status(
    conn: &mut PgConnection,
    order_id: i64,
) -> Result<Option<OrderStatus>, StoreError> {
    let status: Option<String> =
        sqlx::query_scalar("SELECT status FROM orders WHERE order_id = $1 FOR UPDATE")
            .bind(order_id)
            .fetch_optional(&mut *conn)
            .await?;

    status.map(|raw| raw.parse()).transpose()
}

/// Fetches the order's lines reduced to (product, quantity) for stock
/// compensation.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
pub async fn lines(db: impl PgExecutor<'_>, order_id: i64) -> Result<Vec<OrderLineQty>, StoreError> {
    let rows = sqlx::query_as::<_, OrderLineQty>(
        "SELECT product_id, quantity FROM order_items WHERE order_id = $1",
    )
    .bind(order_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

/// Marks the order cancelled with the trimmed reason and the current
/// timestamp, constrained to still-pending rows. Returns the number of
/// rows updated — zero means a concurrent transition won the race and
/// the caller must roll back its compensations.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on update failure.
pub async fn mark_cancelled_if_pending(
    db: impl PgExecutor<'_>,
    order_id: i64,
    reason: &str,
) -> Result<u64, StoreError> {
    let result = sqlx::query(
        "UPDATE orders \
         SET status = 'cancelled', cancellation_reason = $1, cancellation_date = now() \
         WHERE order_id = $2 AND status = 'pending'",
    )
    .bind(reason)
    .bind(order_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}

/// Writes the new status unconditionally, optionally stamping
/// `date_shipped`. Returns the number of rows updated — zero means the
/// order does not exist.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on update failure.
pub async fn set_status(
    db: impl PgExecutor<'_>,
    order_id: i64,
    status: OrderStatus,
    stamp_shipped: bool,
) -> Result<u64, StoreError> {
    let result = if stamp_shipped {
        sqlx::query("UPDATE orders SET status = $1, date_shipped = now() WHERE order_id = $2")
            .bind(status.as_str())
            .bind(order_id)
            .execute(db)
            .await
    } else {
        sqlx::query("UPDATE orders SET status = $1 WHERE order_id = $2")
            .bind(status.as_str())
            .bind(order_id)
            .execute(db)
            .await
    }?;

    Ok(result.rows_affected())
}

/// Resolves the order's owning user.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
pub async fn owner(db: impl PgExecutor<'_>, order_id: i64) -> Result<Option<i64>, StoreError> {
    let user_id = sqlx::query_scalar::<_, i64>("SELECT user_id FROM orders WHERE order_id = $1")
        .bind(order_id)
        .fetch_optional(db)
        .await?;

    Ok(user_id)
}

/// Resolves the order's owning user and committed total, as needed by
/// the coin award.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
pub async fn owner_and_total(
    db: impl PgExecutor<'_>,
    order_id: i64,
) -> Result<Option<(i64, Decimal)>, StoreError> {
    let row = sqlx::query_as::<_, (i64, Decimal)>(
        "SELECT user_id, total_amount FROM orders WHERE order_id = $1",
    )
    .bind(order_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

/// Per-order summaries for one customer, newest placement first.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
pub async fn customer_orders(
    db: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Vec<CustomerOrderSummary>, StoreError> {
    let rows = sqlx::query_as::<_, CustomerOrderSummary>(
        "SELECT \
            o.order_id, \
            o.date_placed, \
            o.status, \
            o.payment_method, \
            o.discount_percent, \
            o.discount_amount, \
            o.discount_code, \
            STRING_AGG(p.name || ' x' || oi.quantity, ', ' ORDER BY oi.order_item_id) AS items, \
            SUM(oi.price * oi.quantity) AS total_price, \
            o.total_amount \
         FROM orders o \
         JOIN order_items oi ON o.order_id = oi.order_id \
         JOIN products p ON oi.product_id = p.product_id \
         WHERE o.user_id = $1 \
         GROUP BY o.order_id \
         ORDER BY o.date_placed DESC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

/// Per-order summaries across all customers, newest placement first.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
pub async fn all_orders(db: impl PgExecutor<'_>) -> Result<Vec<AdminOrderSummary>, StoreError> {
    let rows = sqlx::query_as::<_, AdminOrderSummary>(
        "SELECT \
            o.order_id, \
            u.username AS customer_name, \
            o.date_placed, \
            o.status, \
            o.payment_method, \
            o.total_amount, \
            (SELECT STRING_AGG(p.name, ', ' ORDER BY oi.order_item_id) \
             FROM order_items oi \
             JOIN products p ON oi.product_id = p.product_id \
             WHERE oi.order_id = o.order_id) AS items \
         FROM orders o \
         LEFT JOIN users u ON o.user_id = u.user_id \
         ORDER BY o.date_placed DESC",
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

/// One row per order line for every order containing a given seller's
/// products, newest placement first.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure.
pub async fn seller_orders(
    db: impl PgExecutor<'_>,
    seller_id: i64,
) -> Result<Vec<SellerOrderRow>, StoreError> {
    let rows = sqlx::query_as::<_, SellerOrderRow>(
        "SELECT \
            o.order_id, \
            o.user_id, \
            o.status, \
            o.date_placed, \
            o.date_shipped, \
            o.payment_method, \
            o.discount_percent, \
            o.discount_amount, \
            o.discount_code, \
            o.reward_id, \
            o.cancellation_reason, \
            o.cancellation_date, \
            oi.order_item_id, \
            oi.quantity, \
            oi.price, \
            p.name, \
            p.product_id, \
            u.username, \
            u.email \
         FROM orders o \
         INNER JOIN order_items oi ON o.order_id = oi.order_id \
         INNER JOIN products p ON oi.product_id = p.product_id \
         INNER JOIN users u ON o.user_id = u.user_id \
         WHERE p.seller_id = $1 \
         ORDER BY o.date_placed DESC",
    )
    .bind(seller_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

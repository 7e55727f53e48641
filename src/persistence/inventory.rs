//! Inventory ledger: per-product stock counters.
//!
//! Reservation decrements and release increments must run inside the
//! same transaction as the order mutation they compensate; callers pass
//! the open transaction connection.

use sqlx::{PgConnection, PgExecutor};

use crate::domain::LineItem;
use crate::error::StoreError;
use crate::persistence::models::OrderLineQty;

/// Verifies that every requested line fits within current stock.
///
/// Fails fast on the first shortfall without writing anything. This is
/// check-then-reserve: the subsequent decrement can still race another
/// order, in which case the `stock >= 0` check constraint rejects the
/// loser.
///
/// # Errors
///
/// Returns [`StoreError::InsufficientStock`] naming the first product
/// whose stock is short (or which does not exist), or
/// [`StoreError::Database`] on query failure.
pub async fn check_availability(
    db: impl PgExecutor<'_>,
    items: &[LineItem],
) -> Result<(), StoreError> {
    let product_ids: Vec<i64> = items.iter().map(|item| item.product_id).collect();

    let rows: Vec<(i64, i32)> =
        sqlx::query_as("SELECT product_id, stock FROM products WHERE product_id = ANY($1)")
            .bind(&product_ids)
            .fetch_all(db)
            .await?;

    for item in items {
        let available = rows
            .iter()
            .find(|(product_id, _)| *product_id == item.product_id)
            .map(|(_, stock)| *stock);
        match available {
            Some(stock) if stock >= item.quantity => {}
            _ => return Err(StoreError::InsufficientStock(item.product_id)),
        }
    }

    Ok(())
}

/// Decrements stock for every line, holding the inventory against the
/// order being created.
///
/// # Errors
///
/// Returns [`StoreError::InsufficientStock`] when a decrement trips the
/// non-negative stock constraint (a concurrent order took the last
/// units between the availability check and here), or
/// [`StoreError::Database`] on any other failure. Either aborts the
/// caller's transaction.
pub async fn reserve(conn: &mut PgConnection, items: &[LineItem]) -> Result<(), StoreError> {
    for item in items {
        let result = sqlx::query("UPDATE products SET stock = stock - $1 WHERE product_id = $2")
            .bind(item.quantity)
            .bind(item.product_id)
            .execute(&mut *conn)
            .await
            .map_err(|err| map_stock_error(err, item.product_id))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::InsufficientStock(item.product_id));
        }
    }
    Ok(())
}

/// Increments stock for every line, returning inventory on cancellation.
///
/// There is no upper bound against the original catalog stock; the
/// cancellation Conflict guard is the only protection against a double
/// release.
///
/// # Errors
///
/// Returns [`StoreError::Database`] on query failure, aborting the
/// caller's transaction.
pub async fn release(conn: &mut PgConnection, lines: &[OrderLineQty]) -> Result<(), StoreError> {
    for line in lines {
        sqlx::query("UPDATE products SET stock = stock + $1 WHERE product_id = $2")
            .bind(line.quantity)
            .bind(line.product_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Maps a `stock >= 0` check violation to `InsufficientStock`; anything
/// else stays a storage error.
fn map_stock_error(err: sqlx::Error, product_id: i64) -> StoreError {
    let kind = err.as_database_error().map(|db_err| db_err.kind());
    match kind {
        Some(sqlx::error::ErrorKind::CheckViolation) => StoreError::InsufficientStock(product_id),
        _ => StoreError::from(err),
    }
}

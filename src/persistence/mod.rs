//! Persistence layer: PostgreSQL access for the order aggregate, the
//! inventory and reward ledgers, and the notification sink.
//!
//! Functions that execute a single statement accept any
//! `impl sqlx::PgExecutor<'_>` so they run against either the pool or an
//! open transaction; multi-statement sequences take `&mut PgConnection`
//! and are always composed by the service layer inside one transaction.

pub mod inventory;
pub mod models;
pub mod notifications;
pub mod orders;
pub mod rewards;

//! # storefront-gateway
//!
//! REST API backend for an e-commerce storefront's order lifecycle:
//! order creation and cancellation, status transitions with inventory
//! and reward compensations, coin and coupon bookkeeping, and customer
//! notifications.
//!
//! Every multi-table mutation runs inside one PostgreSQL transaction;
//! best-effort side effects (coin award, notification emission, reward
//! consumption) run after commit and log their failures instead of
//! surfacing them.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── OrderService / RewardService / NotificationService (service/)
//!     │
//!     ├── Domain types (domain/)
//!     │
//!     └── PostgreSQL persistence (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;

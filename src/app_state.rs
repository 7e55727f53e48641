//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{NotificationService, OrderService, RewardService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Order lifecycle engine.
    pub orders: Arc<OrderService>,
    /// Coin ledger and coupon operations.
    pub rewards: Arc<RewardService>,
    /// Per-user notification log.
    pub notifications: Arc<NotificationService>,
}

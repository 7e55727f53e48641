//! Service layer: the order lifecycle engine and the reward and
//! notification services.
//!
//! Every mutating operation runs its writes inside one database
//! transaction. Best-effort side effects — coin award, notification
//! emission, reward consumption — run after that transaction commits
//! and report failure only through [`log_side_effect`].

pub mod notification_service;
pub mod order_service;
pub mod reward_service;

pub use notification_service::NotificationService;
pub use order_service::OrderService;
pub use reward_service::RewardService;

use crate::error::StoreError;

/// The non-blocking side-effect contract: a failed post-commit effect
/// is logged at `warn` and dropped; it never rolls back or fails the
/// primary operation.
pub(crate) fn log_side_effect<T>(action: &'static str, result: Result<T, StoreError>) {
    if let Err(err) = result {
        tracing::warn!(%err, action, "best-effort side effect failed");
    }
}

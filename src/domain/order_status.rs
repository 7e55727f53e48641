//! Order lifecycle states.
//!
//! An order is created as [`OrderStatus::Pending`] and transitions
//! monotonically through `pending → shipped → received` or
//! `pending → cancelled`. Only cancellation enforces the pending
//! precondition; the administrative and seller update paths accept any
//! of the four states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Lifecycle state of an order.
///
/// Stored as lowercase text in the `orders.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet shipped. The only state from which cancellation
    /// is allowed.
    Pending,
    /// Handed to the carrier; `date_shipped` is stamped on this
    /// transition via the seller path.
    Shipped,
    /// Confirmed received by the customer; triggers the coin award.
    Received,
    /// Cancelled; inventory has been released back to stock.
    Cancelled,
}

impl OrderStatus {
    /// Returns the lowercase database/wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shipped => "shipped",
            Self::Received => "received",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "shipped" => Ok(Self::Shipped),
            "received" => Ok(Self::Received),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(StoreError::InvalidStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Shipped,
            OrderStatus::Received,
            OrderStatus::Cancelled,
        ] {
            let Ok(parsed) = status.as_str().parse::<OrderStatus>() else {
                panic!("round trip failed for {status}");
            };
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn rejects_unknown_status() {
        let result = "refunded".parse::<OrderStatus>();
        let Err(StoreError::InvalidStatus(raw)) = result else {
            panic!("expected InvalidStatus");
        };
        assert_eq!(raw, "refunded");
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Shipped).ok();
        assert_eq!(json.as_deref(), Some(r#""shipped""#));
    }
}

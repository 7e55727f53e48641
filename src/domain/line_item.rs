//! Order line items and pricing arithmetic.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// One requested line of an order: a product, a quantity, and the unit
/// price captured at order time.
///
/// The price is a snapshot, not a live reference to the product's
/// current price — later catalog changes never alter a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product being ordered.
    pub product_id: i64,
    /// Units requested. Must be positive.
    pub quantity: i32,
    /// Unit price at order time.
    pub price: Decimal,
}

impl LineItem {
    /// Returns `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Computes an order's total: `Σ(price × quantity)` minus the percentage
/// discount, rounded to two decimal places.
///
/// A non-positive `discount_percent` leaves the sum untouched.
#[must_use]
pub fn order_total(items: &[LineItem], discount_percent: Decimal) -> Decimal {
    let subtotal: Decimal = items.iter().map(LineItem::line_total).sum();
    let total = if discount_percent > Decimal::ZERO {
        subtotal - (discount_percent / Decimal::ONE_HUNDRED) * subtotal
    } else {
        subtotal
    };
    total.round_dp(2)
}

/// Coins earned when an order is received: `floor(total × 0.1)`.
#[must_use]
pub fn coins_for(total_amount: Decimal) -> i64 {
    (total_amount / Decimal::TEN).floor().to_i64().unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn item(product_id: i64, quantity: i32, price: u32) -> LineItem {
        LineItem {
            product_id,
            quantity,
            price: Decimal::from(price),
        }
    }

    #[test]
    fn ten_percent_off_two_at_one_hundred_is_180() {
        let items = vec![item(1, 2, 100)];
        let total = order_total(&items, Decimal::TEN);
        assert_eq!(total, Decimal::new(18_000, 2)); // 180.00
    }

    #[test]
    fn zero_discount_is_plain_sum() {
        let items = vec![item(1, 2, 100), item(2, 1, 50)];
        assert_eq!(order_total(&items, Decimal::ZERO), Decimal::from(250));
    }

    #[test]
    fn fractional_discount_rounds_to_cents() {
        let items = vec![item(1, 3, 33)];
        // 99 - 7.5% = 91.575 → 91.58
        let total = order_total(&items, Decimal::new(75, 1));
        assert_eq!(total, Decimal::new(9_158, 2));
    }

    #[test]
    fn coins_floor_the_ten_percent_rule() {
        assert_eq!(coins_for(Decimal::from(180)), 18);
        assert_eq!(coins_for(Decimal::new(19_999, 2)), 19); // 199.99 → 19
        assert_eq!(coins_for(Decimal::new(999, 2)), 0); // 9.99 → 0
    }

    #[test]
    fn line_total_multiplies_quantity() {
        assert_eq!(item(5, 4, 25).line_total(), Decimal::from(100));
    }
}

//! Reward endpoint DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::persistence::models::RewardRow;

/// Coin balance payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct CoinBalanceDto {
    /// Sum of the user's signed ledger entries.
    pub total_coins: i64,
}

/// Response body for `GET /api/v1/rewards/{user_id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RewardBalanceResponse {
    /// Always `true`.
    pub success: bool,
    /// Balance payload.
    pub data: CoinBalanceDto,
}

/// Response body for `GET /api/v1/rewards/{user_id}/discounts`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DiscountListResponse {
    /// Always `true`.
    pub success: bool,
    /// Unconsumed coupons, oldest first.
    pub discounts: Vec<RewardRow>,
}

/// Request body for `POST /api/v1/rewards/trade`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TradeDiscountRequest {
    /// Trading user.
    #[serde(default)]
    pub user_id: i64,
    /// Percent-off value of the coupon to mint.
    #[serde(default)]
    pub percent: i64,
    /// Coins to spend.
    #[serde(default)]
    pub cost: i64,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn trade_request_defaults_missing_fields_to_zero() {
        let Ok(req) = serde_json::from_str::<TradeDiscountRequest>(r#"{"user_id": 5}"#) else {
            panic!("deserialization failed");
        };
        assert_eq!(req.user_id, 5);
        assert_eq!(req.percent, 0);
        assert_eq!(req.cost, 0);
    }
}

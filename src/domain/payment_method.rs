//! Payment methods accepted at checkout.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Payment method selected at order creation.
///
/// Stored as lowercase snake-case text in `orders.payment_method`.
/// Unknown values are silently downgraded to [`PaymentMethod::Cod`]
/// rather than rejected — checkout must not fail over a widget glitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery (the fallback).
    Cod,
    /// GCash wallet.
    Gcash,
    /// Maya wallet.
    Maya,
    /// Online banking.
    OnlineBank,
    /// Direct bank transfer.
    BankTransfer,
}

impl PaymentMethod {
    /// Returns the lowercase database/wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cod => "cod",
            Self::Gcash => "gcash",
            Self::Maya => "maya",
            Self::OnlineBank => "online_bank",
            Self::BankTransfer => "bank_transfer",
        }
    }

    /// Resolves a raw client-supplied value, downgrading anything
    /// unrecognized (or absent) to [`PaymentMethod::Cod`].
    #[must_use]
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some("cod") => Self::Cod,
            Some("gcash") => Self::Gcash,
            Some("maya") => Self::Maya,
            Some("online_bank") => Self::OnlineBank,
            Some("bank_transfer") => Self::BankTransfer,
            _ => Self::Cod,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_methods() {
        assert_eq!(PaymentMethod::resolve(Some("gcash")), PaymentMethod::Gcash);
        assert_eq!(
            PaymentMethod::resolve(Some("bank_transfer")),
            PaymentMethod::BankTransfer
        );
    }

    #[test]
    fn unknown_method_downgrades_to_cod() {
        assert_eq!(PaymentMethod::resolve(Some("bitcoin")), PaymentMethod::Cod);
        assert_eq!(PaymentMethod::resolve(Some("")), PaymentMethod::Cod);
        assert_eq!(PaymentMethod::resolve(None), PaymentMethod::Cod);
    }

    #[test]
    fn wire_format_is_snake_case() {
        let json = serde_json::to_string(&PaymentMethod::OnlineBank).ok();
        assert_eq!(json.as_deref(), Some(r#""online_bank""#));
    }
}

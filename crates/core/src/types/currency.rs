//! Supported currencies and their static conversion rates.
//!
//! Rates are a fixed fallback table relative to USD. There is no live rate
//! source; clients convert display prices with these multipliers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes offered by the storefront.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    ZAR,
}

impl CurrencyCode {
    /// Every supported currency, in display order.
    pub const ALL: [Self; 5] = [Self::USD, Self::EUR, Self::GBP, Self::JPY, Self::ZAR];

    /// ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::JPY => "JPY",
            Self::ZAR => "ZAR",
        }
    }

    /// Multiplier to convert a USD amount into this currency.
    #[must_use]
    pub const fn fallback_rate(&self) -> f64 {
        match self {
            Self::USD => 1.0,
            Self::EUR => 0.92,
            Self::GBP => 0.79,
            Self::JPY => 149.5,
            Self::ZAR => 18.5,
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// The full static rate table, keyed by currency code.
#[must_use]
pub fn fallback_rates() -> BTreeMap<CurrencyCode, f64> {
    CurrencyCode::ALL
        .into_iter()
        .map(|code| (code, code.fallback_rate()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_rates_table() {
        let json = serde_json::to_value(fallback_rates()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "USD": 1.0,
                "EUR": 0.92,
                "GBP": 0.79,
                "JPY": 149.5,
                "ZAR": 18.5
            })
        );
    }

    #[test]
    fn test_code_matches_serde_name() {
        for code in CurrencyCode::ALL {
            assert_eq!(
                serde_json::to_string(&code).unwrap(),
                format!("\"{}\"", code.code())
            );
        }
    }
}

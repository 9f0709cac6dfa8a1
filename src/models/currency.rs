//! Currency codes and the USD-pivot exchange rate table.
//!
//! Every rate in an [`ExchangeRateTable`] is expressed as "units of this
//! currency per one US dollar", so USD itself is always `1`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A supported currency.
///
/// The set is closed; anything else is rejected when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    /// United States dollar (the pivot currency).
    Usd,
    /// Euro.
    Eur,
    /// Israeli new shekel.
    Ils,
    /// Pound sterling.
    Gbp,
    /// Canadian dollar.
    Cad,
    /// Australian dollar.
    Aud,
    /// Japanese yen.
    Jpy,
    /// Swiss franc.
    Chf,
}

impl CurrencyCode {
    /// Every supported currency, in display order.
    pub const ALL: [CurrencyCode; 8] = [
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Ils,
        CurrencyCode::Gbp,
        CurrencyCode::Cad,
        CurrencyCode::Aud,
        CurrencyCode::Jpy,
        CurrencyCode::Chf,
    ];

    /// Returns the ISO 4217 code.
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Ils => "ILS",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Cad => "CAD",
            CurrencyCode::Aud => "AUD",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Chf => "CHF",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        CurrencyCode::ALL
            .into_iter()
            .find(|c| c.as_str() == code)
            .ok_or_else(|| EngineError::UnknownCurrency {
                code: s.to_string(),
            })
    }
}

/// Exchange rates relative to USD, keyed by currency.
///
/// The table is read-only from the engine's point of view. Lookups for a
/// currency that has no entry return `None` and callers fall back to `1`.
///
/// # Example
///
/// ```
/// use compensation_engine::models::{CurrencyCode, ExchangeRateTable};
///
/// let rates = ExchangeRateTable::empty()
///     .with_rate(CurrencyCode::Usd, 1.0)
///     .with_rate(CurrencyCode::Ils, 3.65);
///
/// assert_eq!(rates.get(CurrencyCode::Ils), Some(3.65));
/// assert_eq!(rates.get(CurrencyCode::Eur), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRateTable {
    rates: BTreeMap<CurrencyCode, f64>,
}

impl ExchangeRateTable {
    /// Creates a table with no rates at all.
    pub fn empty() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    /// The built-in rate table used when no settings file overrides it.
    pub fn default_rates() -> Self {
        Self::empty()
            .with_rate(CurrencyCode::Usd, 1.0)
            .with_rate(CurrencyCode::Eur, 0.92)
            .with_rate(CurrencyCode::Ils, 3.65)
            .with_rate(CurrencyCode::Gbp, 0.79)
            .with_rate(CurrencyCode::Cad, 1.35)
            .with_rate(CurrencyCode::Aud, 1.51)
            .with_rate(CurrencyCode::Jpy, 150.27)
            .with_rate(CurrencyCode::Chf, 0.86)
    }

    /// Builder-style insert. Stores the rate as given, including zero, so
    /// that degenerate tables can be represented.
    pub fn with_rate(mut self, currency: CurrencyCode, rate: f64) -> Self {
        self.rates.insert(currency, rate);
        self
    }

    /// Replaces a rate with a user-entered value.
    ///
    /// Non-positive and non-finite values are ignored, leaving the previous
    /// rate in place. Returns whether the table changed.
    pub fn update_rate(&mut self, currency: CurrencyCode, rate: f64) -> bool {
        if !rate.is_finite() || rate <= 0.0 {
            return false;
        }
        self.rates.insert(currency, rate);
        true
    }

    /// Returns the rate for a currency, if present.
    pub fn get(&self, currency: CurrencyCode) -> Option<f64> {
        self.rates.get(&currency).copied()
    }

    /// Iterates over `(currency, rate)` pairs in currency order.
    pub fn iter(&self) -> impl Iterator<Item = (CurrencyCode, f64)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }

    /// Number of currencies with a rate.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the table holds no rates.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for ExchangeRateTable {
    fn default() -> Self {
        Self::default_rates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_serializes_as_iso_code() {
        assert_eq!(serde_json::to_string(&CurrencyCode::Usd).unwrap(), "\"USD\"");
        assert_eq!(serde_json::to_string(&CurrencyCode::Ils).unwrap(), "\"ILS\"");
        assert_eq!(serde_json::to_string(&CurrencyCode::Chf).unwrap(), "\"CHF\"");
    }

    #[test]
    fn test_currency_deserializes_from_iso_code() {
        let code: CurrencyCode = serde_json::from_str("\"JPY\"").unwrap();
        assert_eq!(code, CurrencyCode::Jpy);
    }

    #[test]
    fn test_currency_rejects_unknown_code_in_json() {
        let result: Result<CurrencyCode, _> = serde_json::from_str("\"BTC\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("eur".parse::<CurrencyCode>().unwrap(), CurrencyCode::Eur);
        assert_eq!(" Gbp ".parse::<CurrencyCode>().unwrap(), CurrencyCode::Gbp);
    }

    #[test]
    fn test_from_str_unknown_returns_error() {
        match "XYZ".parse::<CurrencyCode>() {
            Err(EngineError::UnknownCurrency { code }) => assert_eq!(code, "XYZ"),
            other => panic!("Expected UnknownCurrency error, got {:?}", other),
        }
    }

    #[test]
    fn test_display_matches_as_str() {
        for code in CurrencyCode::ALL {
            assert_eq!(code.to_string(), code.as_str());
        }
    }

    #[test]
    fn test_default_rates_cover_every_currency() {
        let rates = ExchangeRateTable::default_rates();
        assert_eq!(rates.len(), CurrencyCode::ALL.len());
        assert_eq!(rates.get(CurrencyCode::Usd), Some(1.0));
        assert_eq!(rates.get(CurrencyCode::Ils), Some(3.65));
        assert_eq!(rates.get(CurrencyCode::Jpy), Some(150.27));
    }

    #[test]
    fn test_update_rate_ignores_non_positive_values() {
        let mut rates = ExchangeRateTable::default_rates();

        assert!(!rates.update_rate(CurrencyCode::Eur, 0.0));
        assert!(!rates.update_rate(CurrencyCode::Eur, -1.0));
        assert!(!rates.update_rate(CurrencyCode::Eur, f64::NAN));
        assert_eq!(rates.get(CurrencyCode::Eur), Some(0.92));

        assert!(rates.update_rate(CurrencyCode::Eur, 0.95));
        assert_eq!(rates.get(CurrencyCode::Eur), Some(0.95));
    }

    #[test]
    fn test_table_serializes_as_map() {
        let rates = ExchangeRateTable::empty()
            .with_rate(CurrencyCode::Usd, 1.0)
            .with_rate(CurrencyCode::Ils, 3.65);
        let json = serde_json::to_string(&rates).unwrap();
        assert_eq!(json, r#"{"USD":1.0,"ILS":3.65}"#);

        let back: ExchangeRateTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rates);
    }
}

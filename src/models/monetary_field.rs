//! Monetary field model.

use serde::{Deserialize, Serialize};

use super::CurrencyCode;

/// An amount in its own currency, with an optional per-field exchange rate.
///
/// When `override_rate` is present and positive it replaces the rate table's
/// entry for `currency` whenever this field is converted.
///
/// # Example
///
/// ```
/// use compensation_engine::models::{CurrencyCode, MonetaryField};
///
/// let salary = MonetaryField::new(20_000.0, CurrencyCode::Ils).with_override_rate(3.5);
/// assert_eq!(salary.override_rate, Some(3.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonetaryField {
    /// The amount, in `currency`.
    pub amount: f64,
    /// The currency the amount is denominated in.
    pub currency: CurrencyCode,
    /// Optional rate that replaces the table lookup for `currency`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_rate: Option<f64>,
}

impl MonetaryField {
    /// Creates a field without an override rate.
    pub fn new(amount: f64, currency: CurrencyCode) -> Self {
        Self {
            amount,
            currency,
            override_rate: None,
        }
    }

    /// Creates a zero amount in the given currency.
    pub fn zero(currency: CurrencyCode) -> Self {
        Self::new(0.0, currency)
    }

    /// Returns the field with an override rate attached.
    pub fn with_override_rate(mut self, rate: f64) -> Self {
        self.override_rate = Some(rate);
        self
    }
}

//! Currency conversion primitives.
//!
//! Conversions pivot through USD: an amount is divided by its source
//! currency's rate to get dollars, then multiplied by the target's rate.
//! None of these functions fail; bad input degrades to zero or to the
//! unconverted amount.

use crate::models::{CurrencyCode, ExchangeRateTable};

/// Returns the override if it is usable (positive), otherwise `None`.
fn usable_override(override_rate: Option<f64>) -> Option<f64> {
    override_rate.filter(|rate| *rate > 0.0)
}

/// Returns the rate to use for `currency`.
///
/// A positive override wins over the table; a currency missing from the
/// table is treated as being at par with USD.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::rate_of;
/// use compensation_engine::models::{CurrencyCode, ExchangeRateTable};
///
/// let rates = ExchangeRateTable::empty().with_rate(CurrencyCode::Ils, 3.65);
///
/// assert_eq!(rate_of(CurrencyCode::Ils, None, &rates), 3.65);
/// assert_eq!(rate_of(CurrencyCode::Ils, Some(3.5), &rates), 3.5);
/// assert_eq!(rate_of(CurrencyCode::Ils, Some(0.0), &rates), 3.65);
/// assert_eq!(rate_of(CurrencyCode::Eur, None, &rates), 1.0);
/// ```
pub fn rate_of(
    currency: CurrencyCode,
    override_rate: Option<f64>,
    rates: &ExchangeRateTable,
) -> f64 {
    usable_override(override_rate)
        .or_else(|| rates.get(currency))
        .unwrap_or(1.0)
}

/// Converts `amount` from one currency to another.
///
/// The override, when present, replaces the rate of `from` only.
///
/// # Edge cases
///
/// - A non-finite `amount` converts to `0`.
/// - Same-currency conversion without an override returns `amount` exactly.
/// - If either resolved rate is zero the amount is returned unchanged.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::convert;
/// use compensation_engine::models::{CurrencyCode, ExchangeRateTable};
///
/// let rates = ExchangeRateTable::empty()
///     .with_rate(CurrencyCode::Usd, 1.0)
///     .with_rate(CurrencyCode::Ils, 3.65);
///
/// let usd = convert(365.0, CurrencyCode::Ils, CurrencyCode::Usd, None, &rates);
/// assert!((usd - 100.0).abs() < 1e-9);
/// ```
pub fn convert(
    amount: f64,
    from: CurrencyCode,
    to: CurrencyCode,
    override_rate: Option<f64>,
    rates: &ExchangeRateTable,
) -> f64 {
    if !amount.is_finite() {
        return 0.0;
    }

    if from == to && usable_override(override_rate).is_none() {
        return amount;
    }

    let from_rate = rate_of(from, override_rate, rates);
    let to_rate = rates.get(to).unwrap_or(1.0);

    if from_rate == 0.0 || to_rate == 0.0 {
        return amount;
    }

    (amount / from_rate) * to_rate
}

/// Maps `NaN` and infinities to `0`, leaving finite values untouched.
///
/// Every derived figure passes through this before it is stored or summed.
pub fn safe(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

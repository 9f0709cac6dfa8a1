//! Monetary field normalization.
//!
//! Lifts a [`MonetaryField`] into the target currency, optionally
//! annualizing it first. Recurring fields are entered as monthly figures.

use crate::models::{CurrencyCode, ExchangeRateTable, MonetaryField};

use super::convert;

/// Number of months in a year, used for annualizing monthly figures.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Converts a field's amount into `target`, honouring its override rate.
pub fn convert_field(
    field: &MonetaryField,
    target: CurrencyCode,
    rates: &ExchangeRateTable,
) -> f64 {
    convert(
        field.amount,
        field.currency,
        target,
        field.override_rate,
        rates,
    )
}

/// Annualizes a monthly field and converts it into `target`.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::convert_annual;
/// use compensation_engine::models::{CurrencyCode, ExchangeRateTable, MonetaryField};
///
/// let rates = ExchangeRateTable::default_rates();
/// let salary = MonetaryField::new(5_000.0, CurrencyCode::Usd);
///
/// assert_eq!(convert_annual(&salary, CurrencyCode::Usd, &rates), 60_000.0);
/// ```
pub fn convert_annual(
    field: &MonetaryField,
    target: CurrencyCode,
    rates: &ExchangeRateTable,
) -> f64 {
    convert(
        field.amount * MONTHS_PER_YEAR,
        field.currency,
        target,
        field.override_rate,
        rates,
    )
}

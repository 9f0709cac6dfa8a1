//! Configuration types for the projection engine.
//!
//! This module contains the strongly-typed settings structure that is
//! deserialized from the YAML settings file.

use serde::{Deserialize, Serialize};

use crate::models::{BenefitsMode, CurrencyCode, ExchangeRateTable};

/// Engine-wide settings.
///
/// These are the values a projection is evaluated against when a request
/// does not override them: the output currency, the exchange rate table
/// and the benefits model.
///
/// # Example settings file
///
/// ```yaml
/// preferred_currency: USD
/// benefits_mode: allowance_only
/// rates:
///   USD: 1.0
///   EUR: 0.92
///   ILS: 3.65
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Currency every summary amount is expressed in.
    pub preferred_currency: CurrencyCode,
    /// Exchange rates relative to USD.
    pub rates: ExchangeRateTable,
    /// How the benefits component is derived.
    #[serde(default)]
    pub benefits_mode: BenefitsMode,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            preferred_currency: CurrencyCode::Usd,
            rates: ExchangeRateTable::default_rates(),
            benefits_mode: BenefitsMode::default(),
        }
    }
}

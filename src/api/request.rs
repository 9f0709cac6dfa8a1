//! Request types for the Compensation Projection Engine API.
//!
//! This module defines the JSON request structure for the `/project` endpoint.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{BenefitsMode, CompensationInputs, CurrencyCode, ExchangeRateTable};

/// Request body for the `/project` endpoint.
///
/// Only `inputs` is required. Everything else falls back to the engine
/// settings, and `reference_year` to the current year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// The compensation to project.
    pub inputs: CompensationInputs,
    /// Output currency code for this projection (e.g. "EUR").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_currency: Option<String>,
    /// Rates to merge over the configured table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<ExchangeRateTable>,
    /// Calendar year treated as year 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_year: Option<i32>,
    /// Benefits model for this projection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits_mode: Option<BenefitsMode>,
}

impl ProjectionRequest {
    /// Creates a request that relies entirely on the engine settings.
    pub fn new(inputs: CompensationInputs) -> Self {
        Self {
            inputs,
            preferred_currency: None,
            rates: None,
            reference_year: None,
            benefits_mode: None,
        }
    }

    /// Parses the requested output currency, if one was given.
    pub fn parse_preferred_currency(&self) -> EngineResult<Option<CurrencyCode>> {
        self.preferred_currency
            .as_deref()
            .map(str::parse::<CurrencyCode>)
            .transpose()
    }

    /// Merges the request's rates over `base`.
    ///
    /// Entries that are not positive finite numbers are skipped, leaving the
    /// configured rate in place. Returns the merged table and the currencies
    /// whose entries were skipped.
    pub fn merged_rates(&self, base: &ExchangeRateTable) -> (ExchangeRateTable, Vec<CurrencyCode>) {
        let mut merged = base.clone();
        let mut ignored = Vec::new();

        if let Some(overrides) = &self.rates {
            for (currency, rate) in overrides.iter() {
                if !merged.update_rate(currency, rate) {
                    ignored.push(currency);
                }
            }
        }

        (merged, ignored)
    }
}

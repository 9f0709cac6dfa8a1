//! Settings loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for loading engine
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{BenefitsMode, CurrencyCode, ExchangeRateTable};

use super::types::EngineSettings;

/// Loads, validates and provides access to engine settings.
///
/// # Example
///
/// ```no_run
/// use compensation_engine::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config/settings.yaml").unwrap();
/// println!("Projecting in {}", loader.preferred_currency());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    settings: EngineSettings,
}

impl SettingsLoader {
    /// Loads settings from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the settings file (e.g., "./config/settings.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `SettingsLoader` on success, or an error if:
    /// - The file is missing or unreadable
    /// - The file contains invalid YAML or an unknown currency code
    /// - Any exchange rate is zero, negative or not finite
    ///
    /// # Example
    ///
    /// ```no_run
    /// use compensation_engine::config::SettingsLoader;
    ///
    /// let loader = SettingsLoader::load("./config/settings.yaml")?;
    /// # Ok::<(), compensation_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let settings: EngineSettings =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Self::from_settings(settings)
    }

    /// Wraps already-built settings after validating them.
    pub fn from_settings(settings: EngineSettings) -> EngineResult<Self> {
        Self::validate_rates(&settings.rates)?;
        Ok(Self { settings })
    }

    fn validate_rates(rates: &ExchangeRateTable) -> EngineResult<()> {
        match rates
            .iter()
            .find(|(_, rate)| !rate.is_finite() || *rate <= 0.0)
        {
            Some((currency, rate)) => Err(EngineError::InvalidRate {
                currency: currency.to_string(),
                rate,
            }),
            None => Ok(()),
        }
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the default output currency.
    pub fn preferred_currency(&self) -> CurrencyCode {
        self.settings.preferred_currency
    }

    /// Returns the exchange rate table.
    pub fn rates(&self) -> &ExchangeRateTable {
        &self.settings.rates
    }

    /// Returns the default benefits model.
    pub fn benefits_mode(&self) -> BenefitsMode {
        self.settings.benefits_mode
    }
}

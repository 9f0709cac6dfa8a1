//! Settings loading and management for the Compensation Projection Engine.
//!
//! This module loads the engine-wide settings from a YAML file: the default
//! output currency, the exchange rate table and the benefits model.
//!
//! # Example
//!
//! ```no_run
//! use compensation_engine::config::SettingsLoader;
//!
//! let loader = SettingsLoader::load("./config/settings.yaml").unwrap();
//! println!("Rates loaded for {} currencies", loader.rates().len());
//! ```

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::EngineSettings;

//! Error types for the Compensation Projection Engine.
//!
//! The projection itself never fails: degenerate numbers and dates are
//! absorbed into the summary. Errors only arise at the edges of the engine,
//! when settings are loaded or when raw strings are parsed into typed values.

use thiserror::Error;

/// The main error type for the Compensation Projection Engine.
///
/// # Example
///
/// ```
/// use compensation_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An exchange rate in the settings table was zero, negative or not a number.
    #[error("Invalid exchange rate for {currency}: {rate}")]
    InvalidRate {
        /// The currency whose rate was rejected.
        currency: String,
        /// The rejected rate.
        rate: f64,
    },

    /// A currency code outside the supported set.
    #[error("Unknown currency code: {code}")]
    UnknownCurrency {
        /// The code that could not be recognised.
        code: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

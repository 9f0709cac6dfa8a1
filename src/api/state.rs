//! Application state for the Compensation Projection Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::SettingsLoader;

/// Shared application state.
///
/// Holds the engine settings, loaded once at startup and read by every
/// request.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine settings.
    settings: Arc<SettingsLoader>,
}

impl AppState {
    /// Creates a new application state with the given settings loader.
    pub fn new(settings: SettingsLoader) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// Returns a reference to the settings loader.
    pub fn settings(&self) -> &SettingsLoader {
        &self.settings
    }
}

//! HTTP server for the Compensation Projection Engine.
//!
//! Environment:
//! - `COMPENSATION_SETTINGS`: settings file (default `./config/settings.yaml`)
//! - `BIND_ADDR`: listen address (default `0.0.0.0:3000`)
//! - `RUST_LOG`: log filter (default `info`)

use compensation_engine::api::{AppState, create_router};
use compensation_engine::config::SettingsLoader;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_SETTINGS_PATH: &str = "./config/settings.yaml";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).with_target(true).init();

    let settings_path = std::env::var("COMPENSATION_SETTINGS")
        .unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let settings = SettingsLoader::load(&settings_path)?;
    info!(
        path = %settings_path,
        preferred_currency = %settings.preferred_currency(),
        currencies = settings.rates().len(),
        "Settings loaded"
    );

    let router = create_router(AppState::new(settings));
    let listener = TcpListener::bind(bind_addr.as_str()).await?;
    info!(address = %bind_addr, "Compensation engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}

//! HTTP API module for the Compensation Projection Engine.
//!
//! This module provides the REST API endpoints for projecting compensation
//! and for reading the engine settings and starter inputs.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{RATE_OVERRIDE_IGNORED, create_router};
pub use request::ProjectionRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;

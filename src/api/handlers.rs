//! HTTP request handlers for the Compensation Projection Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{ProjectionContext, project_compensation};
use crate::models::{AuditTrace, AuditWarning, CompensationInputs, ProjectionResult};

use super::request::ProjectionRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Warning code for a request rate that was not a positive number.
pub const RATE_OVERRIDE_IGNORED: &str = "RATE_OVERRIDE_IGNORED";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/project", post(project_handler))
        .route("/settings", get(settings_handler))
        .route("/defaults", get(defaults_handler))
        .with_state(state)
}

fn json_error(status: StatusCode, error: ApiError) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

/// Handler for POST /project endpoint.
///
/// Accepts a projection request and returns the projected compensation
/// together with its audit trace.
async fn project_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProjectionRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing projection request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries serde's detailed message
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_error(StatusCode::BAD_REQUEST, error);
        }
    };

    let settings = state.settings();

    let preferred_currency = match request.parse_preferred_currency() {
        Ok(currency) => currency.unwrap_or_else(|| settings.preferred_currency()),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Unknown preferred currency"
            );
            let api_error: ApiErrorResponse = err.into();
            return json_error(api_error.status, api_error.error);
        }
    };

    let (rates, ignored_rates) = request.merged_rates(settings.rates());
    let reference_year = request.reference_year.unwrap_or_else(|| Utc::now().year());
    let benefits_mode = request.benefits_mode.unwrap_or_else(|| settings.benefits_mode());

    let ctx = ProjectionContext::new(preferred_currency, &rates, reference_year)
        .with_benefits_mode(benefits_mode);

    // Perform the projection
    let start_time = Instant::now();
    let outcome = project_compensation(&request.inputs, &ctx);
    let duration_us = start_time.elapsed().as_micros() as u64;

    let mut warnings: Vec<AuditWarning> = ignored_rates
        .iter()
        .map(|currency| {
            AuditWarning::new(
                RATE_OVERRIDE_IGNORED,
                format!(
                    "Rate for {} must be a positive number; the configured rate was used",
                    currency
                ),
                "low",
            )
        })
        .collect();
    warnings.extend(outcome.warnings);

    for warning in &warnings {
        warn!(
            correlation_id = %correlation_id,
            code = %warning.code,
            message = %warning.message,
            "Projection input warning"
        );
    }

    info!(
        correlation_id = %correlation_id,
        preferred_currency = %preferred_currency,
        reference_year,
        horizon = outcome.summary.horizon(),
        annual_total = outcome.summary.totals.annual,
        cumulative_total = outcome.summary.cumulative_total(),
        warnings = warnings.len(),
        duration_us,
        "Projection completed successfully"
    );

    let result = ProjectionResult {
        projection_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        reference_year,
        summary: outcome.summary,
        audit_trace: AuditTrace {
            steps: outcome.audit_steps,
            warnings,
            duration_us,
        },
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(result),
    )
        .into_response()
}

/// Handler for GET /settings endpoint.
///
/// Returns the settings the engine was started with.
async fn settings_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.settings().settings().clone())
}

/// Handler for GET /defaults endpoint.
///
/// Returns starter inputs dated today, suitable for seeding a new form.
async fn defaults_handler() -> impl IntoResponse {
    Json(CompensationInputs::starter(Utc::now().date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineSettings, SettingsLoader};
    use crate::models::{
        BenefitsMode, CurrencyCode, ExchangeRateTable, MonetaryField, RecurringCompensation,
    };
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let settings =
            SettingsLoader::load("./config/settings.yaml").expect("Failed to load settings");
        AppState::new(settings)
    }

    fn create_valid_request() -> ProjectionRequest {
        let mut request = ProjectionRequest::new(CompensationInputs::starter(
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        ));
        request.reference_year = Some(2026);
        request
    }

    async fn post_project(router: Router, body: String) -> Response {
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/project")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&create_valid_request()).unwrap();

        let response = post_project(router, body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let result: ProjectionResult = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(result.reference_year, 2026);
        assert_eq!(result.summary.preferred_currency, CurrencyCode::Usd);
        assert_eq!(result.summary.timeline.len(), 5);
        assert_eq!(result.summary.totals.rsu_annual, 12_500.0);
        assert!(!result.audit_trace.steps.is_empty());
        assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = post_project(router, "{invalid json".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_inputs_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = post_project(router, r#"{"reference_year": 2026}"#.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("inputs"));
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&create_valid_request()).unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/project")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_unknown_preferred_currency_returns_400() {
        let router = create_router(create_test_state());
        let mut request = create_valid_request();
        request.preferred_currency = Some("XYZ".to_string());

        let response = post_project(router, serde_json::to_string(&request).unwrap()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "UNKNOWN_CURRENCY");
    }

    #[tokio::test]
    async fn test_request_overrides_settings() {
        let router = create_router(create_test_state());
        let mut request = ProjectionRequest::new(CompensationInputs {
            recurring: RecurringCompensation {
                base: MonetaryField::new(1_000.0, CurrencyCode::Usd),
                allowance: MonetaryField::zero(CurrencyCode::Usd),
                bonus_percentage: 0.0,
            },
            benefits: Default::default(),
            rsu_grants: vec![],
            espp_plans: vec![],
            raises: vec![],
        });
        request.preferred_currency = Some("EUR".to_string());
        request.rates = Some(
            ExchangeRateTable::empty()
                .with_rate(CurrencyCode::Eur, 0.5)
                .with_rate(CurrencyCode::Gbp, -1.0),
        );
        request.reference_year = Some(2030);
        request.benefits_mode = Some(BenefitsMode::PercentOfPay);

        let response = post_project(router, serde_json::to_string(&request).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let result: ProjectionResult = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(result.summary.preferred_currency, CurrencyCode::Eur);
        assert_eq!(result.summary.totals.base, 6_000.0);
        assert_eq!(result.summary.timeline[0].calendar_year, 2030);
        assert_eq!(result.summary.distribution.len(), 6);
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, RATE_OVERRIDE_IGNORED);
    }

    #[tokio::test]
    async fn test_settings_endpoint() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(Request::builder().uri("/settings").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let settings: EngineSettings = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(settings.preferred_currency, CurrencyCode::Usd);
        assert_eq!(settings.rates.get(CurrencyCode::Ils), Some(3.65));
    }

    #[tokio::test]
    async fn test_defaults_endpoint() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(Request::builder().uri("/defaults").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let inputs: CompensationInputs =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(inputs.recurring.base.currency, CurrencyCode::Ils);
        assert_eq!(inputs.rsu_grants.len(), 1);
    }
}

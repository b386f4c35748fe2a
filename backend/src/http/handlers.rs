//! HTTP handlers for the REST API.
//!
//! Handlers only parse the path and query; validation and computation are
//! delegated to [`crate::services::ObservationService`].

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use super::dto::{HealthResponse, ObservationQuery, ObservationResponse, ResponseFormat};
use super::error::{AppError, INVALID_COORDINATES};
use super::state::AppState;
use crate::services::ObservationRequest;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let timezone = if state.observations.timezone_configured() {
        "configured"
    } else {
        "fallback"
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timezone: timezone.to_string(),
    }))
}

// =============================================================================
// Observation
// =============================================================================

/// GET /{lat}/{lng}/{format}?pressure=<Pa>&temperature=<K>
///
/// `format` is `json` or `html`; both return the JSON document.
pub async fn observe(
    State(state): State<AppState>,
    Path((lat, lng, format)): Path<(String, String, String)>,
    Query(query): Query<ObservationQuery>,
) -> HandlerResult<ObservationResponse> {
    let format = ResponseFormat::parse(&format)
        .ok_or_else(|| AppError::NotFound(format!("Unknown format '{}'", format)))?;
    debug!(?format, "observation requested");

    run_observation(&state, &lat, &lng, &query).await
}

/// GET /{lat}/{lng}/
pub async fn observe_default_format(
    State(state): State<AppState>,
    Path((lat, lng)): Path<(String, String)>,
    Query(query): Query<ObservationQuery>,
) -> HandlerResult<ObservationResponse> {
    run_observation(&state, &lat, &lng, &query).await
}

async fn run_observation(
    state: &AppState,
    lat: &str,
    lng: &str,
    query: &ObservationQuery,
) -> HandlerResult<ObservationResponse> {
    let (latitude, longitude) = parse_coordinates(lat, lng)?;

    let mut request = ObservationRequest::new(latitude, longitude);
    request.pressure_pa = query.pressure_pa();
    request.temperature_k = query.temperature_k();

    let result = state.observations.observe(request).await?;
    Ok(Json(ObservationResponse::from(result)))
}

fn parse_coordinates(lat: &str, lng: &str) -> Result<(f64, f64), AppError> {
    let parse = |raw: &str| raw.trim().parse::<f64>().ok();
    match (parse(lat), parse(lng)) {
        (Some(latitude), Some(longitude)) => Ok((latitude, longitude)),
        _ => Err(AppError::BadRequest(INVALID_COORDINATES.to_string())),
    }
}

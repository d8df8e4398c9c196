use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::{BoxError, Router};
use parkreach_core::AccessibilityCheck;
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{AppError, NO_PARKS_MESSAGE};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AccessibilityQuery {
    lat: f64,
    lon: f64,
    city: Option<String>,
    threshold_m: Option<f64>,
}

pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().request_timeout_secs);
    let concurrency_limit = state.config().concurrency_limit;

    Router::new()
        .route("/health", get(health_check))
        .route("/check_accessibility", get(check_accessibility))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(timeout)
                .concurrency_limit(concurrency_limit),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn check_accessibility(
    State(state): State<AppState>,
    query: Result<Query<AccessibilityQuery>, QueryRejection>,
) -> Result<Json<AccessibilityCheck>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let city = query
        .city
        .unwrap_or_else(|| state.config().default_city.clone());
    let threshold_m = query
        .threshold_m
        .unwrap_or(state.config().default_threshold_m);

    let Some(index) = state.park_index(&city).await? else {
        return Err(AppError::NotFound(NO_PARKS_MESSAGE.to_string()));
    };
    match index.check(query.lat, query.lon, threshold_m)? {
        Some(check) => Ok(Json(check)),
        None => Err(AppError::NotFound(NO_PARKS_MESSAGE.to_string())),
    }
}

async fn handle_middleware_error(err: BoxError) -> impl IntoResponse {
    let (status, message) = if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {err}"),
        )
    };
    (status, Json(serde_json::json!({ "error": message })))
}

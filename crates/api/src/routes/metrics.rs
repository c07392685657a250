use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};
use prometheus::TEXT_FORMAT;

use crate::error::AppError;
use crate::state::AppState;

/// GET /metrics -- Prometheus text exposition; 404 when metrics are disabled.
async fn metrics(State(state): State<AppState>) -> Result<Response, AppError> {
    if !state.config.metrics_enabled {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }

    let body = state
        .metrics
        .render()
        .map_err(|e| AppError::InternalError(format!("Metrics encoding error: {e}")))?;

    Ok(([(CONTENT_TYPE, TEXT_FORMAT)], body).into_response())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics))
}

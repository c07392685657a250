//! Handler for opening receptions.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pvz_core::reception::Reception;
use pvz_core::types::DbId;
use serde::Deserialize;

use super::json_body;
use crate::error::AppResult;
use crate::middleware::rbac::RequireEmployee;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceptionRequest {
    pub pvz_id: DbId,
}

/// POST /receptions
pub async fn create_reception(
    RequireEmployee(_user): RequireEmployee,
    State(state): State<AppState>,
    payload: Result<Json<CreateReceptionRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Reception>)> {
    let input = json_body(payload)?;

    let reception = state.stores.receptions.open_reception(input.pvz_id).await?;

    state.metrics.record_reception_created();
    tracing::info!(pvz_id = %input.pvz_id, reception_id = %reception.id, "Reception opened");

    Ok((StatusCode::CREATED, Json(reception)))
}

//! Request handlers, one module per resource.

pub mod auth;
pub mod product;
pub mod pvz;
pub mod reception;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use pvz_core::types::DbId;

use crate::error::{AppError, AppResult};

pub(crate) const INVALID_BODY: &str = "invalid request body";

/// Unwrap a JSON body, turning any rejection (malformed JSON, missing field,
/// wrong type) into a 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "JSON body rejected");
        AppError::BadRequest(INVALID_BODY.into())
    })
}

/// Parse a pickup point id taken from the path.
pub(crate) fn parse_pvz_id(raw: &str) -> AppResult<DbId> {
    raw.parse::<DbId>()
        .map_err(|_| AppError::BadRequest("invalid pvzId".into()))
}

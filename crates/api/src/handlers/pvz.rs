//! Handlers for pickup points and the per-pickup-point reception actions.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pvz_core::listing::{ListFilter, PickupPointSummary};
use pvz_core::pvz::{City, NewPickupPoint, PickupPoint};
use pvz_core::reception::Reception;
use pvz_core::types::{DbId, Timestamp};
use serde::Deserialize;

use super::{json_body, parse_pvz_id};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireEmployee, RequireModerator, RequireStaff};
use crate::state::AppState;

/// Request body for `POST /pvz`. The city stays a string so an unknown city
/// reports `invalid city` instead of a generic body error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePvzRequest {
    pub city: String,
    pub id: Option<DbId>,
    pub registration_date: Option<Timestamp>,
}

/// Query string for `GET /pvz`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPvzQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

/// POST /pvz
pub async fn create_pvz(
    RequireModerator(_user): RequireModerator,
    State(state): State<AppState>,
    payload: Result<Json<CreatePvzRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PickupPoint>)> {
    let input = json_body(payload)?;
    let city: City = input.city.parse()?;

    let pvz = state
        .stores
        .pickup_points
        .create_pickup_point(NewPickupPoint {
            city,
            id: input.id,
            registration_date: input.registration_date,
        })
        .await?;

    state.metrics.record_pvz_created();
    tracing::info!(pvz_id = %pvz.id, %city, "Pickup point created");

    Ok((StatusCode::CREATED, Json(pvz)))
}

/// GET /pvz
///
/// Pickup points newest first, each with all of its receptions and products.
pub async fn list_pvz(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    query: Result<Query<ListPvzQuery>, QueryRejection>,
) -> AppResult<Json<Vec<PickupPointSummary>>> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Query rejected");
        AppError::BadRequest("invalid query parameters".into())
    })?;

    let filter = ListFilter::new(query.page, query.limit, query.start_date, query.end_date)?;
    let summaries = state
        .stores
        .pickup_points
        .list_with_receptions(&filter)
        .await?;

    tracing::debug!(
        page = filter.page,
        limit = filter.limit,
        returned = summaries.len(),
        "Pickup points listed"
    );
    Ok(Json(summaries))
}

/// POST /pvz/{pvz_id}/close_last_reception
pub async fn close_last_reception(
    RequireEmployee(_user): RequireEmployee,
    State(state): State<AppState>,
    Path(pvz_id): Path<String>,
) -> AppResult<Json<Reception>> {
    let pvz_id = parse_pvz_id(&pvz_id)?;

    let reception = state
        .stores
        .receptions
        .close_active_reception(pvz_id)
        .await?;

    tracing::info!(%pvz_id, reception_id = %reception.id, "Reception closed");
    Ok(Json(reception))
}

/// POST /pvz/{pvz_id}/delete_last_product
///
/// Removes the most recently added product of the open reception. Answers
/// 200 with no body.
pub async fn delete_last_product(
    RequireEmployee(_user): RequireEmployee,
    State(state): State<AppState>,
    Path(pvz_id): Path<String>,
) -> AppResult<StatusCode> {
    let pvz_id = parse_pvz_id(&pvz_id)?;

    let product = state.stores.products.delete_last_product(pvz_id).await?;

    tracing::info!(%pvz_id, product_id = %product.id, "Last product deleted");
    Ok(StatusCode::OK)
}

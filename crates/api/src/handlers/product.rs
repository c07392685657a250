//! Handler for adding products to the open reception.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pvz_core::product::{Product, ProductType};
use pvz_core::types::DbId;
use serde::Deserialize;

use super::json_body;
use crate::error::AppResult;
use crate::middleware::rbac::RequireEmployee;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    #[serde(rename = "type")]
    pub product_type: String,
    pub pvz_id: DbId,
}

/// POST /products
pub async fn add_product(
    RequireEmployee(_user): RequireEmployee,
    State(state): State<AppState>,
    payload: Result<Json<AddProductRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let input = json_body(payload)?;
    let product_type: ProductType = input.product_type.parse()?;

    let product = state
        .stores
        .products
        .add_product(input.pvz_id, product_type)
        .await?;

    state.metrics.record_product_added();
    tracing::info!(
        pvz_id = %input.pvz_id,
        product_id = %product.id,
        product_type = product_type.as_str(),
        "Product added"
    );

    Ok((StatusCode::CREATED, Json(product)))
}

//! Route definitions for the `/pvz` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::pvz;
use crate::state::AppState;

/// ```text
/// POST /pvz                                  -> create_pvz
/// GET  /pvz                                  -> list_pvz
/// POST /pvz/{pvz_id}/close_last_reception    -> close_last_reception
/// POST /pvz/{pvz_id}/delete_last_product     -> delete_last_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pvz", post(pvz::create_pvz).get(pvz::list_pvz))
        .route(
            "/pvz/{pvz_id}/close_last_reception",
            post(pvz::close_last_reception),
        )
        .route(
            "/pvz/{pvz_id}/delete_last_product",
            post(pvz::delete_last_product),
        )
}

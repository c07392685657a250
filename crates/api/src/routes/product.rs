use axum::routing::post;
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// `POST /products -> add_product`
pub fn router() -> Router<AppState> {
    Router::new().route("/products", post(product::add_product))
}

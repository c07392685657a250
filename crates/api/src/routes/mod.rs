pub mod auth;
pub mod health;
pub mod metrics;
pub mod product;
pub mod pvz;
pub mod reception;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dummyLogin                                token for a role (public)
/// /register                                  create user (public)
/// /login                                     token for a user (public)
///
/// /pvz                                       create (moderator), list (staff)
/// /pvz/{pvz_id}/close_last_reception         close open reception (employee)
/// /pvz/{pvz_id}/delete_last_product          LIFO product removal (employee)
///
/// /receptions                                open reception (employee)
/// /products                                  add product (employee)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(pvz::router())
        .merge(reception::router())
        .merge(product::router())
}

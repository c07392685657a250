use axum::routing::post;
use axum::Router;

use crate::handlers::reception;
use crate::state::AppState;

/// `POST /receptions -> create_reception`
pub fn router() -> Router<AppState> {
    Router::new().route("/receptions", post(reception::create_reception))
}

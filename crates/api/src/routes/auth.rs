//! Route definitions for token issuance and registration.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// POST /dummyLogin  -> dummy_login
/// POST /register    -> register
/// POST /login       -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dummyLogin", post(auth::dummy_login))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

//! Handlers for token issuance and user registration.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pvz_core::error::CoreError;
use pvz_core::roles::Role;
use pvz_core::types::DbId;
use pvz_core::user::NewUser;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{json_body, INVALID_BODY};
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, validate_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DummyLoginRequest {
    pub role: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "invalid email"))]
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public view of a registered user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /dummyLogin
///
/// Issue a token for the requested role without checking credentials.
pub async fn dummy_login(
    State(state): State<AppState>,
    payload: Result<Json<DummyLoginRequest>, JsonRejection>,
) -> AppResult<Json<TokenResponse>> {
    let input = json_body(payload)?;
    let role: Role = input.role.parse()?;

    let token = generate_token(None, role, &state.config.jwt)?;
    tracing::debug!(%role, "Dummy token issued");

    Ok(Json(TokenResponse { token }))
}

/// POST /register
///
/// Create a user. An already-registered email answers 200 with no body.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<Response> {
    let input = json_body(payload)?;
    input
        .validate()
        .map_err(|_| CoreError::Validation("invalid email".into()))?;
    validate_password(&input.password).map_err(CoreError::Validation)?;
    let role: Role = input.role.parse()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let new_user = NewUser {
        email: input.email,
        password_hash,
        role,
    };

    match state.stores.users.create_user(new_user).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, %role, "User registered");
            let body = UserResponse {
                id: user.id,
                email: user.email,
                role: user.role,
            };
            Ok((StatusCode::CREATED, Json(body)).into_response())
        }
        Err(CoreError::UserAlreadyExists) => {
            tracing::info!("Registration for an existing email ignored");
            Ok(StatusCode::OK.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /login
///
/// Authenticate with email and password. Every failure is a 401.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<TokenResponse>> {
    let input = payload
        .map(|Json(body)| body)
        .map_err(|_| AppError::Unauthenticated(INVALID_BODY.into()))?;

    let user = state.stores.users.find_user_by_email(&input.email).await?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        return Err(CoreError::InvalidCredentials.into());
    }

    let token = generate_token(Some(user.id), user.role, &state.config.jwt)?;
    tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

    Ok(Json(TokenResponse { token }))
}

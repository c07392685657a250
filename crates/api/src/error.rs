use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pvz_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{"message", "code"}` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pvz_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Token signing failed.
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Credentials could not be checked (401). Used by `/login` only.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "internal error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", msg.clone()),
                CoreError::ReceptionConflict => (
                    StatusCode::BAD_REQUEST,
                    "RECEPTION_CONFLICT",
                    core.to_string(),
                ),
                CoreError::PickupPointNotFound => {
                    (StatusCode::BAD_REQUEST, "PVZ_NOT_FOUND", core.to_string())
                }
                CoreError::NoActiveReception => (
                    StatusCode::BAD_REQUEST,
                    "NO_ACTIVE_RECEPTION",
                    core.to_string(),
                ),
                CoreError::NoProducts => (StatusCode::BAD_REQUEST, "NO_PRODUCTS", core.to_string()),
                CoreError::UserAlreadyExists => {
                    (StatusCode::BAD_REQUEST, "USER_EXISTS", core.to_string())
                }
                CoreError::UserNotFound => {
                    (StatusCode::UNAUTHORIZED, "USER_NOT_FOUND", core.to_string())
                }
                CoreError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    core.to_string(),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::FORBIDDEN, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            AppError::Token(err) => {
                tracing::error!(error = %err, "Token signing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        if status.is_client_error() {
            tracing::warn!(status = status.as_u16(), code, %message, "Request rejected");
        }

        let body = json!({
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

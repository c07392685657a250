/// Domain error kinds shared by the store layer and the HTTP layer.
///
/// Store adapters translate backend failures into these variants; anything
/// they cannot classify becomes [`CoreError::Internal`].
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("existing open reception")]
    ReceptionConflict,

    #[error("pvz not found")]
    PickupPointNotFound,

    #[error("no active reception")]
    NoActiveReception,

    #[error("no products")]
    NoProducts,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid password")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

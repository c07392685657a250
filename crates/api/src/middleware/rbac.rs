//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects callers whose role is not in
//! its allowed set with 403 `required role: <roles>`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pvz_core::error::CoreError;
use pvz_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate and check the caller's role against `allowed`.
async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    allowed: &[Role],
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !allowed.contains(&user.role) {
        let roles = allowed
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "required role: {roles}"
        ))));
    }
    Ok(user)
}

/// Requires the `moderator` role.
///
/// ```ignore
/// async fn moderator_only(RequireModerator(user): RequireModerator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireModerator(pub AuthUser);

impl FromRequestParts<AppState> for RequireModerator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, &[Role::Moderator])
            .await
            .map(RequireModerator)
    }
}

/// Requires the `employee` role.
pub struct RequireEmployee(pub AuthUser);

impl FromRequestParts<AppState> for RequireEmployee {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, &[Role::Employee])
            .await
            .map(RequireEmployee)
    }
}

/// Requires `moderator` or `employee`, i.e. any staff member.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, &[Role::Moderator, Role::Employee])
            .await
            .map(RequireStaff)
    }
}

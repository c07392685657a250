//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireModerator`] -- Requires the `moderator` role.
//! - [`rbac::RequireEmployee`] -- Requires the `employee` role.
//! - [`rbac::RequireStaff`] -- Requires `moderator` or `employee`.

pub mod auth;
pub mod rbac;

//! Registered users.

use crate::roles::Role;
use crate::types::{DbId, Timestamp};

/// A stored user. Carries the password hash, so it is never serialized.
#[derive(Debug, Clone)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: Timestamp,
}

/// Input for creating a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

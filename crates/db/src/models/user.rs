//! `users` table row.

use pvz_core::error::CoreError;
use pvz_core::roles::Role;
use pvz_core::types::{DbId, Timestamp};
use pvz_core::user::User;
use sqlx::FromRow;

use super::decode_column;

/// Full user row. The `password` column holds the Argon2 PHC string.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: Timestamp,
}

impl TryFrom<UserRow> for User {
    type Error = CoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password,
            role: decode_column::<Role>("role", &row.role)?,
            created_at: row.created_at,
        })
    }
}

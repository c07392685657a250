//! Translation of `sqlx` failures into domain error kinds.

use pvz_core::error::CoreError;
use pvz_core::pvz::PVZ_ID_TAKEN;

/// Partial unique index allowing one `in_progress` reception per pickup point.
pub const UQ_RECEPTIONS_OPEN_PER_PVZ: &str = "uq_receptions_open_per_pvz";
pub const UQ_USERS_EMAIL: &str = "uq_users_email";
pub const PK_PVZ: &str = "pk_pvz";
pub const FK_RECEPTIONS_PVZ: &str = "fk_receptions_pvz";

/// PostgreSQL SQLSTATE for unique violations.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for foreign-key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Error from a multi-statement repository operation: either the database
/// failed or a domain precondition did not hold inside the transaction.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Domain(#[from] CoreError),
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Domain(core) => core,
            DbError::Sqlx(err) => classify_sqlx_error(err),
        }
    }
}

/// Map a `sqlx` error to a [`CoreError`].
///
/// Known constraint violations become their domain kinds; everything else is
/// [`CoreError::Internal`], carrying the raw text for logging only.
pub fn classify_sqlx_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or_default();
        match (db_err.code().as_deref(), constraint) {
            (Some(UNIQUE_VIOLATION), UQ_RECEPTIONS_OPEN_PER_PVZ) => {
                return CoreError::ReceptionConflict
            }
            (Some(UNIQUE_VIOLATION), UQ_USERS_EMAIL) => return CoreError::UserAlreadyExists,
            (Some(UNIQUE_VIOLATION), PK_PVZ) => return CoreError::Conflict(PVZ_ID_TAKEN.into()),
            (Some(FOREIGN_KEY_VIOLATION), FK_RECEPTIONS_PVZ) => {
                return CoreError::PickupPointNotFound
            }
            _ => {}
        }
    }
    CoreError::Internal(format!("database error: {err}"))
}

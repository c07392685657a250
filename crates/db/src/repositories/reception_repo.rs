//! Repository for the `receptions` table.

use pvz_core::reception::{STATUS_CLOSE, STATUS_IN_PROGRESS};
use pvz_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::reception::ReceptionRow;

const COLUMNS: &str = "id, pvz_id, status, created_at";

pub struct ReceptionRepo;

impl ReceptionRepo {
    /// Open a reception for a pickup point.
    ///
    /// A second open reception violates `uq_receptions_open_per_pvz`; an
    /// unknown pickup point violates `fk_receptions_pvz`.
    pub async fn create(pool: &PgPool, pvz_id: DbId) -> Result<ReceptionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO receptions (pvz_id, status)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReceptionRow>(&query)
            .bind(pvz_id)
            .bind(STATUS_IN_PROGRESS)
            .fetch_one(pool)
            .await
    }

    /// Close the open reception in a single conditional update.
    ///
    /// Returns `None` if nothing was open, including when a concurrent close
    /// got there first.
    pub async fn close_active(
        pool: &PgPool,
        pvz_id: DbId,
    ) -> Result<Option<ReceptionRow>, sqlx::Error> {
        let query = format!(
            "UPDATE receptions SET status = $3
             WHERE pvz_id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReceptionRow>(&query)
            .bind(pvz_id)
            .bind(STATUS_IN_PROGRESS)
            .bind(STATUS_CLOSE)
            .fetch_optional(pool)
            .await
    }

    /// Lock the open reception row for the rest of the caller's transaction.
    ///
    /// A concurrent close blocks on the lock until the transaction ends.
    pub async fn lock_active(
        conn: &mut PgConnection,
        pvz_id: DbId,
    ) -> Result<Option<ReceptionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM receptions
             WHERE pvz_id = $1 AND status = $2
             FOR UPDATE"
        );
        sqlx::query_as::<_, ReceptionRow>(&query)
            .bind(pvz_id)
            .bind(STATUS_IN_PROGRESS)
            .fetch_optional(conn)
            .await
    }
}

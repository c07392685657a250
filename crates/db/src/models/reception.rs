//! `receptions` table row.

use pvz_core::error::CoreError;
use pvz_core::reception::{Reception, ReceptionStatus};
use pvz_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::decode_column;

#[derive(Debug, Clone, FromRow)]
pub struct ReceptionRow {
    pub id: DbId,
    pub pvz_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
}

impl TryFrom<ReceptionRow> for Reception {
    type Error = CoreError;

    fn try_from(row: ReceptionRow) -> Result<Self, Self::Error> {
        Ok(Reception {
            id: row.id,
            date_time: row.created_at,
            pvz_id: row.pvz_id,
            status: decode_column::<ReceptionStatus>("status", &row.status)?,
        })
    }
}

//! `pvz` table row.

use pvz_core::error::CoreError;
use pvz_core::pvz::{City, PickupPoint};
use pvz_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::decode_column;

#[derive(Debug, Clone, FromRow)]
pub struct PvzRow {
    pub id: DbId,
    pub city: String,
    pub created_at: Timestamp,
}

impl TryFrom<PvzRow> for PickupPoint {
    type Error = CoreError;

    fn try_from(row: PvzRow) -> Result<Self, Self::Error> {
        Ok(PickupPoint {
            id: row.id,
            registration_date: row.created_at,
            city: decode_column::<City>("city", &row.city)?,
        })
    }
}

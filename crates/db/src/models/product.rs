//! `products` table row.

use pvz_core::error::CoreError;
use pvz_core::product::{Product, ProductType};
use pvz_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::decode_column;

/// Product row. `seq` breaks ties between products sharing a timestamp.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: DbId,
    pub seq: i64,
    pub reception_id: DbId,
    #[sqlx(rename = "type")]
    pub product_type: String,
    pub created_at: Timestamp,
}

impl TryFrom<ProductRow> for Product {
    type Error = CoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: row.id,
            date_time: row.created_at,
            product_type: decode_column::<ProductType>("type", &row.product_type)?,
            reception_id: row.reception_id,
        })
    }
}

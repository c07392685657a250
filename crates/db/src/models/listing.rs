//! Flat join rows for the pickup point listing and their regrouping.

use pvz_core::error::CoreError;
use pvz_core::listing::{PickupPointSummary, ReceptionSummary};
use pvz_core::pvz::{City, PickupPoint};
use pvz_core::product::{Product, ProductType};
use pvz_core::reception::{Reception, ReceptionStatus};
use pvz_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::decode_column;

/// One row of `pvz LEFT JOIN receptions LEFT JOIN products`.
///
/// Reception columns are `NULL` for a pickup point without receptions, and
/// product columns are `NULL` for a reception without products.
#[derive(Debug, Clone, FromRow)]
pub struct PvzReceptionRow {
    pub pvz_id: DbId,
    pub pvz_city: String,
    pub pvz_created_at: Timestamp,
    pub reception_id: Option<DbId>,
    pub reception_status: Option<String>,
    pub reception_created_at: Option<Timestamp>,
    pub product_id: Option<DbId>,
    pub product_type: Option<String>,
    pub product_created_at: Option<Timestamp>,
}

/// Regroup ordered join rows into nested summaries.
///
/// Rows must arrive grouped by pickup point and then by reception (the listing
/// query orders them that way); the order inside each level is preserved.
pub fn assemble_summaries(
    rows: Vec<PvzReceptionRow>,
) -> Result<Vec<PickupPointSummary>, CoreError> {
    let mut out: Vec<PickupPointSummary> = Vec::new();

    for row in rows {
        let starts_pvz = out.last().map_or(true, |s| s.pvz.id != row.pvz_id);
        if starts_pvz {
            out.push(PickupPointSummary {
                pvz: PickupPoint {
                    id: row.pvz_id,
                    registration_date: row.pvz_created_at,
                    city: decode_column::<City>("city", &row.pvz_city)?,
                },
                receptions: Vec::new(),
            });
        }
        let Some(summary) = out.last_mut() else {
            continue;
        };

        let (Some(reception_id), Some(status), Some(opened_at)) = (
            row.reception_id,
            row.reception_status.as_deref(),
            row.reception_created_at,
        ) else {
            continue;
        };

        let starts_reception = summary
            .receptions
            .last()
            .map_or(true, |r| r.reception.id != reception_id);
        if starts_reception {
            summary.receptions.push(ReceptionSummary {
                reception: Reception {
                    id: reception_id,
                    date_time: opened_at,
                    pvz_id: row.pvz_id,
                    status: decode_column::<ReceptionStatus>("status", status)?,
                },
                products: Vec::new(),
            });
        }
        let Some(reception) = summary.receptions.last_mut() else {
            continue;
        };

        if let (Some(product_id), Some(kind), Some(added_at)) = (
            row.product_id,
            row.product_type.as_deref(),
            row.product_created_at,
        ) {
            reception.products.push(Product {
                id: product_id,
                date_time: added_at,
                product_type: decode_column::<ProductType>("type", kind)?,
                reception_id,
            });
        }
    }

    Ok(out)
}

//! Repository for the `pvz` table and the nested listing query.

use pvz_core::listing::ListFilter;
use pvz_core::pvz::NewPickupPoint;
use sqlx::PgPool;

use crate::models::listing::PvzReceptionRow;
use crate::models::pvz::PvzRow;

const COLUMNS: &str = "id, city, created_at";

/// Pickup points are paged in the `page` CTE before the joins fan out, so a
/// page always holds `limit` pickup points no matter how many receptions and
/// products they carry.
const LIST_QUERY: &str = "\
    WITH page AS ( \
        SELECT p.id, p.city, p.created_at \
        FROM pvz p \
        WHERE ($3::timestamptz IS NULL AND $4::timestamptz IS NULL) \
           OR EXISTS ( \
                SELECT 1 FROM receptions r \
                WHERE r.pvz_id = p.id \
                  AND ($3::timestamptz IS NULL OR r.created_at >= $3) \
                  AND ($4::timestamptz IS NULL OR r.created_at <= $4) \
           ) \
        ORDER BY p.created_at DESC, p.id DESC \
        LIMIT $1 OFFSET $2 \
    ) \
    SELECT page.id AS pvz_id, \
           page.city AS pvz_city, \
           page.created_at AS pvz_created_at, \
           r.id AS reception_id, \
           r.status AS reception_status, \
           r.created_at AS reception_created_at, \
           pr.id AS product_id, \
           pr.type AS product_type, \
           pr.created_at AS product_created_at \
    FROM page \
    LEFT JOIN receptions r ON r.pvz_id = page.id \
    LEFT JOIN products pr ON pr.reception_id = r.id \
    ORDER BY page.created_at DESC, page.id DESC, \
             r.created_at DESC, r.id DESC, \
             pr.created_at DESC, pr.seq DESC";

pub struct PvzRepo;

impl PvzRepo {
    /// Insert a pickup point. A supplied id or registration date is stored
    /// verbatim; otherwise the database generates them.
    pub async fn create(pool: &PgPool, input: &NewPickupPoint) -> Result<PvzRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO pvz (id, city, created_at)
             VALUES (COALESCE($1, gen_random_uuid()), $2, COALESCE($3, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PvzRow>(&query)
            .bind(input.id)
            .bind(input.city.as_str())
            .bind(input.registration_date)
            .fetch_one(pool)
            .await
    }

    /// Flat join rows for one page of the listing, ordered for
    /// [`crate::models::listing::assemble_summaries`].
    pub async fn list_with_receptions(
        pool: &PgPool,
        filter: &ListFilter,
    ) -> Result<Vec<PvzReceptionRow>, sqlx::Error> {
        sqlx::query_as::<_, PvzReceptionRow>(LIST_QUERY)
            .bind(filter.limit)
            .bind(filter.offset())
            .bind(filter.start_date)
            .bind(filter.end_date)
            .fetch_all(pool)
            .await
    }
}

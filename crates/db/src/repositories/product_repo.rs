//! Repository for the `products` table.
//!
//! Both writes run in one transaction that first locks the pickup point's open
//! reception, so they serialize against each other and against a close.

use pvz_core::error::CoreError;
use pvz_core::product::ProductType;
use pvz_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::product::ProductRow;
use crate::repositories::ReceptionRepo;

const COLUMNS: &str = "id, seq, reception_id, type, created_at";

pub struct ProductRepo;

impl ProductRepo {
    /// Add a product to the open reception of `pvz_id`.
    ///
    /// The timestamp is `clock_timestamp()`, taken after the lock is held, so
    /// insertion order and timestamp order agree.
    pub async fn add(
        pool: &PgPool,
        pvz_id: DbId,
        product_type: ProductType,
    ) -> Result<ProductRow, DbError> {
        let mut tx = pool.begin().await?;

        let reception = ReceptionRepo::lock_active(&mut *tx, pvz_id)
            .await?
            .ok_or(CoreError::NoActiveReception)?;

        let query = format!(
            "INSERT INTO products (reception_id, type, created_at)
             VALUES ($1, $2, clock_timestamp())
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, ProductRow>(&query)
            .bind(reception.id)
            .bind(product_type.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(product)
    }

    /// Delete the newest product of the open reception of `pvz_id`.
    pub async fn delete_last(pool: &PgPool, pvz_id: DbId) -> Result<ProductRow, DbError> {
        let mut tx = pool.begin().await?;

        let reception = ReceptionRepo::lock_active(&mut *tx, pvz_id)
            .await?
            .ok_or(CoreError::NoActiveReception)?;

        let query = format!(
            "DELETE FROM products
             WHERE id = (
                 SELECT id FROM products
                 WHERE reception_id = $1
                 ORDER BY created_at DESC, seq DESC
                 LIMIT 1
             )
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, ProductRow>(&query)
            .bind(reception.id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NoProducts)?;

        tx.commit().await?;
        Ok(product)
    }
}

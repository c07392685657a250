//! PostgreSQL implementation of the `pvz-core` store traits.

use async_trait::async_trait;
use pvz_core::error::CoreError;
use pvz_core::listing::{ListFilter, PickupPointSummary};
use pvz_core::product::{Product, ProductType};
use pvz_core::pvz::{NewPickupPoint, PickupPoint};
use pvz_core::reception::Reception;
use pvz_core::store::{PickupPointStore, ProductStore, ReceptionStore, StoreHealth, UserStore};
use pvz_core::types::DbId;
use pvz_core::user::{NewUser, User};

use crate::error::classify_sqlx_error;
use crate::models::listing::assemble_summaries;
use crate::repositories::{ProductRepo, PvzRepo, ReceptionRepo, UserRepo};
use crate::DbPool;

/// Store backed by a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: NewUser) -> Result<User, CoreError> {
        UserRepo::create(&self.pool, &input)
            .await
            .map_err(classify_sqlx_error)?
            .try_into()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, CoreError> {
        UserRepo::find_by_email(&self.pool, email)
            .await
            .map_err(classify_sqlx_error)?
            .ok_or(CoreError::UserNotFound)?
            .try_into()
    }
}

#[async_trait]
impl PickupPointStore for PgStore {
    async fn create_pickup_point(&self, input: NewPickupPoint) -> Result<PickupPoint, CoreError> {
        PvzRepo::create(&self.pool, &input)
            .await
            .map_err(classify_sqlx_error)?
            .try_into()
    }

    async fn list_with_receptions(
        &self,
        filter: &ListFilter,
    ) -> Result<Vec<PickupPointSummary>, CoreError> {
        let rows = PvzRepo::list_with_receptions(&self.pool, filter)
            .await
            .map_err(classify_sqlx_error)?;
        assemble_summaries(rows)
    }
}

#[async_trait]
impl ReceptionStore for PgStore {
    async fn open_reception(&self, pvz_id: DbId) -> Result<Reception, CoreError> {
        ReceptionRepo::create(&self.pool, pvz_id)
            .await
            .map_err(classify_sqlx_error)?
            .try_into()
    }

    async fn close_active_reception(&self, pvz_id: DbId) -> Result<Reception, CoreError> {
        ReceptionRepo::close_active(&self.pool, pvz_id)
            .await
            .map_err(classify_sqlx_error)?
            .ok_or(CoreError::NoActiveReception)?
            .try_into()
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn add_product(
        &self,
        pvz_id: DbId,
        product_type: ProductType,
    ) -> Result<Product, CoreError> {
        ProductRepo::add(&self.pool, pvz_id, product_type)
            .await?
            .try_into()
    }

    async fn delete_last_product(&self, pvz_id: DbId) -> Result<Product, CoreError> {
        ProductRepo::delete_last(&self.pool, pvz_id)
            .await?
            .try_into()
    }
}

#[async_trait]
impl StoreHealth for PgStore {
    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }
}

//! Store traits the HTTP layer depends on.
//!
//! The PostgreSQL adapter lives in `pvz-db`; [`crate::memory::InMemoryStore`]
//! implements the same traits for tests. Implementations report failures as
//! [`CoreError`] kinds, never as backend-specific errors.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::listing::{ListFilter, PickupPointSummary};
use crate::product::{Product, ProductType};
use crate::pvz::{NewPickupPoint, PickupPoint};
use crate::reception::Reception;
use crate::types::DbId;
use crate::user::{NewUser, User};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`CoreError::UserAlreadyExists`] on a duplicate email.
    async fn create_user(&self, input: NewUser) -> Result<User, CoreError>;

    /// Fails with [`CoreError::UserNotFound`] when no user has `email`.
    async fn find_user_by_email(&self, email: &str) -> Result<User, CoreError>;
}

#[async_trait]
pub trait PickupPointStore: Send + Sync {
    async fn create_pickup_point(&self, input: NewPickupPoint) -> Result<PickupPoint, CoreError>;

    /// Newest-registered first, paginated over pickup points before the
    /// receptions and products are attached.
    async fn list_with_receptions(
        &self,
        filter: &ListFilter,
    ) -> Result<Vec<PickupPointSummary>, CoreError>;
}

#[async_trait]
pub trait ReceptionStore: Send + Sync {
    /// Fails with [`CoreError::ReceptionConflict`] if one is already open and
    /// [`CoreError::PickupPointNotFound`] if the pickup point does not exist.
    async fn open_reception(&self, pvz_id: DbId) -> Result<Reception, CoreError>;

    /// Fails with [`CoreError::NoActiveReception`] if nothing is open,
    /// including when a concurrent close won the race.
    async fn close_active_reception(&self, pvz_id: DbId) -> Result<Reception, CoreError>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn add_product(
        &self,
        pvz_id: DbId,
        product_type: ProductType,
    ) -> Result<Product, CoreError>;

    /// Removes the most recently added product of the open reception and
    /// returns it.
    async fn delete_last_product(&self, pvz_id: DbId) -> Result<Product, CoreError>;
}

#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), CoreError>;
}

/// The set of stores injected into the application state.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub pickup_points: Arc<dyn PickupPointStore>,
    pub receptions: Arc<dyn ReceptionStore>,
    pub products: Arc<dyn ProductStore>,
    pub health: Arc<dyn StoreHealth>,
}

impl Stores {
    /// Use one backend for every store.
    pub fn from_backend<S>(backend: Arc<S>) -> Self
    where
        S: UserStore + PickupPointStore + ReceptionStore + ProductStore + StoreHealth + 'static,
    {
        Self {
            users: backend.clone(),
            pickup_points: backend.clone(),
            receptions: backend.clone(),
            products: backend.clone(),
            health: backend,
        }
    }
}

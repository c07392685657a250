//! In-process implementation of every store trait.
//!
//! All state sits behind one mutex, so each operation is trivially atomic and
//! the reception/product invariants hold under concurrent callers exactly as
//! they do with the row locks of the PostgreSQL adapter.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::CoreError;
use crate::listing::{ListFilter, PickupPointSummary, ReceptionSummary};
use crate::product::{Product, ProductType};
use crate::pvz::{NewPickupPoint, PickupPoint, PVZ_ID_TAKEN};
use crate::reception::{Reception, ReceptionStatus};
use crate::store::{PickupPointStore, ProductStore, ReceptionStore, StoreHealth, UserStore};
use crate::types::DbId;
use crate::user::{NewUser, User};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    pickup_points: Vec<PickupPoint>,
    /// Insertion order doubles as the creation sequence.
    receptions: Vec<Reception>,
    /// `(sequence, product)`; sequence breaks `date_time` ties.
    products: Vec<(u64, Product)>,
    next_seq: u64,
}

impl State {
    fn open_reception_index(&self, pvz_id: DbId) -> Option<usize> {
        self.receptions
            .iter()
            .position(|r| r.pvz_id == pvz_id && r.status.is_open())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, CoreError> {
        self.state
            .lock()
            .map_err(|_| CoreError::Internal("in-memory store lock poisoned".into()))
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<User, CoreError> {
        let mut state = self.lock()?;
        if state.users.iter().any(|u| u.email == input.email) {
            return Err(CoreError::UserAlreadyExists);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: input.email,
            password_hash: input.password_hash,
            role: input.role,
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, CoreError> {
        let state = self.lock()?;
        state
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(CoreError::UserNotFound)
    }
}

#[async_trait]
impl PickupPointStore for InMemoryStore {
    async fn create_pickup_point(&self, input: NewPickupPoint) -> Result<PickupPoint, CoreError> {
        let mut state = self.lock()?;
        let id = input.id.unwrap_or_else(Uuid::new_v4);
        if state.pickup_points.iter().any(|p| p.id == id) {
            return Err(CoreError::Conflict(PVZ_ID_TAKEN.into()));
        }
        let pvz = PickupPoint {
            id,
            registration_date: input.registration_date.unwrap_or_else(Utc::now),
            city: input.city,
        };
        state.pickup_points.push(pvz.clone());
        Ok(pvz)
    }

    async fn list_with_receptions(
        &self,
        filter: &ListFilter,
    ) -> Result<Vec<PickupPointSummary>, CoreError> {
        let state = self.lock()?;

        let mut points: Vec<&PickupPoint> = state
            .pickup_points
            .iter()
            .filter(|p| {
                !filter.has_date_range()
                    || state
                        .receptions
                        .iter()
                        .any(|r| r.pvz_id == p.id && filter.covers(r.date_time))
            })
            .collect();
        points.sort_by(|a, b| {
            b.registration_date
                .cmp(&a.registration_date)
                .then_with(|| b.id.cmp(&a.id))
        });

        let page = points
            .into_iter()
            .skip(usize::try_from(filter.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(filter.limit).unwrap_or(0));

        let summaries = page
            .map(|pvz| {
                let mut receptions: Vec<(usize, &Reception)> = state
                    .receptions
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.pvz_id == pvz.id)
                    .collect();
                receptions.sort_by(|(ia, a), (ib, b)| {
                    b.date_time.cmp(&a.date_time).then_with(|| ib.cmp(ia))
                });

                let receptions = receptions
                    .into_iter()
                    .map(|(_, reception)| {
                        let mut products: Vec<&(u64, Product)> = state
                            .products
                            .iter()
                            .filter(|(_, p)| p.reception_id == reception.id)
                            .collect();
                        products.sort_by(|(sa, a), (sb, b)| {
                            b.date_time.cmp(&a.date_time).then_with(|| sb.cmp(sa))
                        });
                        ReceptionSummary {
                            reception: reception.clone(),
                            products: products.into_iter().map(|(_, p)| p.clone()).collect(),
                        }
                    })
                    .collect();

                PickupPointSummary {
                    pvz: pvz.clone(),
                    receptions,
                }
            })
            .collect();

        Ok(summaries)
    }
}

#[async_trait]
impl ReceptionStore for InMemoryStore {
    async fn open_reception(&self, pvz_id: DbId) -> Result<Reception, CoreError> {
        let mut state = self.lock()?;
        if !state.pickup_points.iter().any(|p| p.id == pvz_id) {
            return Err(CoreError::PickupPointNotFound);
        }
        if state.open_reception_index(pvz_id).is_some() {
            return Err(CoreError::ReceptionConflict);
        }
        let reception = Reception {
            id: Uuid::new_v4(),
            date_time: Utc::now(),
            pvz_id,
            status: ReceptionStatus::InProgress,
        };
        state.receptions.push(reception.clone());
        Ok(reception)
    }

    async fn close_active_reception(&self, pvz_id: DbId) -> Result<Reception, CoreError> {
        let mut state = self.lock()?;
        let idx = state
            .open_reception_index(pvz_id)
            .ok_or(CoreError::NoActiveReception)?;
        let reception = &mut state.receptions[idx];
        reception.status = ReceptionStatus::Close;
        Ok(reception.clone())
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn add_product(
        &self,
        pvz_id: DbId,
        product_type: ProductType,
    ) -> Result<Product, CoreError> {
        let mut state = self.lock()?;
        let idx = state
            .open_reception_index(pvz_id)
            .ok_or(CoreError::NoActiveReception)?;
        let product = Product {
            id: Uuid::new_v4(),
            date_time: Utc::now(),
            product_type,
            reception_id: state.receptions[idx].id,
        };
        let seq = state.next_seq;
        state.next_seq += 1;
        state.products.push((seq, product.clone()));
        Ok(product)
    }

    async fn delete_last_product(&self, pvz_id: DbId) -> Result<Product, CoreError> {
        let mut state = self.lock()?;
        let idx = state
            .open_reception_index(pvz_id)
            .ok_or(CoreError::NoActiveReception)?;
        let reception_id = state.receptions[idx].id;

        let last = state
            .products
            .iter()
            .enumerate()
            .filter(|(_, (_, p))| p.reception_id == reception_id)
            .max_by(|(_, (sa, a)), (_, (sb, b))| {
                a.date_time.cmp(&b.date_time).then_with(|| sa.cmp(sb))
            })
            .map(|(pos, _)| pos)
            .ok_or(CoreError::NoProducts)?;

        let (_, product) = state.products.remove(last);
        Ok(product)
    }
}

#[async_trait]
impl StoreHealth for InMemoryStore {
    async fn ping(&self) -> Result<(), CoreError> {
        self.lock().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use chrono::Duration;

    use super::*;
    use crate::pvz::City;

    async fn store_with_pvz() -> (InMemoryStore, DbId) {
        let store = InMemoryStore::new();
        let pvz = store
            .create_pickup_point(NewPickupPoint::in_city(City::Moscow))
            .await
            .unwrap();
        (store, pvz.id)
    }

    #[tokio::test]
    async fn open_requires_existing_pickup_point() {
        let store = InMemoryStore::new();
        let result = store.open_reception(Uuid::new_v4()).await;
        assert_matches!(result, Err(CoreError::PickupPointNotFound));
    }

    #[tokio::test]
    async fn second_open_conflicts_until_closed() {
        let (store, pvz_id) = store_with_pvz().await;
        store.open_reception(pvz_id).await.unwrap();
        assert_matches!(
            store.open_reception(pvz_id).await,
            Err(CoreError::ReceptionConflict)
        );

        let closed = store.close_active_reception(pvz_id).await.unwrap();
        assert_eq!(closed.status, ReceptionStatus::Close);

        let reopened = store.open_reception(pvz_id).await.unwrap();
        assert_eq!(reopened.status, ReceptionStatus::InProgress);
        assert_ne!(reopened.id, closed.id);
    }

    #[tokio::test]
    async fn concurrent_opens_admit_exactly_one() {
        let (store, pvz_id) = store_with_pvz().await;
        let store = Arc::new(store);

        let attempts = (0..16).map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.open_reception(pvz_id).await })
        });
        let results = futures::future::join_all(attempts).await;

        let ok = results.iter().filter(|r| matches!(r, Ok(Ok(_)))).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Ok(Err(CoreError::ReceptionConflict))))
            .count();
        assert_eq!(ok, 1);
        assert_eq!(conflicts, 15);
    }

    #[tokio::test]
    async fn close_twice_reports_no_active_reception() {
        let (store, pvz_id) = store_with_pvz().await;
        store.open_reception(pvz_id).await.unwrap();
        store.close_active_reception(pvz_id).await.unwrap();
        assert_matches!(
            store.close_active_reception(pvz_id).await,
            Err(CoreError::NoActiveReception)
        );
    }

    #[tokio::test]
    async fn add_product_needs_open_reception() {
        let (store, pvz_id) = store_with_pvz().await;
        assert_matches!(
            store.add_product(pvz_id, ProductType::Shoes).await,
            Err(CoreError::NoActiveReception)
        );

        let reception = store.open_reception(pvz_id).await.unwrap();
        let product = store.add_product(pvz_id, ProductType::Shoes).await.unwrap();
        assert_eq!(product.reception_id, reception.id);

        store.close_active_reception(pvz_id).await.unwrap();
        assert_matches!(
            store.add_product(pvz_id, ProductType::Shoes).await,
            Err(CoreError::NoActiveReception)
        );
    }

    #[tokio::test]
    async fn delete_drains_in_reverse_insertion_order() {
        let (store, pvz_id) = store_with_pvz().await;
        store.open_reception(pvz_id).await.unwrap();

        let mut added = Vec::new();
        for t in [
            ProductType::Electronics,
            ProductType::Clothes,
            ProductType::Shoes,
            ProductType::Electronics,
        ] {
            added.push(store.add_product(pvz_id, t).await.unwrap().id);
        }

        let mut removed = Vec::new();
        while let Ok(product) = store.delete_last_product(pvz_id).await {
            removed.push(product.id);
        }
        added.reverse();
        assert_eq!(removed, added);

        assert_matches!(
            store.delete_last_product(pvz_id).await,
            Err(CoreError::NoProducts)
        );
    }

    #[tokio::test]
    async fn delete_without_reception_is_no_active_reception() {
        let (store, pvz_id) = store_with_pvz().await;
        assert_matches!(
            store.delete_last_product(pvz_id).await,
            Err(CoreError::NoActiveReception)
        );
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = InMemoryStore::new();
        let input = NewUser {
            email: "a@b.c".into(),
            password_hash: "hash".into(),
            role: crate::roles::Role::Employee,
        };
        store.create_user(input.clone()).await.unwrap();
        assert_matches!(
            store.create_user(input).await,
            Err(CoreError::UserAlreadyExists)
        );
        assert_matches!(
            store.find_user_by_email("nobody@b.c").await,
            Err(CoreError::UserNotFound)
        );
    }

    #[tokio::test]
    async fn duplicate_pvz_id_conflicts() {
        let store = InMemoryStore::new();
        let input = NewPickupPoint {
            city: City::Moscow,
            id: Some(Uuid::new_v4()),
            registration_date: None,
        };
        store.create_pickup_point(input.clone()).await.unwrap();
        assert_matches!(
            store.create_pickup_point(input).await,
            Err(CoreError::Conflict(msg)) if msg == PVZ_ID_TAKEN
        );
    }

    #[tokio::test]
    async fn listing_pages_pickup_points_newest_first() {
        let store = InMemoryStore::new();
        let base = Utc::now() - Duration::days(30);
        for day in 0..5 {
            store
                .create_pickup_point(NewPickupPoint {
                    city: City::Kazan,
                    id: None,
                    registration_date: Some(base + Duration::days(day)),
                })
                .await
                .unwrap();
        }

        let filter = ListFilter::new(Some(2), Some(2), None, None).unwrap();
        let page = store.list_with_receptions(&filter).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].pvz.registration_date, base + Duration::days(2));
        assert_eq!(page[1].pvz.registration_date, base + Duration::days(1));
    }

    /// A reception in range selects the point; its older receptions still
    /// come back with it.
    #[tokio::test]
    async fn date_filter_selects_points_but_keeps_all_receptions() {
        let (store, pvz_id) = store_with_pvz().await;
        store
            .create_pickup_point(NewPickupPoint::in_city(City::Kazan))
            .await
            .unwrap();

        let first = store.open_reception(pvz_id).await.unwrap();
        store.close_active_reception(pvz_id).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.open_reception(pvz_id).await.unwrap();

        let start = first.date_time + Duration::microseconds(1);
        assert!(second.date_time >= start);

        let filter = ListFilter::new(None, None, Some(start), None).unwrap();
        let page = store.list_with_receptions(&filter).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].pvz.id, pvz_id);

        let ids: Vec<DbId> = page[0].receptions.iter().map(|r| r.reception.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert!(!filter.covers(page[0].receptions[1].reception.date_time));

        let future = ListFilter::new(None, None, Some(Utc::now() + Duration::days(1)), None)
            .unwrap();
        assert!(store.list_with_receptions(&future).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let (store, _) = store_with_pvz().await;
        let filter = ListFilter::new(Some(i64::MAX), Some(10), None, None).unwrap();
        assert!(store.list_with_receptions(&filter).await.unwrap().is_empty());
    }

    // -----------------------------------------------------------------------
    // Races
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn concurrent_closes_admit_exactly_one() {
        let (store, pvz_id) = store_with_pvz().await;
        let store = Arc::new(store);
        store.open_reception(pvz_id).await.unwrap();

        let attempts = (0..8).map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.close_active_reception(pvz_id).await })
        });
        let results = futures::future::join_all(attempts).await;

        let closed = results.iter().filter(|r| matches!(r, Ok(Ok(_)))).count();
        let missing = results
            .iter()
            .filter(|r| matches!(r, Ok(Err(CoreError::NoActiveReception))))
            .count();
        assert_eq!(closed, 1);
        assert_eq!(missing, 7);
    }

    /// Adds racing a close either land before it or fail; none attach to
    /// the closed reception afterwards.
    #[tokio::test]
    async fn adds_racing_close_never_outlive_it() {
        let (store, pvz_id) = store_with_pvz().await;
        let store = Arc::new(store);
        let reception = store.open_reception(pvz_id).await.unwrap();

        let adds = (0..16).map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.add_product(pvz_id, ProductType::Clothes).await })
        });
        let close = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.close_active_reception(pvz_id).await })
        };
        let (added, closed) = futures::join!(futures::future::join_all(adds), close);
        closed.unwrap().unwrap();

        let accepted = added.iter().filter(|r| matches!(r, Ok(Ok(_)))).count();
        let rejected = added
            .iter()
            .filter(|r| matches!(r, Ok(Err(CoreError::NoActiveReception))))
            .count();
        assert_eq!(accepted + rejected, 16);

        let listed = store
            .list_with_receptions(&ListFilter::default())
            .await
            .unwrap();
        assert_eq!(listed[0].receptions[0].reception.id, reception.id);
        assert_eq!(listed[0].receptions[0].products.len(), accepted);
    }

    #[tokio::test]
    async fn concurrent_deletes_remove_each_product_once() {
        let (store, pvz_id) = store_with_pvz().await;
        let store = Arc::new(store);
        store.open_reception(pvz_id).await.unwrap();

        let mut added = Vec::new();
        for _ in 0..6 {
            added.push(store.add_product(pvz_id, ProductType::Shoes).await.unwrap().id);
        }

        let deletes = (0..8).map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.delete_last_product(pvz_id).await })
        });
        let results = futures::future::join_all(deletes).await;

        let mut removed: Vec<DbId> = results
            .iter()
            .filter_map(|r| match r {
                Ok(Ok(product)) => Some(product.id),
                _ => None,
            })
            .collect();
        let empty = results
            .iter()
            .filter(|r| matches!(r, Ok(Err(CoreError::NoProducts))))
            .count();
        assert_eq!(removed.len(), 6);
        assert_eq!(empty, 2);

        removed.sort();
        added.sort();
        assert_eq!(removed, added);
    }
}

//! Catalog loading for the order wizard
//!
//! Products, stores and users are fetched concurrently and exposed only as a
//! whole: one failed fetch fails the load.

use std::fmt;
use std::future::Future;

use thiserror::Error;
use tracing::{debug, info};

use crate::backend::{Backend, BackendError};
use crate::domain::adapter::{adapt_all, SchemaError};
use crate::{Product, ProductId, Store, StoreId, User, UserId};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub stores: Vec<Store>,
    pub users: Vec<User>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    Products,
    Stores,
    Users,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Products => "products",
            Self::Stores => "stores",
            Self::Users => "users",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to fetch {collection}: {source}")]
    Fetch {
        collection: Collection,
        #[source]
        source: BackendError,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl LoadError {
    pub fn collection(&self) -> Option<Collection> {
        match self {
            Self::Fetch { collection, .. } => Some(*collection),
            Self::Schema(_) => None,
        }
    }
}

/// Runs three independent fetches concurrently and yields all three results
/// or the first error. The others are dropped when one fails.
pub async fn join_all_or_fail<A, B, C, E>(
    a: impl Future<Output = Result<A, E>>,
    b: impl Future<Output = Result<B, E>>,
    c: impl Future<Output = Result<C, E>>,
) -> Result<(A, B, C), E> {
    tokio::try_join!(a, b, c)
}

async fn tagged<T>(
    collection: Collection,
    fetch: impl Future<Output = Result<T, BackendError>>,
) -> Result<T, LoadError> {
    fetch.await.map_err(|source| LoadError::Fetch { collection, source })
}

impl Catalog {
    pub async fn load(backend: &dyn Backend) -> Result<Self, LoadError> {
        debug!("loading catalog");
        let (products, stores, users) = join_all_or_fail(
            tagged(Collection::Products, backend.list_products()),
            tagged(Collection::Stores, backend.list_stores()),
            tagged(Collection::Users, backend.list_users()),
        )
        .await?;

        let catalog = Catalog {
            products,
            stores: adapt_all(&stores)?,
            users: adapt_all(&users)?,
        };
        info!(
            products = catalog.products.len(),
            stores = catalog.stores.len(),
            users = catalog.users.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.stores.is_empty() && self.users.is_empty()
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn store(&self, id: StoreId) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == id)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{InMemoryBackend, Operation};
    use crate::Money;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn seeded() -> InMemoryBackend {
        InMemoryBackend::new()
            .with_products(vec![Product {
                id: ProductId::new(1),
                name: "Widget".into(),
                price: Money::new(Decimal::new(1000, 2)),
            }])
            .with_stores(vec![json!({"store_id": 7, "store_location": "Harbour"})])
            .with_users(vec![json!({"id": 3, "username": "ops"})])
    }

    #[tokio::test]
    async fn test_load_adapts_all_collections() {
        let catalog = Catalog::load(&seeded()).await.unwrap();
        assert_eq!(catalog.products.len(), 1);
        assert_eq!(catalog.store(StoreId::new(7)).unwrap().label, "Harbour");
        assert_eq!(catalog.user(UserId::new(3)).unwrap().label, "ops");
    }

    #[tokio::test]
    async fn test_store_fetch_failure_fails_whole_load() {
        let backend = seeded();
        backend.fail(Operation::ListStores);

        let err = Catalog::load(&backend).await.unwrap_err();
        assert_eq!(err.collection(), Some(Collection::Stores));
        assert!(err.to_string().starts_with("Failed to fetch stores"));
    }

    #[tokio::test]
    async fn test_record_without_id_fails_load() {
        let backend = seeded().with_users(vec![json!({"username": "nobody"})]);
        assert!(matches!(Catalog::load(&backend).await, Err(LoadError::Schema(_))));
    }

    #[tokio::test]
    async fn test_join_returns_first_error() {
        let ok = async { Ok::<_, &str>(1) };
        let bad = async { Err::<u8, _>("boom") };
        let also_ok = async { Ok::<_, &str>("c") };
        assert_eq!(join_all_or_fail(ok, bad, also_ok).await, Err("boom"));

        let all = join_all_or_fail(async { Ok::<_, ()>(1) }, async { Ok(2) }, async { Ok(3) }).await;
        assert_eq!(all, Ok((1, 2, 3)));
    }
}

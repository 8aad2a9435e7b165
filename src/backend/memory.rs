//! In-memory implementation of Backend for tests and local runs

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use super::{Backend, BackendError, StoreInput};
use crate::domain::adapter::adapt;
use crate::domain::aggregates::CreateOrderRequest;
use crate::{Order, OrderId, OrderStatus, Product, Store, StoreId, UserId};

/// Every call the backend can receive, for failure injection and call counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    ListProducts,
    ListStores,
    ListUsers,
    ListOrders,
    CreateOrder,
    DeleteOrder,
    CreateStore,
    UpdateStore,
    DeleteStore,
}

#[derive(Default)]
struct State {
    products: Vec<Product>,
    stores: Vec<Value>,
    users: Vec<Value>,
    orders: Vec<Order>,
    failing: HashSet<Operation>,
    calls: HashMap<Operation, usize>,
}

impl State {
    fn record(&mut self, op: Operation) -> Result<(), BackendError> {
        *self.calls.entry(op).or_default() += 1;
        if self.failing.contains(&op) {
            return Err(BackendError::Transport(format!("injected failure for {op:?}")));
        }
        Ok(())
    }

    fn store_position(&self, id: StoreId) -> Option<usize> {
        self.stores
            .iter()
            .position(|raw| adapt::<Store>(raw).is_ok_and(|s| s.id == id))
    }
}

fn not_found(what: &str) -> BackendError {
    BackendError::Status { status: 404, message: format!("{what} not found") }
}

/// Shares state across clones, so a test can keep a handle while the
/// workflow owns another.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<RwLock<State>>,
}

impl InMemoryBackend {
    pub fn new() -> Self { Self::default() }

    fn guard(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, BackendError> {
        self.state
            .write()
            .map_err(|e| BackendError::Transport(format!("Failed to acquire write lock: {e}")))
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.guard().products = products;
        self
    }

    pub fn with_stores(self, stores: Vec<Value>) -> Self {
        self.guard().stores = stores;
        self
    }

    pub fn with_users(self, users: Vec<Value>) -> Self {
        self.guard().users = users;
        self
    }

    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        self.guard().orders = orders;
        self
    }

    /// Makes every later call to `op` fail with a transport error.
    pub fn fail(&self, op: Operation) {
        self.guard().failing.insert(op);
    }

    pub fn recover(&self, op: Operation) {
        self.guard().failing.remove(&op);
    }

    pub fn calls(&self, op: Operation) -> usize {
        self.guard().calls.get(&op).copied().unwrap_or(0)
    }

    pub fn orders(&self) -> Vec<Order> {
        self.guard().orders.clone()
    }

    pub fn stores(&self) -> Vec<Value> {
        self.guard().stores.clone()
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        let mut state = self.write()?;
        state.record(Operation::ListProducts)?;
        Ok(state.products.clone())
    }

    async fn list_stores(&self) -> Result<Vec<Value>, BackendError> {
        let mut state = self.write()?;
        state.record(Operation::ListStores)?;
        Ok(state.stores.clone())
    }

    async fn list_users(&self) -> Result<Vec<Value>, BackendError> {
        let mut state = self.write()?;
        state.record(Operation::ListUsers)?;
        Ok(state.users.clone())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, BackendError> {
        let mut state = self.write()?;
        state.record(Operation::ListOrders)?;
        Ok(state.orders.clone())
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, BackendError> {
        let mut state = self.write()?;
        state.record(Operation::CreateOrder)?;

        let next_id = state.orders.iter().map(|o| o.id.value()).max().unwrap_or(0) + 1;
        let order = Order {
            id: OrderId::new(next_id),
            items: request.items.clone(),
            store_id: StoreId::new(request.store_id),
            user_id: UserId::new(request.user_id),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        state.orders.push(order.clone());
        Ok(order)
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), BackendError> {
        let mut state = self.write()?;
        state.record(Operation::DeleteOrder)?;

        let before = state.orders.len();
        state.orders.retain(|o| o.id != id);
        if state.orders.len() == before {
            return Err(not_found("Order"));
        }
        Ok(())
    }

    async fn create_store(&self, input: &StoreInput) -> Result<(), BackendError> {
        let input = input.checked()?;
        let mut state = self.write()?;
        state.record(Operation::CreateStore)?;

        if state.store_position(StoreId::new(input.store_id)).is_some() {
            return Err(BackendError::Status {
                status: 400,
                message: format!("Store {} already exists", input.store_id),
            });
        }
        state.stores.push(json!({"store_id": input.store_id, "store_location": input.store_location}));
        Ok(())
    }

    async fn update_store(&self, id: StoreId, input: &StoreInput) -> Result<(), BackendError> {
        let input = input.checked()?;
        let mut state = self.write()?;
        state.record(Operation::UpdateStore)?;

        let index = state.store_position(id).ok_or_else(|| not_found("Store"))?;
        state.stores[index] = json!({"store_id": id.value(), "store_location": input.store_location});
        Ok(())
    }

    async fn delete_store(&self, id: StoreId) -> Result<(), BackendError> {
        let mut state = self.write()?;
        state.record(Operation::DeleteStore)?;

        let index = state.store_position(id).ok_or_else(|| not_found("Store"))?;
        state.stores.remove(index);
        Ok(())
    }
}

//! Data-access port
//!
//! The panel never talks to the network directly. Everything it reads or
//! writes goes through [`Backend`], which has a REST implementation for real
//! deployments and an in-memory one for tests and local runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::Validate;

use crate::domain::aggregates::CreateOrderRequest;
use crate::{Order, OrderId, Product, StoreId};

pub mod http;
pub mod memory;

pub use http::HttpBackend;
pub use memory::{InMemoryBackend, Operation};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Store fields accepted by the store maintenance calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct StoreInput {
    #[validate(range(min = 1))]
    pub store_id: i64,
    #[validate(length(min = 1))]
    pub store_location: String,
}

impl StoreInput {
    pub fn checked(&self) -> Result<&Self, BackendError> {
        self.validate().map_err(|e| BackendError::InvalidRequest(e.to_string()))?;
        Ok(self)
    }
}

/// Store and user listings are returned raw; see [`crate::domain::adapter`].
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, BackendError>;
    async fn list_stores(&self) -> Result<Vec<Value>, BackendError>;
    async fn list_users(&self) -> Result<Vec<Value>, BackendError>;
    async fn list_orders(&self) -> Result<Vec<Order>, BackendError>;

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, BackendError>;
    async fn delete_order(&self, id: OrderId) -> Result<(), BackendError>;

    async fn create_store(&self, input: &StoreInput) -> Result<(), BackendError>;
    async fn update_store(&self, id: StoreId, input: &StoreInput) -> Result<(), BackendError>;
    async fn delete_store(&self, id: StoreId) -> Result<(), BackendError>;
}

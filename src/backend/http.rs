//! REST implementation of Backend

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{Backend, BackendError, StoreInput};
use crate::domain::aggregates::CreateOrderRequest;
use crate::{Order, OrderId, Product, StoreId};

const PRODUCTS: &str = "products/";
const STORES: &str = "stores/";
const USERS: &str = "users/";
const ORDERS: &str = "orders/";

#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// `base` is the API root, e.g. `http://localhost:8000/api`.
    pub fn new(base: Url) -> Result<Self, BackendError> {
        let client = Client::builder()
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, base))
    }

    pub fn with_client(client: Client, mut base: Url) -> Self {
        // Url::join drops the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { client, base }
    }

    pub fn base(&self) -> &Url { &self.base }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base.join(path).map_err(|e| BackendError::InvalidRequest(e.to_string()))
    }

    fn item(&self, collection: &str, id: i64) -> Result<Url, BackendError> {
        self.endpoint(&format!("{collection}{id}/"))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await.map_err(transport)?;
        decode(check(response).await?).await
    }

    async fn delete(&self, url: Url) -> Result<(), BackendError> {
        debug!(%url, "DELETE");
        let response = self.client.delete(url).send().await.map_err(transport)?;
        check(response).await.map(|_| ())
    }
}

fn transport(e: reqwest::Error) -> BackendError {
    BackendError::Transport(e.to_string())
}

async fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(BackendError::Status { status: status.as_u16(), message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    response.json::<T>().await.map_err(|e| BackendError::Decode(e.to_string()))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        self.get_json(PRODUCTS).await
    }

    async fn list_stores(&self) -> Result<Vec<Value>, BackendError> {
        self.get_json(STORES).await
    }

    async fn list_users(&self) -> Result<Vec<Value>, BackendError> {
        self.get_json(USERS).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, BackendError> {
        self.get_json(ORDERS).await
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, BackendError> {
        let url = self.endpoint(ORDERS)?;
        debug!(%url, lines = request.items.len(), "POST");
        let response = self.client.post(url).json(request).send().await.map_err(transport)?;
        decode(check(response).await?).await
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), BackendError> {
        self.delete(self.item(ORDERS, id.value())?).await
    }

    async fn create_store(&self, input: &StoreInput) -> Result<(), BackendError> {
        let url = self.endpoint(STORES)?;
        let response = self.client.post(url).json(input.checked()?).send().await.map_err(transport)?;
        check(response).await.map(|_| ())
    }

    async fn update_store(&self, id: StoreId, input: &StoreInput) -> Result<(), BackendError> {
        let url = self.item(STORES, id.value())?;
        let response = self.client.put(url).json(input.checked()?).send().await.map_err(transport)?;
        check(response).await.map(|_| ())
    }

    async fn delete_store(&self, id: StoreId) -> Result<(), BackendError> {
        self.delete(self.item(STORES, id.value())?).await
    }
}

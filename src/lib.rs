//! OpenSASE Admin Panel
//!
//! Back-office core for a small retail domain (products, stores, users, orders).
//!
//! ## Features
//! - Order composition wizard: cart, running total, validated submission
//! - Order list with confirmed deletion
//! - Normalization of store/user records with inconsistent id fields
//! - REST and in-memory data-access backends

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub mod backend;
pub mod config;
pub mod domain;
pub mod workflow;

pub use backend::{Backend, BackendError};
pub use domain::adapter::SchemaError;
pub use domain::aggregates::ValidationError;
pub use domain::value_objects::{Money, OrderId, ProductId, Quantity, StoreId, UserId};
pub use workflow::catalog::LoadError;

// =============================================================================
// Core Types
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
}

/// Canonical store record, produced by the entity adapter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub label: String,
}

/// Canonical user record, produced by the entity adapter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default, deserialize_with = "lenient_lines")]
    pub items: Vec<OrderLine>,
    pub store_id: StoreId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: ProductId,
    pub quantity: Quantity,
}

/// Reads order lines as the order service reports them: `null` is an empty
/// list and lines without a positive quantity are dropped.
fn lenient_lines<'de, D>(deserializer: D) -> std::result::Result<Vec<OrderLine>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct WireLine {
        product: ProductId,
        quantity: i64,
    }

    let lines = Option::<Vec<WireLine>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(lines
        .into_iter()
        .filter_map(|line| {
            let quantity = u32::try_from(line.quantity).ok().and_then(Quantity::new)?;
            Some(OrderLine { product: line.product, quantity })
        })
        .collect())
}

/// Order status as reported by the order service. Unknown values are kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Other(String),
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PENDING" => Self::Pending,
            "COMPLETED" => Self::Completed,
            _ => Self::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => "PENDING".to_string(),
            OrderStatus::Completed => "COMPLETED".to_string(),
            OrderStatus::Other(value) => value,
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Catalog load failed: {0}")]
    Load(#[from] LoadError),

    #[error("Invalid order: {0}")]
    Validation(#[from] ValidationError),

    #[error("Order submission failed: {0}")]
    Submission(#[source] BackendError),

    #[error("Order deletion failed: {0}")]
    Deletion(#[source] BackendError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

pub type Result<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_product_accepts_string_or_number_price() {
        let a: Product = serde_json::from_str(r#"{"id": 1, "name": "Widget", "price": "10.50"}"#).unwrap();
        let b: Product = serde_json::from_str(r#"{"id": 1, "name": "Widget", "price": 10.5}"#).unwrap();
        assert_eq!(a.price.amount(), Decimal::new(1050, 2));
        assert_eq!(a.price, b.price);
    }

    #[test]
    fn test_order_status_round_trips_unknown_values() {
        let order: Order = serde_json::from_str(
            r#"{"id": 9, "store_id": 7, "user_id": 3, "status": "SHIPPED", "created_at": "2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Other("SHIPPED".into()));
        assert!(order.items.is_empty());
        assert_eq!(serde_json::to_value(&order.status).unwrap(), "SHIPPED");

        let status: OrderStatus = serde_json::from_str(r#""COMPLETED""#).unwrap();
        assert_eq!(status, OrderStatus::Completed);
    }

    #[test]
    fn test_order_list_tolerates_null_items_and_empty_lines() {
        let orders: Vec<Order> = serde_json::from_str(
            r#"[
                {"id": 1, "items": null, "store_id": 7, "user_id": 3, "status": "PENDING", "created_at": "2024-05-01T10:00:00Z"},
                {"id": 2, "items": [{"product": 4, "quantity": 0}, {"product": 5, "quantity": 2}],
                 "store_id": 7, "user_id": 3, "status": "COMPLETED", "created_at": "2024-05-02T10:00:00Z"}
            ]"#,
        )
        .unwrap();
        assert_eq!(orders.len(), 2);
        assert!(orders[0].items.is_empty());
        assert_eq!(orders[1].items, vec![OrderLine { product: ProductId::new(5), quantity: Quantity::new(2).unwrap() }]);
    }
}

//! Domain events raised by the order wizard
use crate::domain::value_objects::{Money, OrderId, ProductId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WizardEvent {
    Opened { products: usize, stores: usize, users: usize },
    CatalogUnavailable { reason: String },
    QuantityChanged { product_id: ProductId, quantity: u32, total: Money },
    SubmitStarted { lines: usize },
    OrderCreated { order_id: OrderId },
    SubmitFailed { reason: String },
    Closed,
}

//! Aggregates module
pub mod cart;
pub mod draft;

pub use cart::Cart;
pub use draft::{CreateOrderRequest, OrderDraft, ValidationError};

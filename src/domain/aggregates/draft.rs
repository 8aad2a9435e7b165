//! Order draft: the cart plus the store and user chosen for it

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::domain::aggregates::Cart;
use crate::domain::value_objects::{ProductId, StoreId, UserId};
use crate::OrderLine;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderDraft {
    cart: Cart,
    store: Option<StoreId>,
    user: Option<UserId>,
}

/// Body of the order-creation call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1))]
    pub items: Vec<OrderLine>,
    #[validate(range(min = 1))]
    pub store_id: i64,
    #[validate(range(min = 1))]
    pub user_id: i64,
}

impl OrderDraft {
    pub fn new() -> Self { Self::default() }

    pub fn cart(&self) -> &Cart { &self.cart }
    pub fn store(&self) -> Option<StoreId> { self.store }
    pub fn user(&self) -> Option<UserId> { self.user }

    pub fn select_store(&mut self, store: Option<StoreId>) { self.store = store; }
    pub fn select_user(&mut self, user: Option<UserId>) { self.user = user; }

    /// Replaces the cart with the adjusted copy and returns it.
    pub fn adjust_quantity(&mut self, product_id: ProductId, delta: i64) -> &Cart {
        self.cart = self.cart.adjust_quantity(product_id, delta);
        &self.cart
    }

    pub fn reset(&mut self) { *self = Self::default(); }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.store.is_none() { return Err(ValidationError::MissingStore); }
        if self.user.is_none() { return Err(ValidationError::MissingUser); }
        if self.cart.is_empty() { return Err(ValidationError::EmptyCart); }
        Ok(())
    }

    /// Flattens the draft into the creation payload.
    pub fn to_request(&self) -> Result<CreateOrderRequest, ValidationError> {
        self.validate()?;
        let (Some(store), Some(user)) = (self.store, self.user) else {
            return Err(ValidationError::MissingStore);
        };
        let request = CreateOrderRequest {
            items: self
                .cart
                .entries()
                .map(|(product, quantity)| OrderLine { product, quantity })
                .collect(),
            store_id: store.value(),
            user_id: user.value(),
        };
        request.validate().map_err(|e| ValidationError::InvalidPayload(e.to_string()))?;
        Ok(request)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a Store and User")]
    MissingStore,

    #[error("Please select a Store and User")]
    MissingUser,

    #[error("Add at least one product to the order")]
    EmptyCart,

    #[error("Order payload rejected: {0}")]
    InvalidPayload(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filled() -> OrderDraft {
        let mut draft = OrderDraft::new();
        draft.adjust_quantity(ProductId::new(1), 2);
        draft.select_store(Some(StoreId::new(7)));
        draft.select_user(Some(UserId::new(3)));
        draft
    }

    #[test]
    fn test_payload_shape() {
        let request = filled().to_request().unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"items": [{"product": 1, "quantity": 2}], "store_id": 7, "user_id": 3})
        );
    }

    #[test]
    fn test_missing_selection_rejected_with_items() {
        let mut draft = filled();
        draft.select_store(None);
        assert_eq!(draft.to_request(), Err(ValidationError::MissingStore));

        let mut draft = filled();
        draft.select_user(None);
        assert_eq!(draft.to_request(), Err(ValidationError::MissingUser));
    }

    #[test]
    fn test_empty_cart_rejected_with_selections() {
        let mut draft = filled();
        draft.adjust_quantity(ProductId::new(1), -2);
        assert_eq!(draft.validate(), Err(ValidationError::EmptyCart));
    }

    #[test]
    fn test_non_positive_ids_fail_payload_validation() {
        let mut draft = filled();
        draft.select_store(Some(StoreId::new(0)));
        assert!(matches!(draft.to_request(), Err(ValidationError::InvalidPayload(_))));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut draft = filled();
        draft.reset();
        assert_eq!(draft, OrderDraft::new());
    }
}

//! Cart Aggregate
//!
//! A cart maps product ids to quantities. It is immutable: every change
//! returns a new `Cart`, so a reader holding an older value keeps a
//! consistent view.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::value_objects::{ProductId, Quantity};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Arc<BTreeMap<ProductId, Quantity>>,
}

impl Cart {
    /// The canonical empty cart used at session start and after a successful submit.
    pub fn empty() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn contains(&self, product_id: ProductId) -> bool { self.entries.contains_key(&product_id) }

    /// Current quantity for `product_id`, zero when absent.
    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.entries.get(&product_id).map_or(0, Quantity::value)
    }

    pub fn entries(&self) -> impl Iterator<Item = (ProductId, Quantity)> + '_ {
        self.entries.iter().map(|(id, qty)| (*id, *qty))
    }

    /// Returns a cart with `delta` applied to the product's quantity.
    ///
    /// The result is clamped at zero and a zero quantity removes the entry.
    /// `self` is left untouched.
    #[must_use]
    pub fn adjust_quantity(&self, product_id: ProductId, delta: i64) -> Cart {
        let mut entries = (*self.entries).clone();
        if let Some(qty) = Quantity::offset(self.quantity(product_id), delta) {
            entries.insert(product_id, qty);
        } else {
            entries.remove(&product_id);
        }
        Cart { entries: Arc::new(entries) }
    }
}

impl FromIterator<(ProductId, Quantity)> for Cart {
    fn from_iter<I: IntoIterator<Item = (ProductId, Quantity)>>(iter: I) -> Self {
        Cart { entries: Arc::new(iter.into_iter().collect()) }
    }
}

//! Running total and order summary for a cart
//!
//! Both functions resolve cart entries against the current product list on
//! every call. Entries whose product cannot be found add nothing to the
//! total and are left out of the summary.

use std::collections::HashMap;

use crate::domain::aggregates::Cart;
use crate::domain::value_objects::{Money, ProductId, Quantity};
use crate::Product;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: Quantity,
    pub line_total: Money,
}

fn index(products: &[Product]) -> HashMap<ProductId, &Product> {
    let mut by_id = HashMap::with_capacity(products.len());
    for product in products {
        by_id.entry(product.id).or_insert(product);
    }
    by_id
}

pub fn total(cart: &Cart, products: &[Product]) -> Money {
    let by_id = index(products);
    cart.entries()
        .filter_map(|(id, qty)| by_id.get(&id).map(|p| p.price.multiply(qty)))
        .sum()
}

pub fn summary(cart: &Cart, products: &[Product]) -> Vec<SummaryLine> {
    let by_id = index(products);
    cart.entries()
        .filter_map(|(id, quantity)| {
            let product = by_id.get(&id)?;
            Some(SummaryLine {
                product_id: id,
                name: product.name.clone(),
                quantity,
                line_total: product.price.multiply(quantity),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: i64, name: &str, cents: i64) -> Product {
        Product { id: ProductId::new(id), name: name.into(), price: Money::new(Decimal::new(cents, 2)) }
    }

    fn catalog() -> Vec<Product> {
        vec![product(1, "Widget", 1000), product(2, "Gadget", 500), product(3, "Bolt", 10)]
    }

    fn cart(entries: &[(i64, i64)]) -> Cart {
        entries.iter().fold(Cart::empty(), |c, (id, qty)| c.adjust_quantity(ProductId::new(*id), *qty))
    }

    #[test]
    fn test_total_scenario() {
        let total = total(&cart(&[(1, 2), (2, 1)]), &catalog());
        assert_eq!(total.amount(), Decimal::new(2500, 2));
        assert_eq!(total.display(), "$25.00");
    }

    #[test]
    fn test_total_is_linear_over_disjoint_carts() {
        let products = catalog();
        let a = cart(&[(1, 3)]);
        let b = cart(&[(2, 4), (3, 7)]);
        let union: Cart = a.entries().chain(b.entries()).collect();
        assert_eq!(total(&union, &products), total(&a, &products).add(total(&b, &products)));
    }

    #[test]
    fn test_unknown_products_contribute_zero() {
        let products = catalog();
        let with_orphan = cart(&[(1, 1), (99, 5)]);
        assert_eq!(total(&with_orphan, &products).amount(), Decimal::new(1000, 2));
        assert_eq!(total(&cart(&[(99, 5)]), &[]), Money::ZERO);
    }

    #[test]
    fn test_no_float_drift_across_many_lines() {
        let products: Vec<Product> = (1..=1000).map(|id| product(id, "Penny+", 10)).collect();
        let big = (1..=1000).fold(Cart::empty(), |c, id| c.adjust_quantity(ProductId::new(id), 1));
        assert_eq!(total(&big, &products).amount(), Decimal::new(10000, 2));
    }

    #[test]
    fn test_summary_skips_unresolved_entries() {
        let lines = summary(&cart(&[(2, 3), (42, 1)]), &catalog());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Gadget");
        assert_eq!(lines[0].line_total.display(), "$15.00");
    }
}

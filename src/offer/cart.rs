//! Offer Cart
//!
//! The ordered selection of products making up today's offer. Items are
//! independent copies of catalog products, so the same product may appear
//! more than once.

use super::pricing::compute_total;
use crate::catalog::models::Product;
use rust_decimal::Decimal;

#[derive(Debug, Default, Clone)]
pub struct OfferCart {
    items: Vec<Product>,
}

impl OfferCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a copy of `product`
    pub fn add_item(&mut self, product: &Product) {
        self.items.push(product.clone());
    }

    /// Removes every entry with the given id and returns how many were removed.
    ///
    /// An unknown id removes nothing.
    pub fn remove_item(&mut self, id: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Swaps in a whole new selection in one step
    pub fn replace(&mut self, items: Vec<Product>) {
        self.items = items;
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self, delivery_cost: Decimal, transfer_cost: Decimal) -> Decimal {
        compute_total(&self.items, delivery_cost, transfer_cost)
    }
}

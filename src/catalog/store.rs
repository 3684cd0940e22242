//! Catalog Store
//!
//! Holds the products known to a session in insertion order. Products are
//! never edited or removed once added.

use super::{
    filter,
    models::{Category, CategoryGroup, Product},
};
use crate::error::{OfferError, OfferResult};
use crate::offer::pricing::{parse_amount, RawAmount};
use rust_decimal::Decimal;
use uuid::Uuid;

/// User-facing message for a rejected product
pub const INVALID_PRODUCT_MESSAGE: &str = "الرجاء إدخال اسم منتج صالح وسعر صحيح.";

/// Ordered collection of products owned by one session
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends a new product with a freshly generated id.
    ///
    /// The name is trimmed; the price must parse to a finite number above zero
    /// and no larger than [`crate::offer::pricing::MAX_AMOUNT`].
    /// On rejection the catalog is left untouched.
    pub fn add_product(
        &mut self,
        name: &str,
        category: Category,
        price: &RawAmount,
    ) -> OfferResult<Product> {
        let name = name.trim();
        let price = parse_amount(price).filter(|p| *p > Decimal::ZERO);

        let price = match price {
            Some(price) if !name.is_empty() => price,
            _ => return Err(OfferError::Validation(INVALID_PRODUCT_MESSAGE.to_string())),
        };

        let product = Product {
            id: Uuid::new_v4().simple().to_string(),
            name: name.to_string(),
            category,
            price,
        };
        self.products.push(product.clone());

        Ok(product)
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// See [`filter::filter_by_name`]
    pub fn filter_by_name(&self, term: &str) -> Vec<&Product> {
        filter::filter_by_name(&self.products, term)
    }

    /// Grouped view of the products matching `term`
    pub fn grouped(&self, term: &str) -> Vec<CategoryGroup> {
        filter::group_by_category(self.filter_by_name(term))
    }
}

//! Per-session offer context
//!
//! A `Session` owns everything one shopkeeper works with: the catalog, the
//! offer cart, the surcharges, the caption and the last rendered preview.
//! Nothing here is shared between sessions.

use crate::catalog::{
    export::export_csv,
    models::{Category, CategoryGroup, Product},
    store::Catalog,
};
use crate::error::{OfferError, OfferResult};
use crate::offer::{
    cart::OfferCart,
    models::OfferSummary,
    preview::{self, Snapshot},
    pricing::{coerce_amount, RawAmount},
    random::select_bundle,
};
use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
    catalog: Catalog,
    cart: OfferCart,
    delivery_cost: Decimal,
    transfer_cost: Decimal,
    caption: String,
    preview: Option<Snapshot>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            created_at: now,
            last_active: now,
            catalog: Catalog::new(),
            cart: OfferCart::new(),
            delivery_cost: Decimal::ZERO,
            transfer_cost: Decimal::ZERO,
            caption: String::new(),
            preview: None,
        }
    }

    /// Marks the session as used at `now`
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_active = now;
    }

    pub fn idle_for(&self, now: DateTime<Utc>) -> TimeDelta {
        now - self.last_active
    }

    pub fn age(&self, now: DateTime<Utc>) -> TimeDelta {
        now - self.created_at
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    pub fn add_product(
        &mut self,
        name: &str,
        category: Category,
        price: &RawAmount,
    ) -> OfferResult<Product> {
        let product = self.catalog.add_product(name, category, price)?;
        tracing::info!(
            session = %self.id,
            product = %product.id,
            name = %product.name,
            price = %product.price,
            "Product added"
        );
        Ok(product)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn search_products(&self, term: &str) -> Vec<Product> {
        self.catalog.filter_by_name(term).into_iter().cloned().collect()
    }

    pub fn grouped_products(&self, term: &str) -> Vec<CategoryGroup> {
        self.catalog.grouped(term)
    }

    pub fn export_catalog(&self) -> OfferResult<String> {
        let csv = export_csv(self.catalog.products())?;
        tracing::info!(session = %self.id, rows = self.catalog.len(), "Catalog exported");
        Ok(csv)
    }

    // -------------------------------------------------------------------------
    // Offer
    // -------------------------------------------------------------------------

    /// Adds a copy of the catalog product with `product_id` to the offer
    pub fn add_to_offer(&mut self, product_id: &str) -> OfferResult<Product> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| OfferError::NotFound(format!("product {}", product_id)))?;
        self.cart.add_item(product);
        Ok(product.clone())
    }

    /// Removes every offer entry for `product_id`; unknown ids are ignored
    pub fn remove_from_offer(&mut self, product_id: &str) -> usize {
        self.cart.remove_item(product_id)
    }

    /// Updates the surcharges that were supplied, coercing bad input to zero
    pub fn set_surcharges(&mut self, delivery: Option<&RawAmount>, transfer: Option<&RawAmount>) {
        if let Some(raw) = delivery {
            self.delivery_cost = coerce_amount(raw);
        }
        if let Some(raw) = transfer {
            self.transfer_cost = coerce_amount(raw);
        }
    }

    pub fn set_caption(&mut self, text: impl Into<String>) {
        self.caption = text.into();
    }

    pub fn cart(&self) -> &OfferCart {
        &self.cart
    }

    pub fn delivery_cost(&self) -> Decimal {
        self.delivery_cost
    }

    pub fn transfer_cost(&self) -> Decimal {
        self.transfer_cost
    }

    pub fn total(&self) -> Decimal {
        self.cart.total(self.delivery_cost, self.transfer_cost)
    }

    pub fn can_preview(&self) -> bool {
        preview::has_content(self.cart.items(), self.delivery_cost, self.transfer_cost)
    }

    pub fn summary(&self) -> OfferSummary {
        OfferSummary {
            items: self.cart.items().to_vec(),
            delivery_cost: self.delivery_cost,
            transfer_cost: self.transfer_cost,
            caption: self.caption.clone(),
            total: self.total(),
            can_preview: self.can_preview(),
        }
    }

    // -------------------------------------------------------------------------
    // Preview
    // -------------------------------------------------------------------------

    /// Renders a fresh snapshot of the current offer and keeps it
    pub fn generate_preview(&mut self) -> OfferResult<Snapshot> {
        if !self.can_preview() {
            return Err(OfferError::NothingToPreview);
        }

        let snapshot = preview::render(
            self.cart.items(),
            &self.caption,
            self.delivery_cost,
            self.transfer_cost,
        );
        self.preview = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// The last snapshot, which may be older than the current cart
    pub fn preview(&self) -> Option<&Snapshot> {
        self.preview.as_ref()
    }

    /// The snapshot to export.
    ///
    /// Export needs both a generated snapshot and a current offer with
    /// content; a stale card of an emptied offer is not exported.
    pub fn export_preview(&self) -> OfferResult<Snapshot> {
        let snapshot = self
            .preview
            .as_ref()
            .ok_or_else(|| OfferError::NotFound("preview".to_string()))?;
        if !self.can_preview() {
            return Err(OfferError::NothingToPreview);
        }
        tracing::info!(session = %self.id, lines = snapshot.lines.len(), "Preview exported");
        Ok(snapshot.clone())
    }

    /// Replaces the cart with a random bundle under `max_value` and renders it.
    ///
    /// On rejection the cart and the previous preview are left as they were.
    /// The preview is rendered only after the new cart is in place.
    pub fn generate_random_offer<R: Rng + ?Sized>(
        &mut self,
        max_value: Decimal,
        rng: &mut R,
    ) -> OfferResult<Snapshot> {
        let bundle = select_bundle(self.catalog.products(), max_value, rng)?;
        self.cart.replace(bundle);

        tracing::info!(
            session = %self.id,
            max_value = %max_value,
            items = self.cart.len(),
            total = %self.total(),
            "Random offer generated"
        );

        self.generate_preview()
    }
}

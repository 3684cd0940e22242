//! Offer endpoint payloads

use super::preview::Snapshot;
use super::pricing::RawAmount;
use crate::catalog::models::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input for adding a catalog product to the offer
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToOfferInput {
    pub product_id: String,
}

/// Input for updating surcharges; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurchargesInput {
    pub delivery_cost: Option<RawAmount>,
    pub transfer_cost: Option<RawAmount>,
}

/// Input for the caption shown under the preview title
#[derive(Debug, Deserialize)]
pub struct CaptionInput {
    #[serde(default)]
    pub text: String,
}

/// Input for the random offer generator
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomOfferInput {
    #[serde(default)]
    pub max_value: RawAmount,
}

/// Current state of the offer with its derived total
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSummary {
    pub items: Vec<Product>,
    pub delivery_cost: Decimal,
    pub transfer_cost: Decimal,
    pub caption: String,
    pub total: Decimal,
    /// Whether a preview can be generated right now
    pub can_preview: bool,
}

/// Result of a cart removal
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemResponse {
    pub removed: usize,
    pub offer: OfferSummary,
}

/// Result of a random offer: the new cart and the preview rendered from it
#[derive(Debug, Serialize)]
pub struct RandomOfferResponse {
    pub offer: OfferSummary,
    pub preview: Snapshot,
}

//! Catalog Domain Models
//!
//! This module contains the product and category types plus the request and
//! response payloads of the catalog endpoints.

use crate::offer::pricing::RawAmount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Catalog Domain Models
// =============================================================================

/// Fixed set of product categories.
///
/// Serialized as its snake_case code; deserialized from either the code or
/// the display label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Category {
    /// Consumable goods; the only category eligible for random offers
    #[default]
    Groceries,
    Gifts,
    Service,
    MobileCredit,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 4] = [
        Category::Groceries,
        Category::Gifts,
        Category::Service,
        Category::MobileCredit,
    ];

    /// Display label shown to the shopkeeper
    pub fn label(self) -> &'static str {
        match self {
            Category::Groceries => "مواد غذائية",
            Category::Gifts => "هدايا",
            Category::Service => "خدمة",
            Category::MobileCredit => "رصيد موبايل",
        }
    }

    /// Snake-case code used on the wire
    pub fn code(self) -> &'static str {
        match self {
            Category::Groceries => "groceries",
            Category::Gifts => "gifts",
            Category::Service => "service",
            Category::MobileCredit => "mobile_credit",
        }
    }

    /// Accepts either the wire code or the display label
    pub fn parse(value: &str) -> Option<Category> {
        let value = value.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.code() == value || c.label() == value)
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Category::parse(&value).ok_or_else(|| format!("فئة غير معروفة: {}", value))
    }
}

/// Immutable catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque unique identifier
    pub id: String,

    /// Trimmed, non-empty product name
    pub name: String,

    pub category: Category,

    /// Positive unit price in euros
    pub price: Decimal,
}

// =============================================================================
// Endpoint Payloads
// =============================================================================

/// Input for the add product endpoint
#[derive(Debug, Deserialize)]
pub struct AddProductInput {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub category: Category,

    /// Raw price as typed by the user (number or text)
    #[serde(default)]
    pub price: RawAmount,
}

/// Query string for listing and grouping products
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

/// One category section of the grouped product view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub label: &'static str,
    pub products: Vec<Product>,
}

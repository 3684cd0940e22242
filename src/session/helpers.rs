//! Session helpers

use crate::catalog::models::Product;
use uuid::Uuid;

/// Creates a fresh opaque session identifier
pub fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Produces a human-readable one-line summary of offer items for logs.
///
/// Example output: `"Rice (4.50), Oil (9.00)"`.
pub fn format_item_summary(items: &[Product]) -> String {
    items
        .iter()
        .map(|p| format!("{} ({})", p.name, crate::offer::pricing::format_money(p.price)))
        .collect::<Vec<_>>()
        .join(", ")
}

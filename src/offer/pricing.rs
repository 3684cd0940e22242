//! Cost aggregation and money handling
//!
//! Amounts are carried as `Decimal` so that sums of prices and surcharges are
//! exact. Raw user input is coerced here, at the boundary; `compute_total`
//! itself assumes valid non-negative inputs.

use crate::catalog::models::Product;
use rust_decimal::prelude::*;
use serde::Deserialize;

/// Monetary values are shown with two fractional digits
const DECIMAL_PLACES: u32 = 2;

/// Largest accepted price, surcharge or ceiling (one billion euros).
///
/// Keeps every realistic sum far below the `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// An amount exactly as it arrived from a form field: a JSON number or text
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    #[default]
    Missing,
    /// Any other JSON value (bool, array, object); never a valid amount
    Other(serde_json::Value),
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

/// Parses a raw amount into a decimal.
///
/// Returns `None` when the input is missing, not numeric, NaN, infinite or
/// larger in magnitude than [`MAX_AMOUNT`].
pub fn parse_amount(raw: &RawAmount) -> Option<Decimal> {
    let value = match raw {
        RawAmount::Number(value) if value.is_finite() => Decimal::from_f64(*value),
        RawAmount::Number(_) | RawAmount::Missing | RawAmount::Other(_) => None,
        RawAmount::Text(text) => {
            let text = text.trim();
            Decimal::from_str(text)
                .ok()
                .or_else(|| Decimal::from_scientific(text).ok())
        }
    }?;

    (value.abs() <= MAX_AMOUNT).then_some(value)
}

/// Coerces a surcharge or ceiling to a non-negative decimal, zero on failure
pub fn coerce_amount(raw: &RawAmount) -> Decimal {
    match parse_amount(raw) {
        Some(value) if value > Decimal::ZERO => value,
        _ => Decimal::ZERO,
    }
}

/// Sum of item prices plus both surcharges.
///
/// Saturates at `Decimal::MAX` instead of overflowing.
pub fn compute_total(items: &[Product], delivery_cost: Decimal, transfer_cost: Decimal) -> Decimal {
    items
        .iter()
        .map(|p| p.price)
        .chain([delivery_cost, transfer_cost])
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Rounds to cents, half away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two fractional digits, e.g. `15.50`
pub fn format_money(value: Decimal) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(DECIMAL_PLACES);
    rounded.to_string()
}

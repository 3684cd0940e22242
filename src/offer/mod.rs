//! Offer Domain Module
//!
//! This module contains the daily offer logic, including:
//! - The offer cart and cost aggregation
//! - Random bundle selection under a budget
//! - Preview rendering and PNG export
//! - REST API handlers

pub mod cart;
pub mod handlers;
pub mod models;
pub mod preview;
pub mod pricing;
pub mod random;
pub mod raster;

pub use handlers::routes;

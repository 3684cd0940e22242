//! Product Catalog Module
//!
//! This module contains the catalog side of the application, including:
//! - Domain models (Product, Category, payloads)
//! - The per-session catalog store
//! - Name search and category grouping
//! - CSV export
//! - REST API handlers

pub mod export;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod store;

pub use handlers::routes;

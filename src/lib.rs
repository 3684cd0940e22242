//! Offer Board Library
//!
//! This library provides the core functionality for managing a product
//! catalog and composing daily offers, exposed over a small HTTP API.

// Domain modules
pub mod catalog;
pub mod offer;
pub mod session;

// Infrastructure
pub mod config;
pub mod error;
pub mod logging;
pub mod router;

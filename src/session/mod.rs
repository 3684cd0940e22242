//! Session Module
//!
//! This module contains the per-user working context, including:
//! - The session object owning catalog, offer and preview
//! - In-memory session registry
//! - Session lifecycle handlers

pub mod context;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use context::Session;
pub use handlers::routes;
pub use state::{AppState, SharedState};

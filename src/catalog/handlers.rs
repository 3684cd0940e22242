//! REST API handlers for the product catalog

use super::{
    export::CSV_FILE_NAME,
    models::{AddProductInput, CategoryGroup, Product, SearchQuery},
};
use crate::error::OfferError;
use crate::router::attachment;
use crate::session::SharedState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};

/// Creates routes for catalog operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route(
            "/sessions/:session_id/products",
            get(list_products).post(add_product),
        )
        .route("/sessions/:session_id/products/grouped", get(grouped_products))
        .route("/sessions/:session_id/products/export", get(export_products))
}

/// Endpoint: POST /sessions/:session_id/products
/// Validates and appends a product to the session catalog.
async fn add_product(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    body: Result<Json<AddProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), OfferError> {
    let Json(payload) = body?;
    let product = state.with_session_mut(&session_id, |session| {
        session.add_product(&payload.name, payload.category, &payload.price)
    })?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Endpoint: GET /sessions/:session_id/products?search=
/// Lists catalog products, optionally filtered by name.
async fn list_products(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>, OfferError> {
    let products = state.with_session(&session_id, |session| {
        Ok(session.search_products(&query.search))
    })?;

    Ok(Json(products))
}

/// Endpoint: GET /sessions/:session_id/products/grouped?search=
/// Same filter as the list, partitioned by category.
async fn grouped_products(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CategoryGroup>>, OfferError> {
    let groups = state.with_session(&session_id, |session| {
        Ok(session.grouped_products(&query.search))
    })?;

    Ok(Json(groups))
}

/// Endpoint: GET /sessions/:session_id/products/export
/// Downloads the catalog as `products.csv`.
async fn export_products(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Response, OfferError> {
    let csv = state.with_session(&session_id, |session| session.export_catalog())?;

    Ok(attachment("text/csv; charset=utf-8", CSV_FILE_NAME, csv))
}

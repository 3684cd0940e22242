//! REST API handlers for offer composition
//!
//! This module implements the endpoints for editing the offer cart,
//! surcharges and caption, plus preview generation and the random offer.

use super::{
    models::*,
    preview::{Snapshot, PREVIEW_FILE_NAME},
    pricing::coerce_amount,
};
use crate::catalog::models::Product;
use crate::error::OfferError;
use crate::router::attachment;
use crate::session::SharedState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    routing::{delete, get, post, put},
    Json, Router,
};

/// Creates routes for offer operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/sessions/:session_id/offer", get(get_offer))
        .route("/sessions/:session_id/offer/items", post(add_item))
        .route(
            "/sessions/:session_id/offer/items/:product_id",
            delete(remove_item),
        )
        .route("/sessions/:session_id/offer/surcharges", put(set_surcharges))
        .route("/sessions/:session_id/offer/caption", put(set_caption))
        .route(
            "/sessions/:session_id/offer/preview",
            post(generate_preview).get(get_preview),
        )
        .route(
            "/sessions/:session_id/offer/preview/export",
            get(export_preview),
        )
        .route("/sessions/:session_id/offer/random", post(random_offer))
}

/// Endpoint: GET /sessions/:session_id/offer
/// Returns the offer with its freshly computed total.
async fn get_offer(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<OfferSummary>, OfferError> {
    let summary = state.with_session(&session_id, |session| Ok(session.summary()))?;
    Ok(Json(summary))
}

/// Endpoint: POST /sessions/:session_id/offer/items
async fn add_item(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    body: Result<Json<AddToOfferInput>, JsonRejection>,
) -> Result<Json<Product>, OfferError> {
    let Json(payload) = body?;
    let product = state.with_session_mut(&session_id, |session| {
        session.add_to_offer(&payload.product_id)
    })?;
    Ok(Json(product))
}

/// Endpoint: DELETE /sessions/:session_id/offer/items/:product_id
/// Removing a product that is not in the offer is not an error.
async fn remove_item(
    State(state): State<SharedState>,
    Path((session_id, product_id)): Path<(String, String)>,
) -> Result<Json<RemoveItemResponse>, OfferError> {
    let response = state.with_session_mut(&session_id, |session| {
        let removed = session.remove_from_offer(&product_id);
        Ok(RemoveItemResponse {
            removed,
            offer: session.summary(),
        })
    })?;
    Ok(Json(response))
}

/// Endpoint: PUT /sessions/:session_id/offer/surcharges
async fn set_surcharges(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    body: Result<Json<SurchargesInput>, JsonRejection>,
) -> Result<Json<OfferSummary>, OfferError> {
    let Json(payload) = body?;
    let summary = state.with_session_mut(&session_id, |session| {
        session.set_surcharges(payload.delivery_cost.as_ref(), payload.transfer_cost.as_ref());
        Ok(session.summary())
    })?;
    Ok(Json(summary))
}

/// Endpoint: PUT /sessions/:session_id/offer/caption
/// The caption is stored verbatim and escaped when drawn on the exported card.
async fn set_caption(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    body: Result<Json<CaptionInput>, JsonRejection>,
) -> Result<Json<OfferSummary>, OfferError> {
    let Json(payload) = body?;
    let summary = state.with_session_mut(&session_id, |session| {
        session.set_caption(payload.text);
        Ok(session.summary())
    })?;
    Ok(Json(summary))
}

/// Endpoint: POST /sessions/:session_id/offer/preview
async fn generate_preview(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<Snapshot>, OfferError> {
    let snapshot = state.with_session_mut(&session_id, |session| session.generate_preview())?;
    Ok(Json(snapshot))
}

/// Endpoint: GET /sessions/:session_id/offer/preview
/// Returns the last generated snapshot without re-rendering it.
async fn get_preview(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<Snapshot>, OfferError> {
    let snapshot = state.with_session(&session_id, |session| {
        session
            .preview()
            .cloned()
            .ok_or_else(|| OfferError::NotFound("preview".to_string()))
    })?;
    Ok(Json(snapshot))
}

/// Endpoint: GET /sessions/:session_id/offer/preview/export
/// Downloads the last snapshot rasterized as `offer.png`.
async fn export_preview(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Response, OfferError> {
    let snapshot = state.with_session(&session_id, |session| session.export_preview())?;

    // Rasterizing is CPU-bound
    let png = tokio::task::spawn_blocking(move || snapshot.to_png())
        .await
        .map_err(|e| OfferError::Internal(format!("render task: {}", e)))??;

    Ok(attachment("image/png", PREVIEW_FILE_NAME, png))
}

/// Endpoint: POST /sessions/:session_id/offer/random
/// Replaces the offer with a random bundle and returns it with its preview.
async fn random_offer(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    body: Result<Json<RandomOfferInput>, JsonRejection>,
) -> Result<Json<RandomOfferResponse>, OfferError> {
    let Json(payload) = body?;
    let max_value = coerce_amount(&payload.max_value);

    let response = state.with_session_mut(&session_id, |session| {
        let preview = session.generate_random_offer(max_value, &mut rand::thread_rng())?;
        Ok(RandomOfferResponse {
            offer: session.summary(),
            preview,
        })
    })?;

    Ok(Json(response))
}

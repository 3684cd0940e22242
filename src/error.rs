//! Offer Board Error Types
//!
//! Every failure in the catalog and offer domain is a synchronous rejection
//! of a single user action. None of them end the session.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;

use crate::offer::pricing::format_money;

/// Result alias used throughout the domain modules
pub type OfferResult<T> = Result<T, OfferError>;

/// Domain error for catalog, offer and session operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OfferError {
    /// Invalid product name or price on add (400)
    #[error("{0}")]
    Validation(String),

    /// Random offer ceiling is not positive (400)
    #[error("{0}")]
    InvalidArgument(String),

    /// No eligible product fits under the random offer ceiling (422)
    #[error("لا توجد منتجات بسعر يصل إلى {} €", money(.max_value))]
    EmptySelection { max_value: Decimal },

    /// Catalog export requested with no products (409)
    #[error("لا توجد منتجات للتصدير.")]
    EmptyCatalog,

    /// Preview requested while the offer has no items and no surcharges (409)
    #[error("أضف منتجات أو تكاليف قبل إنشاء المعاينة.")]
    NothingToPreview,

    /// Unknown session, product or preview (404)
    #[error("غير موجود: {0}")]
    NotFound(String),

    /// Export rendering failed (500); the detail is logged, not sent
    #[error("تعذّر إنشاء الملف.")]
    Internal(String),
}

fn money(value: &Decimal) -> String {
    format_money(*value)
}

impl OfferError {
    /// Machine-readable code sent alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            OfferError::Validation(_) => "VALIDATION_ERROR",
            OfferError::InvalidArgument(_) => "INVALID_ARGUMENT",
            OfferError::EmptySelection { .. } => "EMPTY_SELECTION",
            OfferError::EmptyCatalog => "EMPTY_CATALOG",
            OfferError::NothingToPreview => "NOTHING_TO_PREVIEW",
            OfferError::NotFound(_) => "NOT_FOUND",
            OfferError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status for this rejection
    pub fn status(&self) -> StatusCode {
        match self {
            OfferError::Validation(_) | OfferError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            OfferError::EmptySelection { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            OfferError::EmptyCatalog | OfferError::NothingToPreview => StatusCode::CONFLICT,
            OfferError::NotFound(_) => StatusCode::NOT_FOUND,
            OfferError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn session_not_found(session_id: &str) -> Self {
        OfferError::NotFound(format!("session {}", session_id))
    }
}

/// Malformed or wrongly shaped request bodies are validation failures
impl From<JsonRejection> for OfferError {
    fn from(rejection: JsonRejection) -> Self {
        OfferError::Validation(rejection.body_text())
    }
}

impl IntoResponse for OfferError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            OfferError::Internal(detail) => tracing::error!(detail = %detail, "Export failed"),
            _ => tracing::debug!(code = self.code(), status = %status, "Rejected request: {}", self),
        }

        let mut body = json!({
            "code": self.code(),
            "message": self.to_string(),
        });
        if let OfferError::EmptySelection { max_value } = &self {
            body["maxValue"] = json!(format_money(*max_value));
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_echoes_ceiling() {
        let err = OfferError::EmptySelection {
            max_value: Decimal::new(35, 1),
        };
        assert_eq!(err.to_string(), "لا توجد منتجات بسعر يصل إلى 3.50 €");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), "EMPTY_SELECTION");
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err = OfferError::Validation("bad".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "bad");
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = OfferError::Internal("png encoder: out of memory".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().contains("png"));
    }
}

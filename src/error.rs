//! Typed error handling for the API
//!
//! Every failure a handler can produce maps onto one of the variants below,
//! which in turn maps onto an HTTP status and a JSON body of the form
//! `{"error": "<message>"}`.
//!
//! - [`ApiError::Validation`] — a create payload broke a validation rule (400)
//! - [`ApiError::BadRequest`] — malformed JSON body or query string (400)
//! - [`ApiError::MalformedId`] — a path identifier is not a valid UUID (400)
//! - [`ApiError::NotFound`] — no document matched, or no route matched (404)
//! - [`ApiError::Database`] — a store round-trip failed; the raw driver
//!   message is exposed in the body (500)
//! - [`ApiError::Internal`] — serialization glue failed (500)
//!
//! Store calls are attempted exactly once; there is no retry layer.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The error type returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A create payload failed validation (first failing rule wins).
    #[error("{0}")]
    Validation(String),

    /// The request body or query string could not be parsed.
    #[error("{0}")]
    BadRequest(String),

    /// A path identifier could not be parsed into a UUID.
    #[error("Identifiant invalide")]
    MalformedId,

    /// No document (or no route) matched.
    #[error("{0}")]
    NotFound(String),

    /// A store operation failed.
    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    /// Serialization glue failed; should not happen in normal operation.
    #[error("{0}")]
    Internal(String),
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    /// Shorthand for a 404 with the given French message.
    pub fn not_found(message: &str) -> Self {
        ApiError::NotFound(message.to_string())
    }

    /// The HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::MalformedId => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::Validation("Email invalide".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Email invalide");
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = ApiError::BadRequest("Corps JSON invalide".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_id_maps_to_400() {
        let err = ApiError::MalformedId;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Identifiant invalide");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::not_found("Hôtel non trouvé");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Hôtel non trouvé");
    }

    #[test]
    fn internal_maps_to_500() {
        let err = ApiError::Internal("boom".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_serializes_to_error_key() {
        let body = ErrorBody {
            error: "Champs manquants".into(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Champs manquants"}));
    }
}

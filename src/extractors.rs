//! Request extractors
//!
//! Thin wrappers around axum's `Json` and `Query` whose rejections are
//! rewritten into the API's `{"error": …}` body with status 400, plus the
//! path-identifier parser.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;

/// JSON request body.
pub struct Body<T>(pub T);

impl<S, T> FromRequest<S> for Body<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Body(value)),
            Err(rejection) => Err(ApiError::BadRequest(format!(
                "Corps JSON invalide: {}",
                rejection.body_text()
            ))),
        }
    }
}

/// Typed query string. An unparseable parameter value rejects the request.
pub struct Params<T>(pub T);

impl<S, T> FromRequestParts<S> for Params<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Params(value)),
            Err(rejection) => Err(ApiError::BadRequest(format!(
                "Paramètres de requête invalides: {}",
                rejection.body_text()
            ))),
        }
    }
}

/// Parse a path identifier into the store's id type.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::MalformedId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_uuid() {
        let id = parse_id("7f8a5f86-2f0b-4a3c-9a5e-1c2d3e4f5a6b").unwrap();
        assert_eq!(id.to_string(), "7f8a5f86-2f0b-4a3c-9a5e-1c2d3e4f5a6b");
    }

    #[test]
    fn parse_id_rejects_non_uuid_with_400() {
        let err = parse_id("abc123").unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}

//! Hotel handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use super::AppState;
use crate::error::ApiError;
use crate::extractors::{Body, Params, parse_id};
use crate::models::{CreateHotel, Hotel};
use crate::query::{HotelListParams, HotelSearchParams};
use crate::reports::{self, StarGroup};

const NOT_FOUND: &str = "Hôtel non trouvé";

/// `POST /api/hotels`
pub async fn create(
    State(state): State<AppState>,
    Body(payload): Body<CreateHotel>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let hotel = payload.into_hotel()?;
    let hotel: Hotel = state
        .store
        .insert(Hotel::COLLECTION, &hotel.id, &hotel)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Hôtel créé", "hotel": hotel })),
    ))
}

/// `GET /api/hotels` — active hotels only, filtered and paginated.
pub async fn list(
    State(state): State<AppState>,
    Params(params): Params<HotelListParams>,
) -> Result<Json<Value>, ApiError> {
    let filter = params.filter();
    let page = params.page();

    let hotels: Vec<Hotel> = state
        .store
        .find_page(Hotel::COLLECTION, filter.clone(), page.skip(), page.limit)
        .await?;
    let total = state.store.count(Hotel::COLLECTION, filter).await?;

    Ok(Json(json!({
        "hotels": hotels,
        "pagination": { "page": page.page, "limit": page.limit, "total": total }
    })))
}

/// `GET /api/hotels/recherche/avancee` — unpaginated advanced search.
pub async fn search(
    State(state): State<AppState>,
    Params(params): Params<HotelSearchParams>,
) -> Result<Json<Value>, ApiError> {
    let hotels: Vec<Hotel> = state
        .store
        .find_all(Hotel::COLLECTION, params.filter())
        .await?;

    Ok(Json(json!({ "count": hotels.len(), "hotels": hotels })))
}

/// `PUT /api/hotels/{id}` — unvalidated partial merge.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Body(body): Body<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let Value::Object(changes) = body else {
        return Err(ApiError::BadRequest(
            "Le corps doit être un objet JSON".to_string(),
        ));
    };

    let hotel = state
        .store
        .update_by_id(Hotel::COLLECTION, &id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(Json(json!({ "message": "Hôtel modifié", "hotel": hotel })))
}

/// `DELETE /api/hotels/{id}` — hard delete; rooms and reservations that
/// reference the hotel are left in place.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    if !state.store.delete_by_id(Hotel::COLLECTION, &id).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    Ok(Json(json!({ "message": "Hôtel supprimé" })))
}

/// `GET /api/hotels/top/etoiles` — report 1.
pub async fn top_by_stars(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let groups: Vec<StarGroup> = state
        .store
        .aggregate(Hotel::COLLECTION, reports::top_hotels_pipeline())
        .await?;

    Ok(Json(json!({ "topHotels": groups })))
}

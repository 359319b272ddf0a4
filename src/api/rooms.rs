//! Room handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use super::AppState;
use crate::error::ApiError;
use crate::extractors::{Body, Params, parse_id};
use crate::models::{CreateRoom, Room};
use crate::query::RoomListParams;
use crate::reports::{self, MostBookedRoom, RoomTypeStats};

const NOT_FOUND: &str = "Chambre non trouvée";

/// `POST /api/rooms`
pub async fn create(
    State(state): State<AppState>,
    Body(payload): Body<CreateRoom>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let room = payload.into_room()?;
    let room: Room = state.store.insert(Room::COLLECTION, &room.id, &room).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Chambre créée", "room": room })),
    ))
}

/// `GET /api/rooms` — filtered and paginated.
pub async fn list(
    State(state): State<AppState>,
    Params(params): Params<RoomListParams>,
) -> Result<Json<Value>, ApiError> {
    let filter = params.filter();
    let page = params.page();

    let rooms: Vec<Room> = state
        .store
        .find_page(Room::COLLECTION, filter.clone(), page.skip(), page.limit)
        .await?;
    let total = state.store.count(Room::COLLECTION, filter).await?;

    Ok(Json(json!({
        "rooms": rooms,
        "pagination": { "page": page.page, "limit": page.limit, "total": total }
    })))
}

/// `PUT /api/rooms/{id}` — unvalidated partial merge.
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

    let room = state
        .store
        .update_by_id(Room::COLLECTION, &id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(Json(json!({ "message": "Chambre modifiée", "room": room })))
}

/// `DELETE /api/rooms/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    if !state.store.delete_by_id(Room::COLLECTION, &id).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    Ok(Json(json!({ "message": "Chambre supprimée" })))
}

/// `GET /api/rooms/stats/par-type` — report 2.
pub async fn stats_by_type(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let stats: Vec<RoomTypeStats> = state
        .store
        .aggregate(Room::COLLECTION, reports::room_type_stats_pipeline())
        .await?;

    Ok(Json(json!({ "statistiques": stats })))
}

/// `GET /api/rooms/plus-reservees` — report 3.
pub async fn most_booked(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let rooms: Vec<MostBookedRoom> = state
        .store
        .aggregate(Room::COLLECTION, reports::most_booked_rooms_pipeline())
        .await?;

    Ok(Json(json!({ "topChambres": rooms })))
}

//! Reservation handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use super::AppState;
use crate::error::ApiError;
use crate::extractors::{Body, Params, parse_id};
use crate::models::{CreateReservation, Reservation};
use crate::query::ReservationListParams;
use crate::reports::{self, CompleteReservation, StatusStats};

const NOT_FOUND: &str = "Réservation non trouvée";

/// `POST /api/reservations`
pub async fn create(
    State(state): State<AppState>,
    Body(payload): Body<CreateReservation>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let reservation = payload.into_reservation()?;
    let reservation: Reservation = state
        .store
        .insert(Reservation::COLLECTION, &reservation.id, &reservation)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Réservation créée", "reservation": reservation })),
    ))
}

/// `GET /api/reservations` — filtered and paginated.
pub async fn list(
    State(state): State<AppState>,
    Params(params): Params<ReservationListParams>,
) -> Result<Json<Value>, ApiError> {
    let filter = params.filter();
    let page = params.page();

    let reservations: Vec<Reservation> = state
        .store
        .find_page(
            Reservation::COLLECTION,
            filter.clone(),
            page.skip(),
            page.limit,
        )
        .await?;
    let total = state.store.count(Reservation::COLLECTION, filter).await?;

    Ok(Json(json!({
        "reservations": reservations,
        "pagination": { "page": page.page, "limit": page.limit, "total": total }
    })))
}

/// `PUT /api/reservations/{id}` — unvalidated partial merge; this is how a
/// reservation changes status.
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

    let reservation = state
        .store
        .update_by_id(Reservation::COLLECTION, &id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(Json(
        json!({ "message": "Réservation modifiée", "reservation": reservation }),
    ))
}

/// `DELETE /api/reservations/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    if !state
        .store
        .delete_by_id(Reservation::COLLECTION, &id)
        .await?
    {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    Ok(Json(json!({ "message": "Réservation supprimée" })))
}

/// `GET /api/reservations/stats` — report 4.
pub async fn stats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let stats: Vec<StatusStats> = state
        .store
        .aggregate(
            Reservation::COLLECTION,
            reports::reservation_status_stats_pipeline(),
        )
        .await?;
    let total = state
        .store
        .count(Reservation::COLLECTION, mongodb::bson::doc! {})
        .await?;

    Ok(Json(json!({ "stats": stats, "total": total })))
}

/// `GET /api/reservations/completes` — report 5.
pub async fn completes(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let reservations: Vec<CompleteReservation> = state
        .store
        .aggregate(
            Reservation::COLLECTION,
            reports::complete_reservations_pipeline(),
        )
        .await?;

    Ok(Json(json!({
        "nombre": reservations.len(),
        "reservations": reservations
    })))
}

//! Aggregation reports
//!
//! Five read-only derived views, computed per request with no caching. Each
//! report is a pure pipeline-builder function (so the stage list can be
//! unit-tested) plus a typed row struct; execution happens server-side via
//! [`Store::aggregate`](crate::store::Store::aggregate).
//!
//! Ties within an equal sort key keep the store's document order; nothing
//! stronger is guaranteed.

use chrono::{DateTime, Utc};
use mongodb::bson::{Document, doc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ReservationStatus, RoomType, datetime};

// ---------------------------------------------------------------------------
// 1. Top hotels by star rating
// ---------------------------------------------------------------------------

/// Hotels grouped by star rating: count and names per group, best rated
/// first, at most five groups.
pub fn top_hotels_pipeline() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$etoiles", "nombre": { "$sum": 1 }, "hotels": { "$push": "$nom" } } },
        doc! { "$sort": { "_id": -1 } },
        doc! { "$limit": 5 },
        doc! { "$project": { "etoiles": "$_id", "nombre": 1, "hotels": 1, "_id": 0 } },
    ]
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StarGroup {
    pub etoiles: i32,
    pub nombre: i64,
    pub hotels: Vec<String>,
}

// ---------------------------------------------------------------------------
// 2. Room statistics by type
// ---------------------------------------------------------------------------

/// Rooms grouped by type: count and average nightly price rounded to two
/// decimals, most common type first.
pub fn room_type_stats_pipeline() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$type", "nombre": { "$sum": 1 }, "prixMoyen": { "$avg": "$prixNuit" } } },
        doc! { "$sort": { "nombre": -1 } },
        doc! { "$project": { "type": "$_id", "nombre": 1, "prixMoyen": { "$round": ["$prixMoyen", 2] }, "_id": 0 } },
    ]
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoomTypeStats {
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub nombre: i64,
    #[serde(rename = "prixMoyen")]
    pub prix_moyen: f64,
}

// ---------------------------------------------------------------------------
// 3. Most-booked rooms
// ---------------------------------------------------------------------------

/// Each room joined against its reservations, ten most reserved first.
pub fn most_booked_rooms_pipeline() -> Vec<Document> {
    vec![
        doc! { "$lookup": {
            "from": "reservations",
            "localField": "_id",
            "foreignField": "roomId",
            "as": "reservations"
        } },
        doc! { "$project": {
            "numero": 1,
            "type": 1,
            "prixNuit": 1,
            "nombreReservations": { "$size": "$reservations" }
        } },
        doc! { "$sort": { "nombreReservations": -1 } },
        doc! { "$limit": 10 },
    ]
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MostBookedRoom {
    pub id: Uuid,
    pub numero: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(rename = "prixNuit")]
    pub prix_nuit: f64,
    #[serde(rename = "nombreReservations")]
    pub nombre_reservations: i64,
}

// ---------------------------------------------------------------------------
// 4. Reservation statistics by status
// ---------------------------------------------------------------------------

/// Reservations grouped by status: count and summed revenue rounded to two
/// decimals, most frequent status first. The overall document count is
/// fetched separately by the handler.
pub fn reservation_status_stats_pipeline() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$statut", "nombre": { "$sum": 1 }, "revenu": { "$sum": "$prixTotal" } } },
        doc! { "$sort": { "nombre": -1 } },
        doc! { "$project": { "statut": "$_id", "nombre": 1, "revenu": { "$round": ["$revenu", 2] }, "_id": 0 } },
    ]
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusStats {
    pub statut: ReservationStatus,
    pub nombre: i64,
    pub revenu: f64,
}

// ---------------------------------------------------------------------------
// 5. Complete reservations
// ---------------------------------------------------------------------------

/// Every reservation inner-joined with its hotel and room, flattened to a
/// display subset, most recent arrival first, unpaginated.
///
/// `$unwind` on the two lookups makes the join inner: a reservation whose
/// hotel or room no longer exists is silently dropped from this report.
pub fn complete_reservations_pipeline() -> Vec<Document> {
    vec![
        doc! { "$lookup": {
            "from": "hotels",
            "localField": "hotelId",
            "foreignField": "_id",
            "as": "hotel"
        } },
        doc! { "$lookup": {
            "from": "rooms",
            "localField": "roomId",
            "foreignField": "_id",
            "as": "room"
        } },
        doc! { "$unwind": "$hotel" },
        doc! { "$unwind": "$room" },
        doc! { "$project": {
            "hotel.nom": 1,
            "hotel.etoiles": 1,
            "room.numero": 1,
            "room.type": 1,
            "client.nom": 1,
            "client.email": 1,
            "dateArrivee": 1,
            "dateDepart": 1,
            "prixTotal": 1,
            "statut": 1
        } },
        doc! { "$sort": { "dateArrivee": -1 } },
    ]
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteReservation {
    pub id: Uuid,
    pub hotel: HotelSummary,
    pub room: RoomSummary,
    pub client: ClientSummary,
    #[serde(rename = "dateArrivee", with = "datetime")]
    pub date_arrivee: DateTime<Utc>,
    #[serde(rename = "dateDepart", with = "datetime")]
    pub date_depart: DateTime<Utc>,
    #[serde(rename = "prixTotal")]
    pub prix_total: f64,
    pub statut: ReservationStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HotelSummary {
    pub nom: String,
    pub etoiles: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoomSummary {
    pub numero: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientSummary {
    pub nom: String,
    pub email: String,
}

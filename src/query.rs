//! Listing query parameters and filter construction
//!
//! One typed struct per listing endpoint. Parameters are strictly typed, so
//! an unparseable number, boolean, date or enum value rejects the request
//! with a 400 instead of silently building a filter that matches nothing.
//! Each struct knows how to turn itself into a BSON filter document.

use chrono::{DateTime, Utc};
use mongodb::bson::{Bson, Document, doc};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{ReservationStatus, RoomType, datetime};

fn default_page() -> u64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// Resolved pagination window.
///
/// 1-based page (floored to 1), default limit 10 with no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u64,
    pub limit: i64,
}

impl Page {
    pub fn new(page: u64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(0),
        }
    }

    /// Number of documents to skip: (page − 1) · limit.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit as u64)
    }
}

/// Inclusive `$gte`/`$lte` range over a field, when either bound is given.
fn range_filter<T: Into<Bson>>(min: Option<T>, max: Option<T>) -> Option<Document> {
    if min.is_none() && max.is_none() {
        return None;
    }
    let mut range = Document::new();
    if let Some(min) = min {
        range.insert("$gte", min);
    }
    if let Some(max) = max {
        range.insert("$lte", max);
    }
    Some(range)
}

/// Case-insensitive substring match.
fn substring_filter(needle: &str) -> Document {
    doc! { "$regex": needle, "$options": "i" }
}

// ---------------------------------------------------------------------------
// Hotels
// ---------------------------------------------------------------------------

/// `GET /api/hotels` — `ville`, `etoiles`, `page`, `limit`.
#[derive(Debug, Deserialize)]
pub struct HotelListParams {
    pub ville: Option<String>,
    pub etoiles: Option<i32>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl HotelListParams {
    /// The plain listing only ever shows active hotels.
    pub fn filter(&self) -> Document {
        let mut filter = doc! { "actif": true };
        if let Some(ville) = &self.ville {
            filter.insert("adresse.ville", substring_filter(ville));
        }
        if let Some(etoiles) = self.etoiles {
            filter.insert("etoiles", etoiles);
        }
        filter
    }

    pub fn page(&self) -> Page {
        Page::new(self.page, self.limit)
    }
}

/// `GET /api/hotels/recherche/avancee` — `ville`, `etoilesMin`, `etoilesMax`,
/// `actif`. Unpaginated.
#[derive(Debug, Deserialize)]
pub struct HotelSearchParams {
    pub ville: Option<String>,
    #[serde(rename = "etoilesMin")]
    pub etoiles_min: Option<i32>,
    #[serde(rename = "etoilesMax")]
    pub etoiles_max: Option<i32>,
    pub actif: Option<bool>,
}

impl HotelSearchParams {
    /// Filters on `actif = true` only when the parameter is entirely
    /// absent; an explicit value is honored as given.
    pub fn filter(&self) -> Document {
        let mut filter = doc! { "actif": self.actif.unwrap_or(true) };
        if let Some(ville) = &self.ville {
            filter.insert("adresse.ville", substring_filter(ville));
        }
        if let Some(range) = range_filter(self.etoiles_min, self.etoiles_max) {
            filter.insert("etoiles", range);
        }
        filter
    }
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// `GET /api/rooms` — `hotelId`, `type`, `prixMin`, `prixMax`, `disponible`,
/// `page`, `limit`.
#[derive(Debug, Deserialize)]
pub struct RoomListParams {
    #[serde(rename = "hotelId")]
    pub hotel_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    #[serde(rename = "prixMin")]
    pub prix_min: Option<f64>,
    #[serde(rename = "prixMax")]
    pub prix_max: Option<f64>,
    pub disponible: Option<bool>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl RoomListParams {
    pub fn filter(&self) -> Document {
        let mut filter = Document::new();
        if let Some(hotel_id) = self.hotel_id {
            filter.insert("hotelId", hotel_id.to_string());
        }
        if let Some(room_type) = self.room_type {
            filter.insert("type", room_type.as_str());
        }
        if let Some(disponible) = self.disponible {
            filter.insert("disponible", disponible);
        }
        if let Some(range) = range_filter(self.prix_min, self.prix_max) {
            filter.insert("prixNuit", range);
        }
        filter
    }

    pub fn page(&self) -> Page {
        Page::new(self.page, self.limit)
    }
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

/// `GET /api/reservations` — `statut`, `dateDebut`, `dateFin`, `page`,
/// `limit`. The date range bounds the arrival date only.
#[derive(Debug, Deserialize)]
pub struct ReservationListParams {
    pub statut: Option<ReservationStatus>,
    #[serde(rename = "dateDebut", default, deserialize_with = "datetime::deserialize_opt")]
    pub date_debut: Option<DateTime<Utc>>,
    #[serde(rename = "dateFin", default, deserialize_with = "datetime::deserialize_opt")]
    pub date_fin: Option<DateTime<Utc>>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl ReservationListParams {
    pub fn filter(&self) -> Document {
        let mut filter = Document::new();
        if let Some(statut) = self.statut {
            filter.insert("statut", statut.as_str());
        }
        let debut = self.date_debut.as_ref().map(datetime::format);
        let fin = self.date_fin.as_ref().map(datetime::format);
        if let Some(range) = range_filter(debut, fin) {
            filter.insert("dateArrivee", range);
        }
        filter
    }

    pub fn page(&self) -> Page {
        Page::new(self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel_params(value: serde_json::Value) -> HotelListParams {
        serde_json::from_value(value).expect("params should deserialize")
    }

    // --- Page ---

    #[test]
    fn page_defaults_and_skip() {
        let page = Page::new(1, 10);
        assert_eq!(page.skip(), 0);
        assert_eq!(Page::new(3, 10).skip(), 20);
        assert_eq!(Page::new(2, 2).skip(), 2);
    }

    #[test]
    fn page_zero_is_floored_to_one() {
        let page = Page::new(0, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.skip(), 0);
    }

    #[test]
    fn negative_limit_is_clamped() {
        let page = Page::new(2, -5);
        assert_eq!(page.limit, 0);
        assert_eq!(page.skip(), 0);
    }

    // --- hotels ---

    #[test]
    fn hotel_list_defaults_to_active_only() {
        let params = hotel_params(serde_json::json!({}));
        assert_eq!(params.filter(), doc! { "actif": true });
        assert_eq!(params.page(), Page::new(1, 10));
    }

    #[test]
    fn hotel_list_ville_is_case_insensitive_substring() {
        let params = hotel_params(serde_json::json!({"ville": "anne"}));
        let filter = params.filter();
        let ville = filter.get_document("adresse.ville").unwrap();
        assert_eq!(ville.get_str("$regex").unwrap(), "anne");
        assert_eq!(ville.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn hotel_list_etoiles_is_exact() {
        let params = hotel_params(serde_json::json!({"etoiles": 4}));
        assert_eq!(params.filter().get_i32("etoiles").unwrap(), 4);
    }

    #[test]
    fn hotel_search_defaults_actif_only_when_absent() {
        let absent: HotelSearchParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(absent.filter().get_bool("actif").unwrap(), true);

        let explicit: HotelSearchParams =
            serde_json::from_value(serde_json::json!({"actif": false})).unwrap();
        assert_eq!(explicit.filter().get_bool("actif").unwrap(), false);
    }

    #[test]
    fn hotel_search_star_range_is_inclusive() {
        let params: HotelSearchParams =
            serde_json::from_value(serde_json::json!({"etoilesMin": 2, "etoilesMax": 4})).unwrap();
        let range = params.filter().get_document("etoiles").unwrap().clone();
        assert_eq!(range.get_i32("$gte").unwrap(), 2);
        assert_eq!(range.get_i32("$lte").unwrap(), 4);
    }

    #[test]
    fn hotel_search_single_bound_is_allowed() {
        let params: HotelSearchParams =
            serde_json::from_value(serde_json::json!({"etoilesMin": 3})).unwrap();
        let range = params.filter().get_document("etoiles").unwrap().clone();
        assert!(range.contains_key("$gte"));
        assert!(!range.contains_key("$lte"));
    }

    // --- rooms ---

    #[test]
    fn room_list_builds_all_filters() {
        let params: RoomListParams = serde_json::from_value(serde_json::json!({
            "hotelId": "7f8a5f86-2f0b-4a3c-9a5e-1c2d3e4f5a6b",
            "type": "Suite",
            "prixMin": 50.0,
            "prixMax": 150.0,
            "disponible": true
        }))
        .unwrap();
        let filter = params.filter();
        assert_eq!(
            filter.get_str("hotelId").unwrap(),
            "7f8a5f86-2f0b-4a3c-9a5e-1c2d3e4f5a6b"
        );
        assert_eq!(filter.get_str("type").unwrap(), "Suite");
        assert_eq!(filter.get_bool("disponible").unwrap(), true);
        let prix = filter.get_document("prixNuit").unwrap();
        assert_eq!(prix.get_f64("$gte").unwrap(), 50.0);
        assert_eq!(prix.get_f64("$lte").unwrap(), 150.0);
    }

    #[test]
    fn room_list_without_params_matches_everything() {
        let params: RoomListParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(params.filter().is_empty());
    }

    // --- reservations ---

    #[test]
    fn reservation_list_statut_filter_uses_wire_spelling() {
        let params: ReservationListParams =
            serde_json::from_value(serde_json::json!({"statut": "en_attente"})).unwrap();
        assert_eq!(params.filter().get_str("statut").unwrap(), "en_attente");
    }

    #[test]
    fn reservation_date_range_bounds_arrival_only() {
        let params: ReservationListParams = serde_json::from_value(serde_json::json!({
            "dateDebut": "2024-07-01",
            "dateFin": "2024-07-31"
        }))
        .unwrap();
        let filter = params.filter();
        let arrivee = filter.get_document("dateArrivee").unwrap();
        assert_eq!(arrivee.get_str("$gte").unwrap(), "2024-07-01T00:00:00.000Z");
        assert_eq!(arrivee.get_str("$lte").unwrap(), "2024-07-31T00:00:00.000Z");
        assert!(!filter.contains_key("dateDepart"));
    }
}

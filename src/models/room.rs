//! Room document and create-payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{datetime, validation};
use crate::error::ApiError;

/// A room as stored in the `rooms` collection.
///
/// `hotel_id` is an opaque reference: nothing checks that the hotel exists,
/// and deleting a hotel leaves its rooms in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    #[serde(rename = "hotelId")]
    pub hotel_id: Uuid,
    pub numero: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(rename = "prixNuit")]
    pub prix_nuit: f64,
    pub disponible: bool,
    pub capacite: i32,
    #[serde(rename = "createdAt", with = "datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub const COLLECTION: &'static str = "rooms";
}

/// Room categories. Deserialization enforces membership: any other value in
/// a payload or query string is a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    Simple,
    Double,
    Suite,
    Famille,
}

impl RoomType {
    /// The wire/store spelling of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Simple => "Simple",
            RoomType::Double => "Double",
            RoomType::Suite => "Suite",
            RoomType::Famille => "Famille",
        }
    }
}

/// Create payload for `POST /api/rooms`.
#[derive(Debug, Deserialize)]
pub struct CreateRoom {
    #[serde(rename = "hotelId")]
    pub hotel_id: Option<Uuid>,
    pub numero: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    #[serde(rename = "prixNuit")]
    pub prix_nuit: Option<f64>,
    pub disponible: Option<bool>,
    pub capacite: Option<i32>,
}

impl CreateRoom {
    /// Validate and build the document to insert.
    ///
    /// The presence check treats a numeric `0` and an empty string as
    /// absent, so `capacite: 0` or `prixNuit: 0` fail with
    /// "Champs manquants" rather than reaching the range rules.
    /// Default: `disponible` = true.
    pub fn into_room(self) -> Result<Room, ApiError> {
        let (Some(hotel_id), Some(numero), Some(room_type), Some(prix_nuit), Some(capacite)) = (
            self.hotel_id,
            self.numero,
            self.room_type,
            self.prix_nuit,
            self.capacite,
        ) else {
            return Err(validation::champs_manquants());
        };
        if numero.is_empty() || prix_nuit == 0.0 || capacite == 0 {
            return Err(validation::champs_manquants());
        }
        if prix_nuit < 0.0 {
            return Err(ApiError::Validation(
                "Le champ 'prixNuit' doit être positif ou nul".to_string(),
            ));
        }
        if capacite < 1 {
            return Err(ApiError::Validation(
                "Le champ 'capacite' doit être au moins 1".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Room {
            id: Uuid::new_v4(),
            hotel_id,
            numero,
            room_type,
            prix_nuit,
            disponible: self.disponible.unwrap_or(true),
            capacite,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "hotelId": "7f8a5f86-2f0b-4a3c-9a5e-1c2d3e4f5a6b",
            "numero": "204",
            "type": "Double",
            "prixNuit": 95.5,
            "capacite": 2
        })
    }

    fn create(value: serde_json::Value) -> Result<Room, ApiError> {
        serde_json::from_value::<CreateRoom>(value)
            .expect("payload should deserialize")
            .into_room()
    }

    #[test]
    fn valid_payload_builds_room_with_defaults() {
        let room = create(payload()).unwrap();
        assert_eq!(room.numero, "204");
        assert_eq!(room.room_type, RoomType::Double);
        assert!(room.disponible);
    }

    #[test]
    fn each_missing_field_is_rejected() {
        for field in ["hotelId", "numero", "type", "prixNuit", "capacite"] {
            let mut value = payload();
            value.as_object_mut().unwrap().remove(field);
            let err = create(value).unwrap_err();
            assert_eq!(err.to_string(), "Champs manquants", "field: {field}");
        }
    }

    #[test]
    fn capacite_zero_counts_as_missing() {
        let mut value = payload();
        value["capacite"] = json!(0);
        let err = create(value).unwrap_err();
        assert_eq!(err.to_string(), "Champs manquants");
    }

    #[test]
    fn prix_nuit_zero_counts_as_missing() {
        let mut value = payload();
        value["prixNuit"] = json!(0);
        let err = create(value).unwrap_err();
        assert_eq!(err.to_string(), "Champs manquants");
    }

    #[test]
    fn empty_numero_counts_as_missing() {
        let mut value = payload();
        value["numero"] = json!("");
        assert!(create(value).is_err());
    }

    #[test]
    fn negative_prix_nuit_is_rejected_with_range_message() {
        let mut value = payload();
        value["prixNuit"] = json!(-10.0);
        let err = create(value).unwrap_err();
        assert_eq!(err.to_string(), "Le champ 'prixNuit' doit être positif ou nul");
    }

    #[test]
    fn unknown_room_type_fails_deserialization() {
        let mut value = payload();
        value["type"] = json!("Penthouse");
        assert!(serde_json::from_value::<CreateRoom>(value).is_err());
    }

    #[test]
    fn room_type_serializes_capitalized() {
        assert_eq!(serde_json::to_value(RoomType::Famille).unwrap(), json!("Famille"));
    }
}

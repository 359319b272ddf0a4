//! Reservation document and create-payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{datetime, validation};
use crate::error::ApiError;

/// A reservation as stored in the `reservations` collection.
///
/// `hotel_id` and `room_id` are opaque references. There is no availability
/// or overlap check: two reservations for the same room and dates can
/// coexist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    #[serde(rename = "hotelId")]
    pub hotel_id: Uuid,
    #[serde(rename = "roomId")]
    pub room_id: Uuid,
    pub client: Client,
    #[serde(rename = "dateArrivee", with = "datetime")]
    pub date_arrivee: DateTime<Utc>,
    #[serde(rename = "dateDepart", with = "datetime")]
    pub date_depart: DateTime<Utc>,
    #[serde(rename = "prixTotal")]
    pub prix_total: f64,
    pub statut: ReservationStatus,
    #[serde(rename = "createdAt", with = "datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub const COLLECTION: &'static str = "reservations";
}

/// Contact details of the booking client, embedded in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub nom: String,
    pub email: String,
    pub telephone: String,
}

/// Reservation lifecycle. A plain status field — transitions are free-form,
/// set through partial updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    EnAttente,
    Confirmee,
    Annulee,
}

impl ReservationStatus {
    /// The wire/store spelling of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::EnAttente => "en_attente",
            ReservationStatus::Confirmee => "confirmee",
            ReservationStatus::Annulee => "annulee",
        }
    }
}

/// Create payload for `POST /api/reservations`.
#[derive(Debug, Deserialize)]
pub struct CreateReservation {
    #[serde(rename = "hotelId")]
    pub hotel_id: Option<Uuid>,
    #[serde(rename = "roomId")]
    pub room_id: Option<Uuid>,
    pub client: Option<CreateClient>,
    #[serde(rename = "dateArrivee", default, deserialize_with = "datetime::deserialize_opt")]
    pub date_arrivee: Option<DateTime<Utc>>,
    #[serde(rename = "dateDepart", default, deserialize_with = "datetime::deserialize_opt")]
    pub date_depart: Option<DateTime<Utc>>,
    #[serde(rename = "prixTotal")]
    pub prix_total: Option<f64>,
    pub statut: Option<ReservationStatus>,
}

#[derive(Debug, Deserialize)]
pub struct CreateClient {
    pub nom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
}

impl CreateReservation {
    /// Validate and build the document to insert.
    ///
    /// Presence first (a numeric `0` for `prixTotal` counts as absent), then
    /// the client's email syntax. No ordering check is applied between the
    /// arrival and departure dates. Default: `statut` = en_attente.
    pub fn into_reservation(self) -> Result<Reservation, ApiError> {
        let (
            Some(hotel_id),
            Some(room_id),
            Some(client),
            Some(date_arrivee),
            Some(date_depart),
            Some(prix_total),
        ) = (
            self.hotel_id,
            self.room_id,
            self.client,
            self.date_arrivee,
            self.date_depart,
            self.prix_total,
        )
        else {
            return Err(validation::champs_manquants());
        };
        if prix_total == 0.0 {
            return Err(validation::champs_manquants());
        }
        let (Some(nom), Some(email), Some(telephone)) =
            (client.nom, client.email, client.telephone)
        else {
            return Err(validation::champs_manquants());
        };
        if nom.is_empty() || telephone.is_empty() {
            return Err(validation::champs_manquants());
        }
        validation::check_email(&email)?;
        if prix_total < 0.0 {
            return Err(ApiError::Validation(
                "Le champ 'prixTotal' doit être positif ou nul".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Reservation {
            id: Uuid::new_v4(),
            hotel_id,
            room_id,
            client: Client {
                nom,
                email,
                telephone,
            },
            date_arrivee,
            date_depart,
            prix_total,
            statut: self.statut.unwrap_or(ReservationStatus::EnAttente),
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
            "roomId": "0e1d2c3b-4a5f-6e7d-8c9b-a0b1c2d3e4f5",
            "client": {
                "nom": "Marie Lefèvre",
                "email": "marie.lefevre@example.fr",
                "telephone": "+33 6 12 34 56 78"
            },
            "dateArrivee": "2024-07-01",
            "dateDepart": "2024-07-08",
            "prixTotal": 665.0
        })
    }

    fn create(value: serde_json::Value) -> Result<Reservation, ApiError> {
        serde_json::from_value::<CreateReservation>(value)
            .expect("payload should deserialize")
            .into_reservation()
    }

    #[test]
    fn valid_payload_defaults_to_en_attente() {
        let reservation = create(payload()).unwrap();
        assert_eq!(reservation.statut, ReservationStatus::EnAttente);
        assert_eq!(reservation.client.nom, "Marie Lefèvre");
    }

    #[test]
    fn explicit_statut_is_kept() {
        let mut value = payload();
        value["statut"] = json!("confirmee");
        assert_eq!(create(value).unwrap().statut, ReservationStatus::Confirmee);
    }

    #[test]
    fn each_missing_field_is_rejected() {
        for field in ["hotelId", "roomId", "client", "dateArrivee", "dateDepart", "prixTotal"] {
            let mut value = payload();
            value.as_object_mut().unwrap().remove(field);
            let err = create(value).unwrap_err();
            assert_eq!(err.to_string(), "Champs manquants", "field: {field}");
        }
    }

    #[test]
    fn prix_total_zero_counts_as_missing() {
        let mut value = payload();
        value["prixTotal"] = json!(0);
        assert_eq!(create(value).unwrap_err().to_string(), "Champs manquants");
    }

    #[test]
    fn incomplete_client_is_rejected() {
        let mut value = payload();
        value["client"].as_object_mut().unwrap().remove("telephone");
        assert_eq!(create(value).unwrap_err().to_string(), "Champs manquants");
    }

    #[test]
    fn invalid_client_email_is_rejected() {
        let mut value = payload();
        value["client"]["email"] = json!("marie.lefevre");
        assert_eq!(create(value).unwrap_err().to_string(), "Email invalide");
    }

    #[test]
    fn departure_before_arrival_is_accepted() {
        let mut value = payload();
        value["dateArrivee"] = json!("2024-07-08");
        value["dateDepart"] = json!("2024-07-01");
        assert!(create(value).is_ok());
    }

    #[test]
    fn statut_wire_values_are_snake_case() {
        assert_eq!(
            serde_json::to_value(ReservationStatus::EnAttente).unwrap(),
            json!("en_attente")
        );
        assert_eq!(
            serde_json::to_value(ReservationStatus::Annulee).unwrap(),
            json!("annulee")
        );
    }

    #[test]
    fn unknown_statut_fails_deserialization() {
        let mut value = payload();
        value["statut"] = json!("archivee");
        assert!(serde_json::from_value::<CreateReservation>(value).is_err());
    }
}

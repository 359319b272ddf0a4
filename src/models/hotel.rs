//! Hotel document and create-payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{datetime, validation};
use crate::error::ApiError;

/// A hotel as stored in the `hotels` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub id: Uuid,
    pub nom: String,
    pub adresse: Adresse,
    pub telephone: String,
    pub email: String,
    pub etoiles: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub actif: bool,
    #[serde(rename = "createdAt", with = "datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Hotel {
    pub const COLLECTION: &'static str = "hotels";
}

/// Postal address, embedded in the hotel document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adresse {
    pub rue: String,
    pub ville: String,
    #[serde(rename = "codePostal")]
    pub code_postal: String,
    pub pays: String,
}

/// Create payload for `POST /api/hotels`.
///
/// All fields optional so that presence can be checked centrally; unknown
/// fields are silently dropped.
#[derive(Debug, Deserialize)]
pub struct CreateHotel {
    pub nom: Option<String>,
    pub adresse: Option<CreateAdresse>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub etoiles: Option<i32>,
    pub description: Option<String>,
    pub actif: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAdresse {
    pub rue: Option<String>,
    pub ville: Option<String>,
    #[serde(rename = "codePostal")]
    pub code_postal: Option<String>,
    pub pays: Option<String>,
}

impl CreateHotel {
    /// Validate and build the document to insert.
    ///
    /// Rules, in order: required text fields, email syntax, star rating in
    /// 1..=5. Defaults: `pays` = "France", `actif` = true.
    pub fn into_hotel(self) -> Result<Hotel, ApiError> {
        let nom = validation::required_text(self.nom, "nom")?;
        let adresse = self.adresse.ok_or_else(|| validation::missing("adresse"))?;
        let rue = validation::required_text(adresse.rue, "adresse.rue")?;
        let ville = validation::required_text(adresse.ville, "adresse.ville")?;
        let code_postal = validation::required_text(adresse.code_postal, "adresse.codePostal")?;
        let telephone = validation::required_text(self.telephone, "telephone")?;
        let email = validation::required_text(self.email, "email")?;
        validation::check_email(&email)?;
        let etoiles = self.etoiles.ok_or_else(|| validation::missing("etoiles"))?;
        if !(1..=5).contains(&etoiles) {
            return Err(ApiError::Validation(
                "Le champ 'etoiles' doit être entre 1 et 5".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Hotel {
            id: Uuid::new_v4(),
            nom: nom.trim().to_string(),
            adresse: Adresse {
                rue,
                ville,
                code_postal,
                pays: adresse.pays.unwrap_or_else(|| "France".to_string()),
            },
            telephone,
            email,
            etoiles,
            description: self.description,
            actif: self.actif.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }
}

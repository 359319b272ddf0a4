//! Domain documents and their create-payloads
//!
//! Each entity comes in two shapes: the stored document (`Hotel`, `Room`,
//! `Reservation`) and a create-DTO (`CreateHotel`, …) whose fields are all
//! optional. The DTO's `into_*` method runs the entity's validation rules —
//! first failing rule wins, one French message — applies defaults, and
//! stamps id + timestamps. Updates do not go through the DTOs: a PUT body is
//! merged field-by-field with no validation.

mod hotel;
mod reservation;
mod room;

pub use hotel::{Adresse, CreateAdresse, CreateHotel, Hotel};
pub use reservation::{Client, CreateClient, CreateReservation, Reservation, ReservationStatus};
pub use room::{CreateRoom, Room, RoomType};

/// Date (de)serialization for the wire and the store.
///
/// Serializes as RFC 3339 with milliseconds (`2024-01-15T00:00:00.000Z`);
/// accepts RFC 3339 or a bare `YYYY-MM-DD` (read as midnight UTC) on input.
/// Keeping every stored date in the same textual format makes `$gte`/`$lte`
/// and sorting behave chronologically.
pub mod datetime {
    use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Parse a date string, RFC 3339 or `YYYY-MM-DD`.
    pub fn parse(value: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.with_timezone(&Utc));
        }
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
        Some(date.and_hms_opt(0, 0, 0)?.and_utc())
    }

    /// Render a date the way it is stored.
    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("date invalide: {raw}")))
    }

    /// `deserialize_with` helper for `Option<DateTime<Utc>>` fields.
    pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => parse(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("date invalide: {s}"))),
        }
    }
}

/// Shared validation helpers used by the create-DTOs.
pub(crate) mod validation {
    use crate::error::ApiError;
    use validator::ValidateEmail;

    pub fn missing(field: &str) -> ApiError {
        ApiError::Validation(format!("Le champ '{field}' est requis"))
    }

    /// Grouped presence failure, one message for the whole payload.
    pub fn champs_manquants() -> ApiError {
        ApiError::Validation("Champs manquants".to_string())
    }

    /// A required text field: present and non-blank.
    pub fn required_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
        match value {
            Some(s) if !s.trim().is_empty() => Ok(s),
            _ => Err(missing(field)),
        }
    }

    /// Syntactic email check (`local@domain.tld`).
    pub fn check_email(value: &str) -> Result<(), ApiError> {
        if value.validate_email() {
            Ok(())
        } else {
            Err(ApiError::Validation("Email invalide".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn datetime_parses_rfc3339() {
        let dt = datetime::parse("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn datetime_parses_bare_date_as_midnight_utc() {
        let dt = datetime::parse("2024-01-15").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn datetime_rejects_garbage() {
        assert!(datetime::parse("pas-une-date").is_none());
        assert!(datetime::parse("15/01/2024").is_none());
    }

    #[test]
    fn datetime_format_is_sortable() {
        let early = datetime::format(&Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
        let late = datetime::format(&Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap());
        assert!(early < late, "same-format dates must sort chronologically");
        assert_eq!(early, "2024-01-15T00:00:00.000Z");
    }

    #[test]
    fn required_text_rejects_blank() {
        assert!(validation::required_text(Some("  ".into()), "nom").is_err());
        assert!(validation::required_text(None, "nom").is_err());
        assert_eq!(
            validation::required_text(Some("Hôtel du Lac".into()), "nom").unwrap(),
            "Hôtel du Lac"
        );
    }

    #[test]
    fn check_email_accepts_plain_address() {
        assert!(validation::check_email("contact@hotel-du-lac.fr").is_ok());
    }

    #[test]
    fn check_email_rejects_missing_at() {
        assert!(validation::check_email("contact.hotel-du-lac.fr").is_err());
    }
}

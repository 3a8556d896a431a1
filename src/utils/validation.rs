//! Utilidades de validación
//!
//! Funciones helper para validación de campos de conductores y para la
//! conversión de las fechas que llegan como string desde el gateway.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]{6,14}$").unwrap();
}

/// Validar que un string no esté vacío (ni sea sólo espacios)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Validar número de teléfono: dígitos con prefijo internacional opcional
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if !PHONE_REGEX.is_match(value) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        error.message = Some("must contain 6 to 14 digits, optionally prefixed by '+'".into());
        return Err(error);
    }
    Ok(())
}

/// Convierte una fecha en formato string a `DateTime<Utc>`.
///
/// Acepta RFC 3339 (`2027-01-31T10:00:00Z`), fecha y hora sin zona
/// (`2027-01-31T10:00:00`, interpretada como UTC) y fecha simple
/// (`2027-01-31`, medianoche UTC).
pub fn parse_date_string(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_date_string("2027-03-01T10:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
        assert_eq!(dt.day(), 1);
    }

    #[test]
    fn test_parse_plain_date_is_midnight_utc() {
        let dt = parse_date_string("2027-03-01").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2027, 3, 1));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_naive_datetime() {
        let dt = parse_date_string(" 2027-03-01T23:59:58 ").unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (23, 59, 58));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date_string("not-a-date").is_none());
        assert!(parse_date_string("2027-13-45").is_none());
        assert!(parse_date_string("").is_none());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+1234567890").is_ok());
        assert!(validate_phone("5551234").is_ok());
        assert!(validate_phone("12ab").is_err());
        assert!(validate_phone("+").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Juan").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}

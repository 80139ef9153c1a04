//! Teacher identity rules: cedula format, email and display names.
//!
//! Also hosts the small field validators (length, range) shared by every
//! entity DTO so the API layer can reject bad input before touching the
//! database.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

use crate::error::CoreError;

/// Venezuelan cedula: `V-` followed by 7 or 8 digits (e.g. `V-12345678`).
pub const CEDULA_PATTERN: &str = r"^V-\d{7,8}$";

/// Maximum stored length of a cedula.
pub const CEDULA_MAX_LEN: usize = 20;

static CEDULA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CEDULA_PATTERN).expect("valid regex"));

/// Validate a cedula string as typed at login or registration.
pub fn validate_cedula(cedula: &str) -> Result<(), CoreError> {
    if cedula.trim().is_empty() {
        return Err(CoreError::invalid("cedula", "La cédula es requerida."));
    }
    if cedula.chars().count() > CEDULA_MAX_LEN {
        return Err(CoreError::invalid(
            "cedula",
            format!("La cédula no puede tener más de {CEDULA_MAX_LEN} caracteres."),
        ));
    }
    if !CEDULA_RE.is_match(cedula) {
        return Err(CoreError::invalid(
            "cedula",
            "Ingrese una cédula venezolana válida (Ej: V-12345678)",
        ));
    }
    Ok(())
}

/// Validate a teacher email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.chars().count() > 254 || !email.validate_email() {
        return Err(CoreError::invalid(
            "email",
            "Ingrese un correo electrónico válido",
        ));
    }
    Ok(())
}

/// Display name used on reports and in the session info payload.
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.trim(), last_name.trim())
}

/// Reject empty values and values longer than `max` characters.
pub fn validate_text(field: &'static str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid(field, "Este campo es requerido."));
    }
    if value.chars().count() > max {
        return Err(CoreError::invalid(
            field,
            format!("No puede tener más de {max} caracteres."),
        ));
    }
    Ok(())
}

/// Reject values outside the inclusive `[min, max]` range.
pub fn validate_range(field: &'static str, value: i16, min: i16, max: i16) -> Result<(), CoreError> {
    if !(min..=max).contains(&value) {
        return Err(CoreError::invalid(
            field,
            format!("Debe estar entre {min} y {max} (recibido: {value})."),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_seven_and_eight_digit_cedulas() {
        assert!(validate_cedula("V-1234567").is_ok());
        assert!(validate_cedula("V-28318187").is_ok());
    }

    #[test]
    fn rejects_malformed_cedulas() {
        for bad in ["", "28318187", "E-28318187", "V-123456", "V-123456789", "v-28318187", "V28318187"] {
            assert_matches!(
                validate_cedula(bad),
                Err(CoreError::InvalidField { field: "cedula", .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("sidesrev@gmail.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn full_name_joins_trimmed_parts() {
        assert_eq!(full_name(" Ricardo", "Marin "), "Ricardo Marin");
    }

    #[test]
    fn text_length_limits() {
        assert!(validate_text("name", "Matemática I", 32).is_ok());
        assert!(validate_text("name", "   ", 32).is_err());
        // Counted in characters, not bytes.
        assert!(validate_text("name", &"á".repeat(32), 32).is_ok());
        assert!(validate_text("name", &"a".repeat(33), 32).is_err());
    }

    #[test]
    fn range_is_inclusive() {
        assert!(validate_range("credits", 1, 1, 10).is_ok());
        assert!(validate_range("credits", 10, 1, 10).is_ok());
        assert_matches!(
            validate_range("credits", 11, 1, 10),
            Err(CoreError::InvalidField { field: "credits", .. })
        );
    }

    #[test]
    fn field_messages_are_in_spanish() {
        let message = |err: CoreError| match err {
            CoreError::InvalidField { message, .. } => message,
            other => panic!("unexpected error {other:?}"),
        };
        assert_eq!(message(validate_text("title", " ", 32).unwrap_err()), "Este campo es requerido.");
        assert_eq!(
            message(validate_text("title", &"a".repeat(33), 32).unwrap_err()),
            "No puede tener más de 32 caracteres."
        );
        assert_eq!(
            message(validate_range("credits", 0, 1, 10).unwrap_err()),
            "Debe estar entre 1 y 10 (recibido: 0)."
        );
        assert_eq!(
            message(validate_email("x").unwrap_err()),
            "Ingrese un correo electrónico válido"
        );
    }
}

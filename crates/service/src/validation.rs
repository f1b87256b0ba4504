//! Request validation.
//!
//! Rules live on the wire message types as `validator` attributes; this module
//! runs them and folds the first violation into [`ServiceError::Validation`].
//! The field rules shared by several messages are defined here as well.

use std::borrow::Cow;

use models::enums::Currency;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::errors::ServiceError;

static TIMEZONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+(?:/[A-Za-z0-9_+\-]+)*$").expect("timezone regex"));
static LANGUAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]{2}(?:-[A-Z]{2})?$").expect("language regex"));

/// Run the declared rules of `request`.
///
/// When several fields fail, the one reported is the first by field name so
/// the message is stable across runs.
pub fn validate<T: Validate>(request: &T) -> Result<(), ServiceError> {
    let errors = match request.validate() {
        Ok(()) => return Ok(()),
        Err(errors) => errors,
    };
    let mut fields: Vec<(String, Vec<ValidationError>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs.clone()))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .first()
        .and_then(|(field, errs)| errs.first().map(|e| format!("{}: {}", field, describe(e))))
        .unwrap_or_else(|| "invalid request".to_string());
    warn!(%message, "validation failed");
    Err(ServiceError::Validation(message))
}

fn describe(error: &ValidationError) -> String {
    match &error.message {
        Some(msg) => msg.to_string(),
        None => match error.code.as_ref() {
            "length" => "length out of range".to_string(),
            other => format!("invalid value ({})", other),
        },
    }
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Account identifiers travel as strings in the hyphenated 8-4-4-4-12 form.
pub fn parse_account_id(raw: &str) -> Result<Uuid, ServiceError> {
    let invalid = || ServiceError::Validation("Invalid Account ID format. Must be a valid UUID.".into());
    // braced, urn and simple forms are also accepted by `Uuid::parse_str`
    if raw.len() != 36 {
        return Err(invalid());
    }
    Uuid::parse_str(raw).map_err(|_| invalid())
}

pub fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    code.parse::<Currency>()
        .map(|_| ())
        .map_err(|_| rule("currency", "must be one of KZT, USD, EUR, RUB"))
}

pub fn validate_timezone(zone: &str) -> Result<(), ValidationError> {
    if TIMEZONE_RE.is_match(zone) {
        Ok(())
    } else {
        Err(rule("timezone", "must be an IANA zone name such as Asia/Almaty"))
    }
}

pub fn validate_language(tag: &str) -> Result<(), ValidationError> {
    if LANGUAGE_RE.is_match(tag) {
        Ok(())
    } else {
        Err(rule("language", "must be a locale tag such as ru or en-US"))
    }
}

pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if (1..=100).contains(&len) {
        Ok(())
    } else {
        Err(rule("length", "must be 1 to 100 characters"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Probe {
        #[validate(custom(function = "validate_language"))]
        language: String,
        #[validate(custom(function = "validate_currency_code"))]
        currency: String,
    }

    #[test]
    fn first_failing_field_by_name_is_reported() {
        let probe = Probe { language: "english".into(), currency: "BTC".into() };
        match validate(&probe) {
            Err(ServiceError::Validation(msg)) => assert!(msg.starts_with("currency:"), "{msg}"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn valid_probe_passes() {
        let probe = Probe { language: "en-US".into(), currency: "EUR".into() };
        assert!(validate(&probe).is_ok());
    }

    #[test]
    fn timezone_and_language_rules() {
        assert!(validate_timezone("Asia/Almaty").is_ok());
        assert!(validate_timezone("America/Argentina/Buenos_Aires").is_ok());
        assert!(validate_timezone("UTC").is_ok());
        assert!(validate_timezone("Asia Almaty").is_err());
        assert!(validate_timezone("").is_err());
        assert!(validate_language("ru").is_ok());
        assert!(validate_language("RU").is_err());
        assert!(validate_language("en-us").is_err());
    }

    #[test]
    fn display_name_is_trimmed() {
        assert!(validate_display_name("  ").is_err());
        assert!(validate_display_name(" Kaspi Gold ").is_ok());
        assert!(validate_display_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn malformed_account_id_is_validation_error() {
        assert!(matches!(parse_account_id("not-a-uuid"), Err(ServiceError::Validation(_))));
        assert!(matches!(parse_account_id(""), Err(ServiceError::Validation(_))));
        let id = Uuid::new_v4();
        assert_eq!(parse_account_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn only_hyphenated_account_ids_are_accepted() {
        let id = Uuid::new_v4();
        for raw in [
            id.simple().to_string(),
            id.braced().to_string(),
            id.urn().to_string(),
            format!(" {}", id),
        ] {
            assert!(matches!(parse_account_id(&raw), Err(ServiceError::Validation(_))), "{raw}");
        }
        assert_eq!(parse_account_id(&id.hyphenated().to_string().to_uppercase()).unwrap(), id);
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::validation::{validate_currency_code, validate_language, validate_timezone};
use crate::wire::Timestamp;

/// UI theme on the wire; `THEME_UNSPECIFIED` is what an omitted field decodes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Theme {
    #[default]
    ThemeUnspecified,
    Light,
    Dark,
    System,
}

fn validate_theme_specified(theme: &Theme) -> Result<(), ValidationError> {
    if *theme == Theme::ThemeUnspecified {
        return Err(ValidationError::new("theme").with_message("must be LIGHT, DARK or SYSTEM".into()));
    }
    Ok(())
}

/// A present but empty string decodes as absent.
fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Create input. Omitted fields decode to their zero values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserProfileRequest {
    #[validate(custom(function = "validate_currency_code"))]
    pub default_currency: String,
    pub balance_visibility: bool,
    #[validate(length(min = 1, max = 50), custom(function = "validate_timezone"))]
    pub timezone: String,
    #[validate(custom(function = "validate_language"))]
    pub language: String,
    /// Unspecified means `SYSTEM`.
    pub theme: Theme,
    pub notify_on_budget_limit: bool,
    pub onboarding_completed: bool,
}

/// Partial update: `None` leaves the stored value untouched, a present value
/// must satisfy the same rule as on create. Empty strings on the wire are
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserProfileRequest {
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_currency_code"))]
    pub default_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_visibility: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50), custom(function = "validate_timezone"))]
    pub timezone: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_language"))]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_theme_specified"))]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_on_budget_limit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub user_id: String,
    pub default_currency: String,
    pub balance_visibility: bool,
    pub timezone: String,
    pub language: String,
    pub theme: Theme,
    pub notify_on_budget_limit: bool,
    pub onboarding_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ServiceError;
    use crate::validation::validate;

    fn valid_create() -> CreateUserProfileRequest {
        CreateUserProfileRequest {
            default_currency: "KZT".into(),
            timezone: "Asia/Almaty".into(),
            language: "ru".into(),
            theme: Theme::Dark,
            ..Default::default()
        }
    }

    #[test]
    fn create_accepts_complete_request() {
        assert!(validate(&valid_create()).is_ok());
    }

    #[test]
    fn create_rejects_empty_request() {
        let err = validate(&CreateUserProfileRequest::default()).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn create_rejects_unknown_currency() {
        let req = CreateUserProfileRequest { default_currency: "XYZ".into(), ..valid_create() };
        let err = validate(&req).unwrap_err();
        assert!(err.message().starts_with("default_currency"), "{}", err.message());
    }

    #[test]
    fn update_checks_only_present_fields() {
        assert!(validate(&UpdateUserProfileRequest::default()).is_ok());
        let req = UpdateUserProfileRequest { default_currency: Some("EUR".into()), ..Default::default() };
        assert!(validate(&req).is_ok());
        let req = UpdateUserProfileRequest { timezone: Some("Asia Almaty".into()), ..Default::default() };
        assert!(validate(&req).is_err());
        let req = UpdateUserProfileRequest { theme: Some(Theme::ThemeUnspecified), ..Default::default() };
        assert!(validate(&req).is_err());
    }

    #[test]
    fn empty_update_strings_decode_as_absent() {
        let req: UpdateUserProfileRequest =
            serde_json::from_str(r#"{"defaultCurrency":"EUR","timezone":"","language":""}"#).unwrap();
        assert_eq!(req.default_currency.as_deref(), Some("EUR"));
        assert!(req.timezone.is_none());
        assert!(req.language.is_none());
        assert!(validate(&req).is_ok());

        let req: UpdateUserProfileRequest = serde_json::from_str(r#"{"timezone":null}"#).unwrap();
        assert!(req.timezone.is_none());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let req: UpdateUserProfileRequest = serde_json::from_str(r#"{"defaultCurrency":"EUR","theme":"LIGHT"}"#).unwrap();
        assert_eq!(req.default_currency.as_deref(), Some("EUR"));
        assert_eq!(req.theme, Some(Theme::Light));
        assert!(req.language.is_none());

        let req: CreateUserProfileRequest = serde_json::from_str(r#"{"defaultCurrency":"KZT"}"#).unwrap();
        assert_eq!(req.theme, Theme::ThemeUnspecified);
        assert_eq!(serde_json::to_value(Theme::ThemeUnspecified).unwrap(), "THEME_UNSPECIFIED");
    }
}

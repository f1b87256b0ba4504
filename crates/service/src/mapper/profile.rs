use models::enums::AppTheme;
use models::user_profile;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::to_timestamp;
use crate::identity::Identity;
use crate::profile::domain::{CreateUserProfileRequest, Theme, UpdateUserProfileRequest, UserProfileResponse};

pub fn theme_to_entity(theme: Theme) -> AppTheme {
    match theme {
        Theme::Light => AppTheme::Light,
        Theme::Dark => AppTheme::Dark,
        Theme::System | Theme::ThemeUnspecified => AppTheme::System,
    }
}

pub fn theme_to_wire(theme: AppTheme) -> Theme {
    match theme {
        AppTheme::Light => Theme::Light,
        AppTheme::Dark => Theme::Dark,
        AppTheme::System => Theme::System,
    }
}

/// New row owned by `identity`, both timestamps set to `now`.
pub fn to_entity(identity: &Identity, req: CreateUserProfileRequest, now: DateTimeWithTimeZone) -> user_profile::Model {
    user_profile::Model {
        user_id: identity.as_str().to_string(),
        default_currency: req.default_currency,
        balance_visibility: req.balance_visibility,
        timezone: req.timezone,
        language: req.language,
        theme: theme_to_entity(req.theme),
        notify_on_budget_limit: req.notify_on_budget_limit,
        onboarding_completed: req.onboarding_completed,
        created_at: now,
        updated_at: now,
    }
}

/// Overwrite only the fields present in `req`.
pub fn apply_update(req: UpdateUserProfileRequest, entity: &mut user_profile::Model, now: DateTimeWithTimeZone) {
    if let Some(v) = req.default_currency { entity.default_currency = v; }
    if let Some(v) = req.balance_visibility { entity.balance_visibility = v; }
    if let Some(v) = req.timezone { entity.timezone = v; }
    if let Some(v) = req.language { entity.language = v; }
    if let Some(v) = req.theme { entity.theme = theme_to_entity(v); }
    if let Some(v) = req.notify_on_budget_limit { entity.notify_on_budget_limit = v; }
    if let Some(v) = req.onboarding_completed { entity.onboarding_completed = v; }
    entity.updated_at = now;
}

pub fn to_response(entity: &user_profile::Model) -> UserProfileResponse {
    UserProfileResponse {
        user_id: entity.user_id.clone(),
        default_currency: entity.default_currency.clone(),
        balance_visibility: entity.balance_visibility,
        timezone: entity.timezone.clone(),
        language: entity.language.clone(),
        theme: theme_to_wire(entity.theme),
        notify_on_budget_limit: entity.notify_on_budget_limit,
        onboarding_completed: entity.onboarding_completed,
        created_at: to_timestamp(Some(&entity.created_at)),
        updated_at: to_timestamp(Some(&entity.updated_at)),
    }
}

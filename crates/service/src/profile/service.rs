use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{CreateUserProfileRequest, UpdateUserProfileRequest, UserProfileResponse};
use crate::errors::ServiceError;
use crate::identity::Identity;
use crate::mapper::{self, profile::to_response};
use crate::repository::{Access, ProfileRepository, Store};
use crate::validation::validate;
use crate::wire::Empty;

/// Profile operations for the authenticated caller. The caller can only ever
/// reach the profile keyed by its own identity.
pub struct ProfileService<S: Store + ?Sized> {
    store: Arc<S>,
}

impl<S: Store + ?Sized> ProfileService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    /// Create the caller's profile.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::identity::Identity;
    /// use service::profile::{ProfileService, domain::{CreateUserProfileRequest, Theme}};
    /// use service::repo::MemoryStore;
    ///
    /// let svc = ProfileService::new(Arc::new(MemoryStore::new()));
    /// let req = CreateUserProfileRequest {
    ///     default_currency: "KZT".into(),
    ///     timezone: "Asia/Almaty".into(),
    ///     language: "ru".into(),
    ///     theme: Theme::Dark,
    ///     ..Default::default()
    /// };
    /// let profile = tokio_test::block_on(svc.create(&Identity::new("u1"), req)).unwrap();
    /// assert_eq!(profile.user_id, "u1");
    /// ```
    #[instrument(skip(self, identity, req), fields(user_id = %identity))]
    pub async fn create(&self, identity: &Identity, req: CreateUserProfileRequest) -> Result<UserProfileResponse, ServiceError> {
        validate(&req)?;
        let uow = self.store.begin(Access::ReadWrite).await?;
        if uow.find_profile(identity.as_str()).await?.is_some() {
            return Err(ServiceError::AlreadyExists(format!("User profile already exists with ID: {}", identity)));
        }
        let entity = mapper::profile::to_entity(identity, req, mapper::now());
        let saved = uow.insert_profile(entity).await?;
        uow.commit().await?;
        info!(theme = %saved.theme, "user_profile_created");
        Ok(to_response(&saved))
    }

    #[instrument(skip(self, identity), fields(user_id = %identity))]
    pub async fn get(&self, identity: &Identity) -> Result<UserProfileResponse, ServiceError> {
        let uow = self.store.begin(Access::ReadOnly).await?;
        let profile = uow
            .find_profile(identity.as_str())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User profile not found with ID: {}", identity)))?;
        uow.commit().await?;
        Ok(to_response(&profile))
    }

    /// Overwrite the fields present in `req`; everything else is kept.
    #[instrument(skip(self, identity, req), fields(user_id = %identity))]
    pub async fn update(&self, identity: &Identity, req: UpdateUserProfileRequest) -> Result<UserProfileResponse, ServiceError> {
        validate(&req)?;
        let uow = self.store.begin(Access::ReadWrite).await?;
        let mut profile = uow
            .find_profile(identity.as_str())
            .await?
            .ok_or_else(|| ServiceError::NotFound("User profile not found to update".into()))?;
        mapper::profile::apply_update(req, &mut profile, mapper::now());
        let saved = uow.update_profile(profile).await?;
        uow.commit().await?;
        info!("user_profile_updated");
        Ok(to_response(&saved))
    }

    /// Delete the caller's profile and, through the cascade, all its accounts.
    #[instrument(skip(self, identity), fields(user_id = %identity))]
    pub async fn delete(&self, identity: &Identity) -> Result<Empty, ServiceError> {
        let uow = self.store.begin(Access::ReadWrite).await?;
        let not_found = || ServiceError::NotFound(format!("Cannot delete. User profile not found with ID: {}", identity));
        if uow.find_profile(identity.as_str()).await?.is_none() {
            return Err(not_found());
        }
        if !uow.delete_profile(identity.as_str()).await? {
            return Err(not_found());
        }
        uow.commit().await?;
        info!("user_profile_deleted");
        Ok(Empty {})
    }
}

use async_trait::async_trait;
use models::{account, enums::BankName, user_profile};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Transaction access mode requested by a service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// Entry point to persistence: every service operation opens exactly one
/// unit of work and commits it on success.
#[async_trait]
pub trait Store: Send + Sync {
    async fn begin(&self, access: Access) -> Result<Box<dyn UnitOfWork>, ServiceError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_profile(&self, user_id: &str) -> Result<Option<user_profile::Model>, ServiceError>;
    /// Fails with `AlreadyExists` when the identity already has a profile.
    async fn insert_profile(&self, profile: user_profile::Model) -> Result<user_profile::Model, ServiceError>;
    async fn update_profile(&self, profile: user_profile::Model) -> Result<user_profile::Model, ServiceError>;
    /// Removes the profile together with its accounts.
    async fn delete_profile(&self, user_id: &str) -> Result<bool, ServiceError>;
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn list_accounts(&self, owner: &str) -> Result<Vec<account::Model>, ServiceError>;
    /// `None` both when the account does not exist and when `owner` does not hold it.
    async fn find_owned_account(&self, account_id: Uuid, owner: &str) -> Result<Option<account::Model>, ServiceError>;
    async fn account_exists_for_bank(&self, owner: &str, bank: BankName) -> Result<bool, ServiceError>;
    /// `AlreadyExists` on a duplicate (owner, bank), `NotFound` when the owner is gone.
    async fn insert_account(&self, account: account::Model) -> Result<account::Model, ServiceError>;
    async fn update_account(&self, account: account::Model) -> Result<account::Model, ServiceError>;
    async fn delete_account(&self, account_id: Uuid) -> Result<bool, ServiceError>;
}

/// One transaction over both repositories. Dropping it without `commit`
/// discards every change.
#[async_trait]
pub trait UnitOfWork: ProfileRepository + AccountRepository {
    async fn commit(self: Box<Self>) -> Result<(), ServiceError>;
}

pub(crate) const PROFILE_EXISTS: &str = "User profile already exists";
pub(crate) const ACCOUNT_EXISTS: &str = "Account from this bank already exists.";
pub(crate) const PROFILE_MISSING: &str = "User profile not found for authenticated user";

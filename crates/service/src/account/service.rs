use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{
    Account, CreateAccountRequest, DeleteAccountRequest, GetAccountRequest, ListAccountsResponse, UpdateAccountRequest,
};
use crate::errors::ServiceError;
use crate::identity::Identity;
use crate::mapper::{self, account::entity_to_message};
use crate::repository::{Access, AccountRepository, ProfileRepository, Store, UnitOfWork};
use crate::validation::{parse_account_id, validate};
use crate::wire::Empty;

const ACCOUNT_NOT_FOUND: &str = "Account not found or access denied";
const PROFILE_NOT_FOUND: &str = "User profile not found for authenticated user";

/// Account operations scoped to the caller: an account held by someone else
/// is indistinguishable from one that does not exist.
pub struct AccountService<S: Store + ?Sized> {
    store: Arc<S>,
}

async fn owned_account(
    uow: &dyn UnitOfWork,
    account_id: uuid::Uuid,
    identity: &Identity,
) -> Result<models::account::Model, ServiceError> {
    uow.find_owned_account(account_id, identity.as_str())
        .await?
        .ok_or_else(|| ServiceError::NotFound(ACCOUNT_NOT_FOUND.into()))
}

impl<S: Store + ?Sized> AccountService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    /// Link a bank account to the caller's profile; one account per bank.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::account::{AccountService, domain::{BankName, CreateAccountRequest}};
    /// use service::identity::Identity;
    /// use service::profile::{ProfileService, domain::CreateUserProfileRequest};
    /// use service::repo::MemoryStore;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let me = Identity::new("u1");
    /// let profiles = ProfileService::new(store.clone());
    /// let profile = CreateUserProfileRequest {
    ///     default_currency: "KZT".into(),
    ///     timezone: "Asia/Almaty".into(),
    ///     language: "kk".into(),
    ///     ..Default::default()
    /// };
    /// tokio_test::block_on(profiles.create(&me, profile)).unwrap();
    ///
    /// let accounts = AccountService::new(store);
    /// let req = CreateAccountRequest { bank_name: BankName::Kaspi, account_name: "Gold".into(), currency: "KZT".into() };
    /// let account = tokio_test::block_on(accounts.create(&me, req)).unwrap();
    /// assert_eq!(account.user_profile_id, "u1");
    /// ```
    #[instrument(skip(self, identity, req), fields(user_id = %identity, bank = ?req.bank_name))]
    pub async fn create(&self, identity: &Identity, req: CreateAccountRequest) -> Result<Account, ServiceError> {
        validate(&req)?;
        let uow = self.store.begin(Access::ReadWrite).await?;
        let profile = uow
            .find_profile(identity.as_str())
            .await?
            .ok_or_else(|| ServiceError::NotFound(PROFILE_NOT_FOUND.into()))?;
        let entity = mapper::account::create_request_to_entity(req, &profile.user_id, mapper::now())?;
        if uow.account_exists_for_bank(&profile.user_id, entity.bank_name).await? {
            return Err(ServiceError::AlreadyExists("Account from this bank already exists.".into()));
        }
        let saved = uow.insert_account(entity).await?;
        uow.commit().await?;
        info!(account_id = %saved.account_id, "account_created");
        Ok(entity_to_message(&saved))
    }

    #[instrument(skip(self, identity, req), fields(user_id = %identity))]
    pub async fn get(&self, identity: &Identity, req: GetAccountRequest) -> Result<Account, ServiceError> {
        let account_id = parse_account_id(&req.account_id)?;
        let uow = self.store.begin(Access::ReadOnly).await?;
        let account = owned_account(uow.as_ref(), account_id, identity).await?;
        uow.commit().await?;
        Ok(entity_to_message(&account))
    }

    /// Every account of the caller, oldest first. No profile means no accounts.
    #[instrument(skip(self, identity), fields(user_id = %identity))]
    pub async fn list(&self, identity: &Identity) -> Result<ListAccountsResponse, ServiceError> {
        let uow = self.store.begin(Access::ReadOnly).await?;
        let accounts = uow.list_accounts(identity.as_str()).await?;
        uow.commit().await?;
        Ok(ListAccountsResponse { accounts: mapper::account::entities_to_messages(&accounts) })
    }

    /// Rename an account; nothing else about it is mutable.
    #[instrument(skip(self, identity, req), fields(user_id = %identity))]
    pub async fn update(&self, identity: &Identity, req: UpdateAccountRequest) -> Result<Account, ServiceError> {
        validate(&req)?;
        let account_id = parse_account_id(&req.account_id)?;
        let uow = self.store.begin(Access::ReadWrite).await?;
        let mut account = owned_account(uow.as_ref(), account_id, identity).await?;
        mapper::account::apply_update(req, &mut account, mapper::now());
        let saved = uow.update_account(account).await?;
        uow.commit().await?;
        info!(account_id = %saved.account_id, "account_updated");
        Ok(entity_to_message(&saved))
    }

    #[instrument(skip(self, identity, req), fields(user_id = %identity))]
    pub async fn delete(&self, identity: &Identity, req: DeleteAccountRequest) -> Result<Empty, ServiceError> {
        let account_id = parse_account_id(&req.account_id)?;
        let uow = self.store.begin(Access::ReadWrite).await?;
        let account = owned_account(uow.as_ref(), account_id, identity).await?;
        if !uow.delete_account(account.account_id).await? {
            return Err(ServiceError::NotFound(ACCOUNT_NOT_FOUND.into()));
        }
        uow.commit().await?;
        info!(%account_id, "account_deleted");
        Ok(Empty {})
    }
}

//! In-memory store with the same constraints as the Postgres schema.
//!
//! Units of work are serialized: `begin` takes the state lock and stages a
//! copy, `commit` writes the copy back, drop discards it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use models::{account, enums::BankName, user_profile};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::repository::{
    Access, AccountRepository, ProfileRepository, Store, UnitOfWork, ACCOUNT_EXISTS, PROFILE_EXISTS, PROFILE_MISSING,
};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    profiles: HashMap<String, user_profile::Model>,
    accounts: HashMap<Uuid, account::Model>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Arc<AsyncMutex<MemoryState>>,
    started: AtomicUsize,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    /// Number of units of work opened so far.
    pub fn transactions_started(&self) -> usize { self.started.load(Ordering::SeqCst) }

    /// While offline every `begin` fails with a storage error.
    pub fn set_offline(&self, offline: bool) { self.offline.store(offline, Ordering::SeqCst) }

    pub async fn profile_count(&self) -> usize { self.state.lock().await.profiles.len() }

    pub async fn account_count(&self) -> usize { self.state.lock().await.accounts.len() }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self, access: Access) -> Result<Box<dyn UnitOfWork>, ServiceError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ServiceError::Db("connection refused".into()));
        }
        self.started.fetch_add(1, Ordering::SeqCst);
        let guard = self.state.clone().lock_owned().await;
        let staged = Mutex::new(guard.clone());
        Ok(Box::new(MemoryUnitOfWork { guard, staged, access }))
    }
}

pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    staged: Mutex<MemoryState>,
    access: Access,
}

impl MemoryUnitOfWork {
    fn read(&self) -> Result<MutexGuard<'_, MemoryState>, ServiceError> {
        self.staged.lock().map_err(|_| ServiceError::Internal("memory store poisoned".into()))
    }

    fn write(&self) -> Result<MutexGuard<'_, MemoryState>, ServiceError> {
        if self.access == Access::ReadOnly {
            return Err(ServiceError::Db("cannot execute write in a read-only transaction".into()));
        }
        self.read()
    }
}

#[async_trait]
impl ProfileRepository for MemoryUnitOfWork {
    async fn find_profile(&self, user_id: &str) -> Result<Option<user_profile::Model>, ServiceError> {
        Ok(self.read()?.profiles.get(user_id).cloned())
    }

    async fn insert_profile(&self, profile: user_profile::Model) -> Result<user_profile::Model, ServiceError> {
        let mut state = self.write()?;
        if state.profiles.contains_key(&profile.user_id) {
            return Err(ServiceError::AlreadyExists(PROFILE_EXISTS.into()));
        }
        state.profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    async fn update_profile(&self, profile: user_profile::Model) -> Result<user_profile::Model, ServiceError> {
        let mut state = self.write()?;
        match state.profiles.get_mut(&profile.user_id) {
            Some(slot) => {
                *slot = profile.clone();
                Ok(profile)
            }
            None => Err(ServiceError::NotFound(PROFILE_MISSING.into())),
        }
    }

    async fn delete_profile(&self, user_id: &str) -> Result<bool, ServiceError> {
        let mut state = self.write()?;
        let removed = state.profiles.remove(user_id).is_some();
        if removed {
            state.accounts.retain(|_, a| a.user_profile_id != user_id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl AccountRepository for MemoryUnitOfWork {
    async fn list_accounts(&self, owner: &str) -> Result<Vec<account::Model>, ServiceError> {
        let state = self.read()?;
        let mut accounts: Vec<_> = state.accounts.values().filter(|a| a.user_profile_id == owner).cloned().collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.account_id.cmp(&b.account_id)));
        Ok(accounts)
    }

    async fn find_owned_account(&self, account_id: Uuid, owner: &str) -> Result<Option<account::Model>, ServiceError> {
        let state = self.read()?;
        Ok(state.accounts.get(&account_id).filter(|a| a.user_profile_id == owner).cloned())
    }

    async fn account_exists_for_bank(&self, owner: &str, bank: BankName) -> Result<bool, ServiceError> {
        let state = self.read()?;
        Ok(state.accounts.values().any(|a| a.user_profile_id == owner && a.bank_name == bank))
    }

    async fn insert_account(&self, account: account::Model) -> Result<account::Model, ServiceError> {
        let mut state = self.write()?;
        if !state.profiles.contains_key(&account.user_profile_id) {
            return Err(ServiceError::NotFound(PROFILE_MISSING.into()));
        }
        let duplicate = state.accounts.contains_key(&account.account_id)
            || state
                .accounts
                .values()
                .any(|a| a.user_profile_id == account.user_profile_id && a.bank_name == account.bank_name);
        if duplicate {
            return Err(ServiceError::AlreadyExists(ACCOUNT_EXISTS.into()));
        }
        state.accounts.insert(account.account_id, account.clone());
        Ok(account)
    }

    async fn update_account(&self, account: account::Model) -> Result<account::Model, ServiceError> {
        let mut state = self.write()?;
        match state.accounts.get_mut(&account.account_id) {
            Some(slot) => {
                *slot = account.clone();
                Ok(account)
            }
            None => Err(ServiceError::NotFound("Account not found or access denied".into())),
        }
    }

    async fn delete_account(&self, account_id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.write()?.accounts.remove(&account_id).is_some())
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<(), ServiceError> {
        let MemoryUnitOfWork { mut guard, staged, .. } = *self;
        *guard = staged.into_inner().map_err(|_| ServiceError::Internal("memory store poisoned".into()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use models::enums::{AppTheme, Currency};

    fn profile(user_id: &str) -> user_profile::Model {
        let now = Utc::now().into();
        user_profile::Model {
            user_id: user_id.into(),
            default_currency: "USD".into(),
            balance_visibility: false,
            timezone: "UTC".into(),
            language: "en".into(),
            theme: AppTheme::Light,
            notify_on_budget_limit: false,
            onboarding_completed: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn account(owner: &str, bank: BankName) -> account::Model {
        let now = Utc::now().into();
        account::Model {
            account_id: Uuid::new_v4(),
            user_profile_id: owner.into(),
            bank_name: bank,
            account_name: "Card".into(),
            currency: Currency::Usd,
            first_transaction_date: None,
            last_transaction_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn changes_are_visible_only_after_commit() {
        let store = MemoryStore::new();
        {
            let uow = store.begin(Access::ReadWrite).await.unwrap();
            uow.insert_profile(profile("u1")).await.unwrap();
        }
        assert_eq!(store.profile_count().await, 0);

        let uow = store.begin(Access::ReadWrite).await.unwrap();
        uow.insert_profile(profile("u1")).await.unwrap();
        uow.commit().await.unwrap();
        assert_eq!(store.profile_count().await, 1);
        assert_eq!(store.transactions_started(), 2);
    }

    #[tokio::test]
    async fn enforces_schema_constraints() {
        let store = MemoryStore::new();
        let uow = store.begin(Access::ReadWrite).await.unwrap();
        let orphan = uow.insert_account(account("ghost", BankName::Kaspi)).await.unwrap_err();
        assert!(matches!(orphan, ServiceError::NotFound(_)));

        uow.insert_profile(profile("u1")).await.unwrap();
        assert!(matches!(uow.insert_profile(profile("u1")).await, Err(ServiceError::AlreadyExists(_))));
        uow.insert_account(account("u1", BankName::Kaspi)).await.unwrap();
        let dup = uow.insert_account(account("u1", BankName::Kaspi)).await.unwrap_err();
        assert!(matches!(dup, ServiceError::AlreadyExists(_)));
        uow.insert_account(account("u1", BankName::Forte)).await.unwrap();
        assert!(uow.account_exists_for_bank("u1", BankName::Forte).await.unwrap());
        uow.commit().await.unwrap();
        assert_eq!(store.account_count().await, 2);
    }

    #[tokio::test]
    async fn profile_delete_cascades_to_accounts() {
        let store = MemoryStore::new();
        let uow = store.begin(Access::ReadWrite).await.unwrap();
        uow.insert_profile(profile("u1")).await.unwrap();
        uow.insert_profile(profile("u2")).await.unwrap();
        uow.insert_account(account("u1", BankName::Halyk)).await.unwrap();
        uow.insert_account(account("u2", BankName::Halyk)).await.unwrap();
        assert!(uow.delete_profile("u1").await.unwrap());
        assert!(uow.list_accounts("u1").await.unwrap().is_empty());
        assert_eq!(uow.list_accounts("u2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ownership_filters_lookup() {
        let store = MemoryStore::new();
        let uow = store.begin(Access::ReadWrite).await.unwrap();
        uow.insert_profile(profile("u1")).await.unwrap();
        let acc = uow.insert_account(account("u1", BankName::Jusan)).await.unwrap();
        assert!(uow.find_owned_account(acc.account_id, "u1").await.unwrap().is_some());
        assert!(uow.find_owned_account(acc.account_id, "u2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn read_only_and_offline_modes() {
        let store = MemoryStore::new();
        let uow = store.begin(Access::ReadOnly).await.unwrap();
        assert!(matches!(uow.insert_profile(profile("u1")).await, Err(ServiceError::Db(_))));
        drop(uow);

        store.set_offline(true);
        assert!(matches!(store.begin(Access::ReadOnly).await, Err(ServiceError::Db(_))));
        assert_eq!(store.transactions_started(), 1);
    }
}

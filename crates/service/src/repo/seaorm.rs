use async_trait::async_trait;
use models::{account, enums::BankName, user_profile};
use sea_orm::{
    AccessMode, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, IntoActiveModel, SqlErr,
    TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::repository::{
    Access, AccountRepository, ProfileRepository, Store, UnitOfWork, ACCOUNT_EXISTS, PROFILE_EXISTS, PROFILE_MISSING,
};

/// Postgres-backed store sharing one connection pool.
#[derive(Clone)]
pub struct SeaOrmStore {
    pub db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl Store for SeaOrmStore {
    async fn begin(&self, access: Access) -> Result<Box<dyn UnitOfWork>, ServiceError> {
        let txn = match access {
            Access::ReadOnly => self.db.begin_with_config(None, Some(AccessMode::ReadOnly)).await?,
            Access::ReadWrite => self.db.begin().await?,
        };
        Ok(Box::new(SeaOrmUnitOfWork { txn }))
    }
}

/// Rolls back on drop unless committed.
pub struct SeaOrmUnitOfWork {
    txn: DatabaseTransaction,
}

/// Constraint violations become caller-facing kinds; anything else stays a storage error.
fn map_db_err(err: DbErr, on_unique: &str, on_foreign_key: &str) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            debug!(%detail, "unique constraint violated");
            ServiceError::AlreadyExists(on_unique.to_string())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            debug!(%detail, "foreign key violated");
            ServiceError::NotFound(on_foreign_key.to_string())
        }
        _ => match err {
            DbErr::RecordNotUpdated => ServiceError::NotFound(on_foreign_key.to_string()),
            other => other.into(),
        },
    }
}

#[async_trait]
impl ProfileRepository for SeaOrmUnitOfWork {
    async fn find_profile(&self, user_id: &str) -> Result<Option<user_profile::Model>, ServiceError> {
        Ok(user_profile::find(&self.txn, user_id).await?)
    }

    async fn insert_profile(&self, profile: user_profile::Model) -> Result<user_profile::Model, ServiceError> {
        profile
            .into_active_model()
            .reset_all()
            .insert(&self.txn)
            .await
            .map_err(|e| map_db_err(e, PROFILE_EXISTS, PROFILE_MISSING))
    }

    async fn update_profile(&self, profile: user_profile::Model) -> Result<user_profile::Model, ServiceError> {
        profile
            .into_active_model()
            .reset_all()
            .update(&self.txn)
            .await
            .map_err(|e| map_db_err(e, PROFILE_EXISTS, PROFILE_MISSING))
    }

    async fn delete_profile(&self, user_id: &str) -> Result<bool, ServiceError> {
        Ok(user_profile::delete(&self.txn, user_id).await?)
    }
}

#[async_trait]
impl AccountRepository for SeaOrmUnitOfWork {
    async fn list_accounts(&self, owner: &str) -> Result<Vec<account::Model>, ServiceError> {
        Ok(account::find_by_owner(&self.txn, owner).await?)
    }

    async fn find_owned_account(&self, account_id: Uuid, owner: &str) -> Result<Option<account::Model>, ServiceError> {
        Ok(account::find_owned(&self.txn, account_id, owner).await?)
    }

    async fn account_exists_for_bank(&self, owner: &str, bank: BankName) -> Result<bool, ServiceError> {
        Ok(account::exists_for_bank(&self.txn, owner, bank).await?)
    }

    async fn insert_account(&self, account: account::Model) -> Result<account::Model, ServiceError> {
        account
            .into_active_model()
            .reset_all()
            .insert(&self.txn)
            .await
            .map_err(|e| map_db_err(e, ACCOUNT_EXISTS, PROFILE_MISSING))
    }

    async fn update_account(&self, account: account::Model) -> Result<account::Model, ServiceError> {
        account
            .into_active_model()
            .reset_all()
            .update(&self.txn)
            .await
            .map_err(|e| map_db_err(e, ACCOUNT_EXISTS, "Account not found or access denied"))
    }

    async fn delete_account(&self, account_id: Uuid) -> Result<bool, ServiceError> {
        Ok(account::delete(&self.txn, account_id).await?)
    }
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<(), ServiceError> {
        self.txn.commit().await?;
        Ok(())
    }
}

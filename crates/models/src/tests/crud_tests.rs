use super::setup_test_db;
use crate::enums::{AppTheme, BankName, Currency};
use crate::{account, user_profile};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, Set, SqlErr};
use uuid::Uuid;

async fn insert_profile(db: &sea_orm::DatabaseConnection, user_id: &str) -> Result<user_profile::Model, DbErr> {
    let now = Utc::now().into();
    user_profile::ActiveModel {
        user_id: Set(user_id.to_string()),
        default_currency: Set("KZT".into()),
        balance_visibility: Set(true),
        timezone: Set("Asia/Almaty".into()),
        language: Set("ru".into()),
        theme: Set(AppTheme::Dark),
        notify_on_budget_limit: Set(false),
        onboarding_completed: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
}

async fn insert_account(db: &sea_orm::DatabaseConnection, owner: &str, bank: BankName) -> Result<account::Model, DbErr> {
    let now = Utc::now().into();
    account::ActiveModel {
        account_id: Set(Uuid::new_v4()),
        user_profile_id: Set(owner.to_string()),
        bank_name: Set(bank),
        account_name: Set("Main".into()),
        currency: Set(Currency::Kzt),
        first_transaction_date: Set(None),
        last_transaction_date: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
}

#[tokio::test]
async fn test_profile_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let user_id = format!("kc-{}", Uuid::new_v4());

    let created = insert_profile(&db, &user_id).await?;
    assert_eq!(created.theme, AppTheme::Dark);

    let found = user_profile::find(&db, &user_id).await?.expect("profile exists");
    assert_eq!(found.default_currency, "KZT");

    assert!(user_profile::delete(&db, &user_id).await?);
    assert!(user_profile::find(&db, &user_id).await?.is_none());
    assert!(!user_profile::delete(&db, &user_id).await?);
    Ok(())
}

#[tokio::test]
async fn test_unique_bank_per_profile() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let user_id = format!("kc-{}", Uuid::new_v4());
    insert_profile(&db, &user_id).await?;

    insert_account(&db, &user_id, BankName::Kaspi).await?;
    assert!(account::exists_for_bank(&db, &user_id, BankName::Kaspi).await?);
    assert!(!account::exists_for_bank(&db, &user_id, BankName::Halyk).await?);

    let err = insert_account(&db, &user_id, BankName::Kaspi).await.expect_err("duplicate bank");
    assert!(matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))));

    user_profile::delete(&db, &user_id).await?;
    Ok(())
}

#[tokio::test]
async fn test_owned_lookup_and_cascade() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let owner = format!("kc-{}", Uuid::new_v4());
    let stranger = format!("kc-{}", Uuid::new_v4());
    insert_profile(&db, &owner).await?;
    insert_profile(&db, &stranger).await?;

    let acc = insert_account(&db, &owner, BankName::Halyk).await?;
    assert!(account::find_owned(&db, acc.account_id, &owner).await?.is_some());
    assert!(account::find_owned(&db, acc.account_id, &stranger).await?.is_none());
    assert_eq!(account::find_by_owner(&db, &owner).await?.len(), 1);
    assert!(account::find_by_owner(&db, &stranger).await?.is_empty());

    // deleting the profile removes its accounts
    user_profile::delete(&db, &owner).await?;
    assert!(account::Entity::find_by_id(acc.account_id).one(&db).await?.is_none());

    user_profile::delete(&db, &stranger).await?;
    Ok(())
}

#[tokio::test]
async fn test_account_requires_existing_profile() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let err = insert_account(&db, &format!("ghost-{}", Uuid::new_v4()), BankName::Bcc)
        .await
        .expect_err("fk violation");
    assert!(matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))));
    Ok(())
}

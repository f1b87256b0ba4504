//! Create `accounts` table with FK to `user_profiles`.
//!
//! Deleting a profile removes its accounts.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(uuid(Accounts::AccountId).primary_key())
                    .col(string_len(Accounts::UserProfileId, 255).not_null())
                    .col(string_len(Accounts::BankName, 100).not_null())
                    .col(string_len(Accounts::AccountName, 100).not_null())
                    .col(string_len(Accounts::Currency, 3).not_null())
                    .col(
                        ColumnDef::new(Accounts::FirstTransactionDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::LastTransactionDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp_with_time_zone(Accounts::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Accounts::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_user_profile")
                            .from(Accounts::Table, Accounts::UserProfileId)
                            .to(UserProfiles::Table, UserProfiles::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Accounts::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    AccountId,
    UserProfileId,
    BankName,
    AccountName,
    Currency,
    FirstTransactionDate,
    LastTransactionDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserProfiles { Table, UserId }

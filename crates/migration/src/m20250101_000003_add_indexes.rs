use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Accounts: one account per bank per profile
        manager
            .create_index(
                Index::create()
                    .name("uniq_account_profile_bank")
                    .table(Accounts::Table)
                    .col(Accounts::UserProfileId)
                    .col(Accounts::BankName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Accounts: listing by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_account_profile")
                    .table(Accounts::Table)
                    .col(Accounts::UserProfileId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_account_profile_bank").table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_account_profile").table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Accounts { Table, UserProfileId, BankName }

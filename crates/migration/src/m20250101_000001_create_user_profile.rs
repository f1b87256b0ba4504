//! Create `user_profiles` table.
//!
//! Keyed by the identity provider's subject, so the primary key is a string.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(string_len(UserProfiles::UserId, 255).primary_key())
                    .col(string_len(UserProfiles::DefaultCurrency, 3).not_null())
                    .col(boolean(UserProfiles::BalanceVisibility).not_null().default(false))
                    .col(string_len(UserProfiles::Timezone, 50).not_null())
                    .col(string_len(UserProfiles::Language, 5).not_null())
                    .col(string_len(UserProfiles::Theme, 10).not_null())
                    .col(boolean(UserProfiles::NotifyOnBudgetLimit).not_null().default(false))
                    .col(boolean(UserProfiles::OnboardingCompleted).not_null().default(false))
                    .col(timestamp_with_time_zone(UserProfiles::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(UserProfiles::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserProfiles::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserProfiles {
    Table,
    UserId,
    DefaultCurrency,
    BalanceVisibility,
    Timezone,
    Language,
    Theme,
    NotifyOnBudgetLimit,
    OnboardingCompleted,
    CreatedAt,
    UpdatedAt,
}

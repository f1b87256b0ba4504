use sea_orm::{entity::prelude::*, sea_query::ForeignKeyAction, ConnectionTrait, PaginatorTrait, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::enums::{BankName, Currency};
use crate::user_profile;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: Uuid,
    pub user_profile_id: String,
    pub bank_name: BankName,
    pub account_name: String,
    pub currency: Currency,
    pub first_transaction_date: Option<DateTimeWithTimeZone>,
    pub last_transaction_date: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    UserProfile,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::UserProfile => Entity::belongs_to(user_profile::Entity)
                .from(Column::UserProfileId)
                .to(user_profile::Column::UserId)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<user_profile::Entity> for Entity {
    fn to() -> RelationDef { Relation::UserProfile.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Accounts of one owner, oldest first.
pub async fn find_by_owner<C: ConnectionTrait>(db: &C, owner: &str) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::UserProfileId.eq(owner))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::AccountId)
        .all(db)
        .await
}

/// Lookup that only matches when `owner` holds the account.
pub async fn find_owned<C: ConnectionTrait>(db: &C, account_id: Uuid, owner: &str) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(account_id)
        .filter(Column::UserProfileId.eq(owner))
        .one(db)
        .await
}

pub async fn exists_for_bank<C: ConnectionTrait>(db: &C, owner: &str, bank: BankName) -> Result<bool, DbErr> {
    let count = Entity::find()
        .filter(Column::UserProfileId.eq(owner))
        .filter(Column::BankName.eq(bank))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn delete<C: ConnectionTrait>(db: &C, account_id: Uuid) -> Result<bool, DbErr> {
    let res = Entity::delete_by_id(account_id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

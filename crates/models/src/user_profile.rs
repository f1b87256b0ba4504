use sea_orm::{entity::prelude::*, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::account;
use crate::enums::AppTheme;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    /// Subject issued by the identity provider.
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub default_currency: String,
    pub balance_visibility: bool,
    pub timezone: String,
    pub language: String,
    pub theme: AppTheme,
    pub notify_on_budget_limit: bool,
    pub onboarding_completed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Account,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Account => Entity::has_many(account::Entity).into() }
    }
}

impl Related<account::Entity> for Entity {
    fn to() -> RelationDef { Relation::Account.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find<C: ConnectionTrait>(db: &C, user_id: &str) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(user_id.to_string()).one(db).await
}

/// Delete by identity; accounts go with it through the FK cascade.
pub async fn delete<C: ConnectionTrait>(db: &C, user_id: &str) -> Result<bool, DbErr> {
    let res = Entity::delete_by_id(user_id.to_string()).exec(db).await?;
    Ok(res.rows_affected > 0)
}

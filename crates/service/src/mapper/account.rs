use models::account;
use models::enums::{self, Currency};
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

use super::to_timestamp;
use crate::account::domain::{Account, BankName, CreateAccountRequest, UpdateAccountRequest};
use crate::errors::ServiceError;

/// Stored bank for a wire bank; the unspecified value has no counterpart.
pub fn bank_to_entity(bank: BankName) -> Result<enums::BankName, ServiceError> {
    Ok(match bank {
        BankName::Kaspi => enums::BankName::Kaspi,
        BankName::Halyk => enums::BankName::Halyk,
        BankName::Freedom => enums::BankName::Freedom,
        BankName::Jusan => enums::BankName::Jusan,
        BankName::Bcc => enums::BankName::Bcc,
        BankName::Forte => enums::BankName::Forte,
        BankName::BankNameUnspecified => {
            return Err(ServiceError::Validation("bank_name: bank name must be specified".into()))
        }
    })
}

pub fn bank_to_wire(bank: enums::BankName) -> BankName {
    match bank {
        enums::BankName::Kaspi => BankName::Kaspi,
        enums::BankName::Halyk => BankName::Halyk,
        enums::BankName::Freedom => BankName::Freedom,
        enums::BankName::Jusan => BankName::Jusan,
        enums::BankName::Bcc => BankName::Bcc,
        enums::BankName::Forte => BankName::Forte,
    }
}

/// Fresh account for `owner` with a new id; transaction dates start empty.
pub fn create_request_to_entity(
    req: CreateAccountRequest,
    owner: &str,
    now: DateTimeWithTimeZone,
) -> Result<account::Model, ServiceError> {
    let bank_name = bank_to_entity(req.bank_name)?;
    let currency = req
        .currency
        .parse::<Currency>()
        .map_err(|e| ServiceError::Validation(format!("currency: {}", e)))?;
    Ok(account::Model {
        account_id: Uuid::new_v4(),
        user_profile_id: owner.to_string(),
        bank_name,
        account_name: req.account_name.trim().to_string(),
        currency,
        first_transaction_date: None,
        last_transaction_date: None,
        created_at: now,
        updated_at: now,
    })
}

/// Only the display name is mutable.
pub fn apply_update(req: UpdateAccountRequest, entity: &mut account::Model, now: DateTimeWithTimeZone) {
    entity.account_name = req.account_name.trim().to_string();
    entity.updated_at = now;
}

pub fn entity_to_message(entity: &account::Model) -> Account {
    Account {
        account_id: entity.account_id.to_string(),
        user_profile_id: entity.user_profile_id.clone(),
        bank_name: bank_to_wire(entity.bank_name),
        account_name: entity.account_name.clone(),
        currency: entity.currency.code(),
        first_transaction_date: to_timestamp(entity.first_transaction_date.as_ref()),
        last_transaction_date: to_timestamp(entity.last_transaction_date.as_ref()),
        created_at: to_timestamp(Some(&entity.created_at)),
        updated_at: to_timestamp(Some(&entity.updated_at)),
    }
}

pub fn entities_to_messages(entities: &[account::Model]) -> Vec<Account> {
    entities.iter().map(entity_to_message).collect()
}

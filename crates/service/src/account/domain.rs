use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validation::{validate_currency_code, validate_display_name};
use crate::wire::Timestamp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BankName {
    #[default]
    BankNameUnspecified,
    Kaspi,
    Halyk,
    Freedom,
    Jusan,
    Bcc,
    Forte,
}

fn validate_bank_specified(bank: &BankName) -> Result<(), ValidationError> {
    if *bank == BankName::BankNameUnspecified {
        return Err(ValidationError::new("bank_name").with_message("bank name must be specified".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAccountRequest {
    #[validate(custom(function = "validate_bank_specified"))]
    pub bank_name: BankName,
    #[validate(custom(function = "validate_display_name"))]
    pub account_name: String,
    #[validate(custom(function = "validate_currency_code"))]
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAccountRequest {
    pub account_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, message = "account id is required"))]
    pub account_id: String,
    #[validate(custom(function = "validate_display_name"))]
    pub account_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteAccountRequest {
    pub account_id: String,
}

/// Account as returned to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: String,
    pub user_profile_id: String,
    pub bank_name: BankName,
    pub account_name: String,
    pub currency: String,
    pub first_transaction_date: Timestamp,
    pub last_transaction_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsResponse {
    pub accounts: Vec<Account>,
}

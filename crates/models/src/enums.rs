//! Storage-side enumerations, persisted as their upper-case string codes.

use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
pub enum Currency {
    #[sea_orm(string_value = "KZT")]
    Kzt,
    #[sea_orm(string_value = "USD")]
    Usd,
    #[sea_orm(string_value = "EUR")]
    Eur,
    #[sea_orm(string_value = "RUB")]
    Rub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(100))")]
pub enum BankName {
    #[sea_orm(string_value = "KASPI")]
    Kaspi,
    #[sea_orm(string_value = "HALYK")]
    Halyk,
    #[sea_orm(string_value = "FREEDOM")]
    Freedom,
    #[sea_orm(string_value = "JUSAN")]
    Jusan,
    #[sea_orm(string_value = "BCC")]
    Bcc,
    #[sea_orm(string_value = "FORTE")]
    Forte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum AppTheme {
    #[sea_orm(string_value = "LIGHT")]
    Light,
    #[sea_orm(string_value = "DARK")]
    Dark,
    #[sea_orm(string_value = "SYSTEM")]
    System,
}

/// Raised when a string code names no known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode(pub String);

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown code: {}", self.0)
    }
}

impl std::error::Error for UnknownCode {}

macro_rules! string_codes {
    ($ty:ty) => {
        impl $ty {
            /// Upper-case code as stored in the database.
            pub fn code(&self) -> String {
                self.to_value()
            }
        }

        impl FromStr for $ty {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as ActiveEnum>::try_from_value(&s.to_string()).map_err(|_| UnknownCode(s.to_string()))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.code())
            }
        }
    };
}

string_codes!(Currency);
string_codes!(BankName);
string_codes!(AppTheme);

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn currency_codes_round_trip() {
        for c in Currency::iter() {
            assert_eq!(c.code().parse::<Currency>().unwrap(), c);
        }
        assert_eq!(Currency::Kzt.to_string(), "KZT");
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!("kzt".parse::<Currency>(), Err(UnknownCode("kzt".into())));
        assert!("".parse::<BankName>().is_err());
        assert!("PURPLE".parse::<AppTheme>().is_err());
    }

    #[test]
    fn bank_codes_match_storage_values() {
        assert_eq!(BankName::Kaspi.code(), "KASPI");
        assert_eq!("FORTE".parse::<BankName>().unwrap(), BankName::Forte);
    }
}

//! Conversions between wire messages and stored entities.

pub mod account;
pub mod profile;

use sea_orm::prelude::DateTimeWithTimeZone;

use crate::wire::Timestamp;

/// Current time as stored in timestamp columns.
pub fn now() -> DateTimeWithTimeZone { chrono::Utc::now().into() }

/// `None` becomes the zero timestamp.
pub fn to_timestamp(value: Option<&DateTimeWithTimeZone>) -> Timestamp {
    match value {
        Some(dt) => Timestamp { seconds: dt.timestamp(), nanos: dt.timestamp_subsec_nanos() as i32 },
        None => Timestamp::default(),
    }
}

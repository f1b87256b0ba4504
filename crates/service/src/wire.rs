//! Message shapes shared by both `userservice.v1` services.

use serde::{Deserialize, Serialize};

/// Point in time as seconds and nanoseconds since the Unix epoch.
///
/// The zero value stands for "not set".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    #[serde(default)]
    pub seconds: i64,
    #[serde(default)]
    pub nanos: i32,
}

impl Timestamp {
    pub fn is_zero(&self) -> bool { self.seconds == 0 && self.nanos == 0 }
}

/// Request or response without fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

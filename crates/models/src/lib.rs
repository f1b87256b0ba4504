//! sea-orm entities for user profiles and their bank accounts.

pub mod db;
pub mod enums;
pub mod user_profile;
pub mod account;

#[cfg(test)]
mod tests;

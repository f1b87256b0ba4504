//! `userservice.v1.AccountService`: bank accounts linked to the caller's profile.

pub mod domain;
pub mod service;

pub use service::AccountService;

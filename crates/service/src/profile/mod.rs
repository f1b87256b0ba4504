//! `userservice.v1.UserProfileService`: one preferences record per identity.

pub mod domain;
pub mod service;

pub use service::ProfileService;

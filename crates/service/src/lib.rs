//! Business layer of the user service.
//! - `profile` and `account` hold the wire messages and the operations of the
//!   two `userservice.v1` services.
//! - Persistence goes through the `repository` traits; `repo` provides the
//!   Postgres and in-memory stores.
//! - Every operation takes the caller [`identity::Identity`] explicitly.

pub mod account;
pub mod errors;
pub mod identity;
pub mod mapper;
pub mod profile;
pub mod repo;
pub mod repository;
#[cfg(test)]
pub mod test_support;
pub mod validation;
pub mod wire;

pub use errors::ServiceError;
pub use identity::Identity;
pub use repository::{Access, Store, UnitOfWork};

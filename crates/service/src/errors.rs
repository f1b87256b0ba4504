use thiserror::Error;

/// Error kinds raised by the profile and account services.
///
/// The first four carry a caller-facing message; `Internal` and `Db` form the
/// unclassified bucket whose detail must never reach the caller.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    /// Message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::Validation(m)
            | ServiceError::NotFound(m)
            | ServiceError::AlreadyExists(m)
            | ServiceError::PermissionDenied(m)
            | ServiceError::Internal(m)
            | ServiceError::Db(m) => m,
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::AlreadyExists(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::PermissionDenied(_) => 1004,
            ServiceError::Internal(_) => 1100,
            ServiceError::Db(_) => 1200,
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(err: sea_orm::DbErr) -> Self { ServiceError::Db(err.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_strips_kind_prefix() {
        let err = ServiceError::AlreadyExists("Account from this bank already exists.".into());
        assert_eq!(err.message(), "Account from this bank already exists.");
        assert_eq!(err.to_string(), "already exists: Account from this bank already exists.");
    }
}

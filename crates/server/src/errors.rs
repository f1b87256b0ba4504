use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

/// Status codes of the RPC error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcCode {
    PermissionDenied,
    InvalidArgument,
    NotFound,
    AlreadyExists,
    Internal,
}

impl RpcCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcCode::PermissionDenied => "permission_denied",
            RpcCode::InvalidArgument => "invalid_argument",
            RpcCode::NotFound => "not_found",
            RpcCode::AlreadyExists => "already_exists",
            RpcCode::Internal => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RpcCode::PermissionDenied => StatusCode::FORBIDDEN,
            RpcCode::InvalidArgument => StatusCode::BAD_REQUEST,
            RpcCode::NotFound => StatusCode::NOT_FOUND,
            RpcCode::AlreadyExists => StatusCode::CONFLICT,
            RpcCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for RpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

const INTERNAL_MESSAGE: &str = "Internal server error";

/// The only error type handlers return; rendered as `{"code", "msg"}`.
#[derive(Debug, Error)]
#[error("{code}: {msg}")]
pub struct RpcError {
    pub code: RpcCode,
    pub msg: String,
}

impl RpcError {
    pub fn new(code: RpcCode, msg: impl Into<String>) -> Self { Self { code, msg: msg.into() } }

    pub fn permission_denied(msg: impl Into<String>) -> Self { Self::new(RpcCode::PermissionDenied, msg) }

    pub fn invalid_argument(msg: impl Into<String>) -> Self { Self::new(RpcCode::InvalidArgument, msg) }

    /// Logs `detail` and hides it from the caller.
    pub fn internal(detail: impl fmt::Display) -> Self {
        error!(error = %detail, "internal error");
        Self::new(RpcCode::Internal, INTERNAL_MESSAGE)
    }
}

impl From<ServiceError> for RpcError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => Self::new(RpcCode::InvalidArgument, msg),
            ServiceError::NotFound(msg) => Self::new(RpcCode::NotFound, msg),
            ServiceError::AlreadyExists(msg) => Self::new(RpcCode::AlreadyExists, msg),
            ServiceError::PermissionDenied(msg) => Self::new(RpcCode::PermissionDenied, msg),
            other @ (ServiceError::Internal(_) | ServiceError::Db(_)) => {
                error!(error = %other, code = other.code(), "internal error");
                Self::new(RpcCode::Internal, INTERNAL_MESSAGE)
            }
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    code: &'static str,
    msg: &'a str,
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let body = Envelope { code: self.code.as_str(), msg: &self.msg };
        let mut resp = (self.code.status(), Json(body)).into_response();
        // metrics 中间件读取该扩展以记录错误码
        resp.extensions_mut().insert(self.code);
        resp
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_kinds_map_to_codes() {
        let cases = [
            (ServiceError::Validation("bad".into()), RpcCode::InvalidArgument, StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("gone".into()), RpcCode::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::AlreadyExists("dup".into()), RpcCode::AlreadyExists, StatusCode::CONFLICT),
            (ServiceError::PermissionDenied("no".into()), RpcCode::PermissionDenied, StatusCode::FORBIDDEN),
        ];
        for (err, code, status) in cases {
            let msg = err.message().to_string();
            let rpc = RpcError::from(err);
            assert_eq!(rpc.code, code);
            assert_eq!(rpc.code.status(), status);
            assert_eq!(rpc.msg, msg);
        }
    }

    #[test]
    fn internal_detail_is_hidden() {
        let rpc = RpcError::from(ServiceError::Db("relation \"accounts\" does not exist".into()));
        assert_eq!(rpc.code, RpcCode::Internal);
        assert_eq!(rpc.msg, "Internal server error");
        let rpc = RpcError::from(ServiceError::Internal("boom".into()));
        assert_eq!(rpc.msg, "Internal server error");
    }

    #[test]
    fn response_carries_code_extension() {
        let resp = RpcError::invalid_argument("x").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.extensions().get::<RpcCode>(), Some(&RpcCode::InvalidArgument));
    }
}

//! JSON RPC adapter for the `userservice.v1` services.
//!
//! Every procedure is `POST /rpc/<package>.<Service>/<Method>` with a JSON
//! message body; an empty body stands for the empty message.

pub mod account;
pub mod profile;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::errors::RpcError;

pub const PROFILE_SERVICE: &str = "userservice.v1.UserProfileService";
pub const ACCOUNT_SERVICE: &str = "userservice.v1.AccountService";

/// Route path of `method` on `service`.
pub fn rpc_path(service: &str, method: &str) -> String {
    format!("/rpc/{}/{}", service, method)
}

/// Request message extractor; malformed bodies are `invalid_argument`.
pub struct RpcJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for RpcJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RpcError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| RpcError::invalid_argument(format!("unreadable request body: {}", e)))?;
        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) { b"{}" } else { &bytes };
        serde_json::from_slice(body)
            .map(RpcJson)
            .map_err(|e| RpcError::invalid_argument(format!("malformed request message: {}", e)))
    }
}

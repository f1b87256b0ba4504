use axum::{extract::State, Json};
use service::account::domain::{
    Account, CreateAccountRequest, DeleteAccountRequest, GetAccountRequest, ListAccountsResponse, UpdateAccountRequest,
};
use service::wire::Empty;

use super::RpcJson;
use crate::auth::CallerIdentity;
use crate::errors::RpcError;
use crate::state::ServerState;

pub async fn create_account(
    State(state): State<ServerState>,
    CallerIdentity(identity): CallerIdentity,
    RpcJson(req): RpcJson<CreateAccountRequest>,
) -> Result<Json<Account>, RpcError> {
    Ok(Json(state.accounts.create(&identity, req).await?))
}

pub async fn get_account(
    State(state): State<ServerState>,
    CallerIdentity(identity): CallerIdentity,
    RpcJson(req): RpcJson<GetAccountRequest>,
) -> Result<Json<Account>, RpcError> {
    Ok(Json(state.accounts.get(&identity, req).await?))
}

pub async fn list_accounts(
    State(state): State<ServerState>,
    CallerIdentity(identity): CallerIdentity,
    RpcJson(_): RpcJson<Empty>,
) -> Result<Json<ListAccountsResponse>, RpcError> {
    Ok(Json(state.accounts.list(&identity).await?))
}

pub async fn update_account(
    State(state): State<ServerState>,
    CallerIdentity(identity): CallerIdentity,
    RpcJson(req): RpcJson<UpdateAccountRequest>,
) -> Result<Json<Account>, RpcError> {
    Ok(Json(state.accounts.update(&identity, req).await?))
}

pub async fn delete_account(
    State(state): State<ServerState>,
    CallerIdentity(identity): CallerIdentity,
    RpcJson(req): RpcJson<DeleteAccountRequest>,
) -> Result<Json<Empty>, RpcError> {
    Ok(Json(state.accounts.delete(&identity, req).await?))
}

use axum::{extract::State, Json};
use service::profile::domain::{CreateUserProfileRequest, UpdateUserProfileRequest, UserProfileResponse};
use service::wire::Empty;

use super::RpcJson;
use crate::auth::CallerIdentity;
use crate::errors::RpcError;
use crate::state::ServerState;

pub async fn create_user_profile(
    State(state): State<ServerState>,
    CallerIdentity(identity): CallerIdentity,
    RpcJson(req): RpcJson<CreateUserProfileRequest>,
) -> Result<Json<UserProfileResponse>, RpcError> {
    Ok(Json(state.profiles.create(&identity, req).await?))
}

pub async fn get_user_profile(
    State(state): State<ServerState>,
    CallerIdentity(identity): CallerIdentity,
    RpcJson(_): RpcJson<Empty>,
) -> Result<Json<UserProfileResponse>, RpcError> {
    Ok(Json(state.profiles.get(&identity).await?))
}

pub async fn update_user_profile(
    State(state): State<ServerState>,
    CallerIdentity(identity): CallerIdentity,
    RpcJson(req): RpcJson<UpdateUserProfileRequest>,
) -> Result<Json<UserProfileResponse>, RpcError> {
    Ok(Json(state.profiles.update(&identity, req).await?))
}

pub async fn delete_user_profile(
    State(state): State<ServerState>,
    CallerIdentity(identity): CallerIdentity,
    RpcJson(_): RpcJson<Empty>,
) -> Result<Json<Empty>, RpcError> {
    Ok(Json(state.profiles.delete(&identity).await?))
}

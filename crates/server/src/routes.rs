use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::auth::require_bearer_token;
use crate::metrics::{metrics, track_rpc};
use crate::rpc::{account, profile, rpc_path, ACCOUNT_SERVICE, PROFILE_SERVICE};
use crate::state::ServerState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public probes plus the authenticated RPC surface.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes (health + metrics)
    let public = Router::new().route("/health", get(health)).route("/metrics", get(metrics));

    let rpc = Router::new()
        .route(&rpc_path(PROFILE_SERVICE, "CreateUserProfile"), post(profile::create_user_profile))
        .route(&rpc_path(PROFILE_SERVICE, "GetUserProfile"), post(profile::get_user_profile))
        .route(&rpc_path(PROFILE_SERVICE, "UpdateUserProfile"), post(profile::update_user_profile))
        .route(&rpc_path(PROFILE_SERVICE, "DeleteUserProfile"), post(profile::delete_user_profile))
        .route(&rpc_path(ACCOUNT_SERVICE, "CreateAccount"), post(account::create_account))
        .route(&rpc_path(ACCOUNT_SERVICE, "GetAccount"), post(account::get_account))
        .route(&rpc_path(ACCOUNT_SERVICE, "ListAccounts"), post(account::list_accounts))
        .route(&rpc_path(ACCOUNT_SERVICE, "UpdateAccount"), post(account::update_account))
        .route(&rpc_path(ACCOUNT_SERVICE, "DeleteAccount"), post(account::delete_account))
        // 先鉴权，外层再统计，拒绝的请求也计入指标
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer_token))
        .route_layer(middleware::from_fn(track_rpc));

    // Compose
    public
        .merge(rpc)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                // 请求到达时打点
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

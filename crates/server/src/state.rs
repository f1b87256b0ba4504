use std::sync::Arc;

use service::account::AccountService;
use service::profile::ProfileService;
use service::Store;

/// Bearer token verification settings used by the auth middleware.
#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl From<&configs::AuthConfig> for ServerAuthConfig {
    fn from(cfg: &configs::AuthConfig) -> Self {
        Self { jwt_secret: cfg.jwt_secret.clone(), issuer: cfg.issuer.clone(), audience: cfg.audience.clone() }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub profiles: Arc<ProfileService<dyn Store>>,
    pub accounts: Arc<AccountService<dyn Store>>,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    pub fn new(store: Arc<dyn Store>, auth: ServerAuthConfig) -> Self {
        Self {
            profiles: Arc::new(ProfileService::new(Arc::clone(&store))),
            accounts: Arc::new(AccountService::new(store)),
            auth,
        }
    }
}

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use service::Identity;
use tracing::{debug, warn};

use crate::errors::RpcError;
use crate::state::{ServerAuthConfig, ServerState};

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

/// Verify `token` and return the subject it was issued to.
pub fn verify_token(cfg: &ServerAuthConfig, token: &str) -> Result<Identity, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    if let Some(iss) = &cfg.issuer {
        validation.set_issuer(&[iss]);
    }
    match &cfg.audience {
        Some(aud) => validation.set_audience(&[aud]),
        None => validation.validate_aud = false,
    }
    let data = decode::<Claims>(token, &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()), &validation)?;
    Ok(Identity::new(data.claims.sub))
}

/// Bearer token middleware for the RPC routes.
///
/// On success the verified [`Identity`] is stored in the request extensions
/// for [`CallerIdentity`] to pick up.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, RpcError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let Some(token) = token else {
        debug!(path = %req.uri().path(), "missing bearer token");
        return Err(RpcError::permission_denied("Missing bearer token"));
    };

    let identity = match verify_token(&state.auth, &token) {
        Ok(identity) if !identity.as_str().is_empty() => identity,
        Ok(_) => return Err(RpcError::permission_denied("Token has no subject")),
        Err(e) => {
            warn!(path = %req.uri().path(), error = %e, "bearer token rejected");
            return Err(RpcError::permission_denied("Invalid or expired token"));
        }
    };

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Caller identity established by [`require_bearer_token`].
pub struct CallerIdentity(pub Identity);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CallerIdentity {
    type Rejection = RpcError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CallerIdentity)
            .ok_or_else(|| RpcError::internal("Authentication context is missing."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        exp: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        iss: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        aud: Option<&'a str>,
    }

    fn cfg() -> ServerAuthConfig {
        ServerAuthConfig { jwt_secret: "secret".into(), issuer: None, audience: None }
    }

    fn far_future() -> usize { 4_102_444_800 }

    fn mint(secret: &str, claims: &TestClaims) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn accepts_valid_token() {
        let token = mint("secret", &TestClaims { sub: "u1", exp: far_future(), iss: None, aud: Some("web") });
        assert_eq!(verify_token(&cfg(), &token).unwrap(), Identity::new("u1"));
    }

    #[test]
    fn rejects_wrong_secret_and_expired() {
        let token = mint("other", &TestClaims { sub: "u1", exp: far_future(), iss: None, aud: None });
        assert!(verify_token(&cfg(), &token).is_err());
        let token = mint("secret", &TestClaims { sub: "u1", exp: 1_000, iss: None, aud: None });
        assert!(verify_token(&cfg(), &token).is_err());
    }

    #[test]
    fn checks_issuer_when_configured() {
        let cfg = ServerAuthConfig { issuer: Some("https://id.example.com".into()), ..cfg() };
        let good = mint("secret", &TestClaims { sub: "u1", exp: far_future(), iss: Some("https://id.example.com"), aud: None });
        let bad = mint("secret", &TestClaims { sub: "u1", exp: far_future(), iss: Some("https://evil.example.com"), aud: None });
        assert!(verify_token(&cfg, &good).is_ok());
        assert!(verify_token(&cfg, &bad).is_err());
    }
}

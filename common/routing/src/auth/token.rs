use axum::{
    Json,
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, instrument, warn};

use crate::{
    auth::{PrincipalStore, TokenKeys},
    error::MessageBody,
};

const BEARER: &str = "Bearer ";

/// Everything the guard needs: the keys tokens are checked with and where
/// their principals are looked up.
#[derive(Debug, Clone)]
pub struct AuthState<P> {
    keys: TokenKeys,
    principals: P,
}

impl<P> AuthState<P> {
    pub fn new(keys: TokenKeys, principals: P) -> Self {
        Self { keys, principals }
    }

    pub fn keys(&self) -> &TokenKeys {
        &self.keys
    }
}

/// Why a gated request was turned away. Both end in a 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    NoToken,
    TokenFailed,
}

impl AuthRejection {
    pub fn message(&self) -> &'static str {
        match self {
            AuthRejection::NoToken => "Not authorized, no token",
            AuthRejection::TokenFailed => "Not authorized, token failed",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(MessageBody::new(self.message())),
        )
            .into_response()
    }
}

/// Lets the request through only with a valid bearer token whose principal
/// still exists. The principal is left in the request extensions.
#[instrument(skip_all)]
pub async fn require_principal<P: PrincipalStore>(
    State(state): State<AuthState<P>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthRejection> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            warn!("request to a gated route carried no bearer token");
            AuthRejection::NoToken
        })?;

    let claims = state.keys.verify(token).map_err(|e| {
        warn!("token rejected: {e:?}");
        AuthRejection::TokenFailed
    })?;

    let principal = state
        .principals
        .principal(claims.id.clone())
        .await
        .map_err(|e| {
            error!("principal lookup failed: {e:?}");
            AuthRejection::TokenFailed
        })?
        .ok_or_else(|| {
            warn!("token principal '{}' no longer exists", claims.id);
            AuthRejection::TokenFailed
        })?;

    debug!("request authorized for '{}'", claims.id);
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

//! Access middleware: every protected request passes through here exactly
//! once, leaving an [`AccessContext`] in the request extensions for gates and
//! handlers downstream.

use std::sync::Arc;

use axum::{
    extract::{Query, RawPathParams, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use serde::Deserialize;

use mandir_auth::{
    AccessContext, AccessError, ENTITY_HEADER, RequestScope, TENANT_HEADER, TokenVerifier,
    UserStore,
};

use crate::app::errors;

/// Verifier and account store handed to the access middleware.
#[derive(Clone)]
pub struct AccessState {
    pub verifier: Arc<dyn TokenVerifier>,
    pub users: Arc<dyn UserStore>,
}

/// Query parameters that act as scope signals on any route.
#[derive(Debug, Default, Deserialize)]
pub struct ScopeQuery {
    entity_id: Option<String>,
    tenant_id: Option<String>,
}

/// Authenticate the request and build its access context.
///
/// Order matters: credential extraction, token verification, account lookup,
/// then resolution. The first failing step denies the request; nothing past
/// it runs. Scope signals never influence authentication.
pub async fn access_middleware(
    State(state): State<AccessState>,
    params: Option<RawPathParams>,
    query: Option<Query<ScopeQuery>>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = match extract_bearer(req.headers()) {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(path = req.uri().path(), "request without usable credentials");
            return errors::access_denied(&err);
        }
    };

    let claims = match state.verifier.verify(token, Utc::now()) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, path = req.uri().path(), "bearer token rejected");
            return errors::access_denied(&AccessError::InvalidToken);
        }
    };

    let user = match state.users.find(claims.sub) {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!(user_id = %claims.sub, "token subject no longer exists");
            return errors::access_denied(&AccessError::UnknownSubject);
        }
        Err(err) => {
            tracing::error!(error = %err, "account lookup failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_unavailable",
                "account lookup failed",
            );
        }
    };

    let scope = request_scope(&req, params.as_ref(), query.map(|Query(q)| q).unwrap_or_default());
    let ctx = AccessContext::build(&user, &claims, &scope);
    tracing::debug!(
        user_id = %ctx.user_id(),
        role = %ctx.role(),
        entity = ?ctx.accessible_entity_id(),
        "access context built"
    );

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, AccessError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AccessError::MissingCredentials)?;

    let header = header.to_str().map_err(|_| AccessError::MissingCredentials)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(AccessError::MissingCredentials)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(AccessError::MissingCredentials);
    }

    Ok(token)
}

/// Pluck the raw scope signals off the request. Values go in untouched;
/// what counts as usable is the resolver's call, not ours.
fn request_scope(
    req: &axum::http::Request<axum::body::Body>,
    params: Option<&RawPathParams>,
    query: ScopeQuery,
) -> RequestScope {
    RequestScope {
        entity_header: header_value(req.headers(), ENTITY_HEADER),
        tenant_header: header_value(req.headers(), TENANT_HEADER),
        path: req.uri().path().to_string(),
        path_id: params.and_then(|params| {
            params
                .iter()
                .find(|(name, _)| *name == "id")
                .map(|(_, value)| value.to_string())
        }),
        entity_query: query.entity_id,
        tenant_query: query.tenant_id,
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn bearer_token_is_extracted_and_trimmed() {
        let headers = headers_with_auth("Bearer   abc.def.ghi  ");
        assert_eq!(extract_bearer(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_missing_credentials() {
        let headers = HeaderMap::new();
        assert_eq!(
            extract_bearer(&headers),
            Err(AccessError::MissingCredentials)
        );
    }

    #[test]
    fn non_bearer_schemes_are_rejected() {
        let headers = headers_with_auth("Basic dXNlcjpwdw==");
        assert_eq!(
            extract_bearer(&headers),
            Err(AccessError::MissingCredentials)
        );
    }

    #[test]
    fn empty_bearer_token_is_rejected() {
        let headers = headers_with_auth("Bearer    ");
        assert_eq!(
            extract_bearer(&headers),
            Err(AccessError::MissingCredentials)
        );
    }
}

/**
 * Admin Session
 * Explicit per-request view of who is signed in
 */
use axum::{extract::FromRequestParts, http::request::Parts, http::HeaderMap};
use std::convert::Infallible;

use crate::routes::auth::{extract_bearer_token, verify_access_token, UserInfo};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<UserInfo>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: UserInfo) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    /// Resolve the session from the `session` cookie, then a bearer token.
    /// Anything missing, expired or forged yields an anonymous session.
    pub fn from_headers(headers: &HeaderMap, jwt_secret: &str) -> Self {
        let token = cookie_value(headers, SESSION_COOKIE).or_else(|| extract_bearer_token(headers));
        match token {
            Some(token) => match verify_access_token(&token, jwt_secret) {
                Ok(claims) => Self::signed_in(claims.into()),
                Err(e) => {
                    tracing::debug!(error = %e, "Ignoring invalid session token");
                    Self::anonymous()
                }
            },
            None => Self::anonymous(),
        }
    }
}

/// Value of a named cookie from the `Cookie` header(s).
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all("cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers, &state.config.auth.jwt_secret))
    }
}

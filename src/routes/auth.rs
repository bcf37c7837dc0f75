/**
 * Authentication Routes
 * Admin login backed by a bcrypt credential and JWT access tokens
 */
use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distr::{Alphanumeric, SampleString};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{collections::HashMap, net::SocketAddr};
use tokio::sync::RwLock;

use crate::state::AppState;

/// Access token expiry in minutes
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiry in days
const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// One login attempt per IP per window
#[cfg_attr(test, allow(dead_code))]
const RATE_LIMIT_WINDOW_SECS: i64 = 60;

const ADMIN_USER_ID: &str = "admin";
const ADMIN_ROLE: &str = "ADMIN";

// ============================================================================
// Types
// ============================================================================

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Stored refresh token data
#[derive(Debug, Clone)]
pub struct RefreshTokenData {
    pub user: UserInfo,
    pub expires_at: i64,
    pub revoked: bool,
}

/// Signed-in admin as exposed to views and clients
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

impl From<Claims> for UserInfo {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// In-memory token and rate-limit tables
#[derive(Debug, Default)]
pub struct AuthStore {
    refresh_tokens: RwLock<HashMap<String, RefreshTokenData>>,
    #[cfg_attr(test, allow(dead_code))]
    rate_limit: RwLock<HashMap<String, i64>>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Admin login is not configured")]
    LoginDisabled,
    #[error("Too many requests. Please try again later.")]
    RateLimited,
    #[error("Failed to issue token")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Failed to verify password")]
    Internal(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials | AuthError::InvalidEmail => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::LoginDisabled => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AuthError::Token(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub user: Option<UserInfo>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginResponse {
    fn failed(error: &AuthError) -> Self {
        Self {
            success: false,
            user: None,
            access_token: None,
            refresh_token: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    pub is_valid: bool,
    pub user: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub success: bool,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn generate_refresh_token() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 64)
}

/// Refresh tokens are stored as SHA-256 digests, never in the clear.
fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn create_access_token(
    user: &UserInfo,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES);

    let claims = Claims {
        sub: user.user_id.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_access_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

impl AuthStore {
    /// Check the login rate limit for an IP, evicting expired entries.
    pub async fn check_rate_limit(&self, ip: &str) -> bool {
        #[cfg(test)]
        {
            let _ = ip;
            true
        }

        #[cfg(not(test))]
        {
            let now = Utc::now().timestamp();
            let mut limits = self.rate_limit.write().await;
            limits.retain(|_, last| now - *last < RATE_LIMIT_WINDOW_SECS);

            if limits.contains_key(ip) {
                return false;
            }

            limits.insert(ip.to_string(), now);
            true
        }
    }

    async fn store_refresh_token(&self, user: &UserInfo) -> String {
        let token = generate_refresh_token();
        let expires_at = (Utc::now() + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS)).timestamp();
        self.refresh_tokens.write().await.insert(
            hash_refresh_token(&token),
            RefreshTokenData {
                user: user.clone(),
                expires_at,
                revoked: false,
            },
        );
        token
    }

    /// Consume a refresh token, returning its user if it was still valid.
    async fn redeem_refresh_token(&self, token: &str) -> Option<UserInfo> {
        let now = Utc::now().timestamp();
        let mut tokens = self.refresh_tokens.write().await;
        tokens.retain(|_, data| data.expires_at > now && !data.revoked);
        tokens.remove(&hash_refresh_token(token)).map(|data| data.user)
    }

    async fn revoke_refresh_token(&self, token: &str) {
        if let Some(data) = self
            .refresh_tokens
            .write()
            .await
            .get_mut(&hash_refresh_token(token))
        {
            data.revoked = true;
        }
    }
}

/// Check submitted admin credentials against the configured bcrypt hash.
pub async fn authenticate(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<UserInfo, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    if !email.contains('@') {
        return Err(AuthError::InvalidEmail);
    }

    let auth = &state.config.auth;
    let Some(stored_hash) = auth.admin_password_hash.clone().filter(|_| auth.login_enabled()) else {
        tracing::warn!("Admin login attempted but no admin credential is configured");
        return Err(AuthError::LoginDisabled);
    };

    // bcrypt is CPU-bound; keep it off the async executor.
    let password = password.to_string();
    let password_ok = tokio::task::spawn_blocking(move || bcrypt::verify(&password, &stored_hash))
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?
        .map_err(|e| AuthError::Internal(e.to_string()))?;

    let email_ok = email.eq_ignore_ascii_case(&auth.admin_email);
    if !(password_ok && email_ok) {
        tracing::warn!(email = %email, "Failed admin login");
        return Err(AuthError::InvalidCredentials);
    }

    tracing::info!(email = %email, "Admin signed in");
    Ok(UserInfo {
        user_id: ADMIN_USER_ID.to_string(),
        email: auth.admin_email.clone(),
        role: ADMIN_ROLE.to_string(),
    })
}

/// Rate-limited login shared by the JSON endpoint and the admin form.
pub async fn sign_in(
    state: &AppState,
    ip: &str,
    email: &str,
    password: &str,
) -> Result<(UserInfo, String, String), AuthError> {
    if !state.auth.check_rate_limit(ip).await {
        return Err(AuthError::RateLimited);
    }
    let user = authenticate(state, email, password).await?;
    let access_token = create_access_token(&user, &state.config.auth.jwt_secret)?;
    let refresh_token = state.auth.store_refresh_token(&user).await;
    Ok((user, access_token, refresh_token))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let ip = addr.ip().to_string();
    match sign_in(&state, &ip, &payload.email, &payload.password).await {
        Ok((user, access_token, refresh_token)) => (
            StatusCode::OK,
            Json(LoginResponse {
                success: true,
                user: Some(user),
                access_token: Some(access_token),
                refresh_token: Some(refresh_token),
                error: None,
            }),
        ),
        Err(e) => {
            if let AuthError::Token(_) | AuthError::Internal(_) = e {
                tracing::error!(error = ?e, "Admin login failed internally");
            }
            (e.status(), Json(LoginResponse::failed(&e)))
        }
    }
}

/// POST /api/auth/verify
pub async fn verify_token(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let Some(token) = extract_bearer_token(&headers) else {
        return (
            StatusCode::OK,
            Json(VerifyResponse {
                success: false,
                is_valid: false,
                user: None,
                error: Some("No token provided".to_string()),
            }),
        );
    };

    match verify_access_token(&token, &state.config.auth.jwt_secret) {
        Ok(claims) => (
            StatusCode::OK,
            Json(VerifyResponse {
                success: true,
                is_valid: true,
                user: Some(claims.into()),
                error: None,
            }),
        ),
        Err(_) => (
            StatusCode::OK,
            Json(VerifyResponse {
                success: false,
                is_valid: false,
                user: None,
                error: Some("Invalid or expired token".to_string()),
            }),
        ),
    }
}

/// POST /api/auth/refresh
/// Rotates the refresh token and issues a new access token.
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let failed = |status: StatusCode, msg: &str| {
        (
            status,
            Json(RefreshResponse {
                success: false,
                access_token: None,
                refresh_token: None,
                error: Some(msg.to_string()),
            }),
        )
    };

    if payload.refresh_token.is_empty() {
        return failed(StatusCode::BAD_REQUEST, "Refresh token is required");
    }

    let Some(user) = state.auth.redeem_refresh_token(&payload.refresh_token).await else {
        return failed(StatusCode::UNAUTHORIZED, "Invalid or expired refresh token");
    };

    match create_access_token(&user, &state.config.auth.jwt_secret) {
        Ok(access_token) => {
            let refresh_token = state.auth.store_refresh_token(&user).await;
            (
                StatusCode::OK,
                Json(RefreshResponse {
                    success: true,
                    access_token: Some(access_token),
                    refresh_token: Some(refresh_token),
                    error: None,
                }),
            )
        }
        Err(e) => {
            tracing::error!("Failed to create access token: {}", e);
            failed(StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue token")
        }
    }
}

/// POST /api/auth/logout
/// Always succeeds; revokes the refresh token when one is supplied.
pub async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> impl IntoResponse {
    if let Some(token) = payload.refresh_token.as_deref().filter(|t| !t.is_empty()) {
        state.auth.revoke_refresh_token(token).await;
    }
    (StatusCode::OK, Json(LogoutResponse { success: true }))
}

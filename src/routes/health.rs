/**
 * Health Routes
 * Endpoints for checking backend health status
 */
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::state::AppState;

// Track server start time for uptime calculation
lazy_static::lazy_static! {
    static ref SERVER_START: Instant = Instant::now();
}

/// Initialize the server start time
pub fn init_start_time() {
    lazy_static::initialize(&SERVER_START);
}

/// Counts of the loaded content
#[derive(Debug, Serialize, Deserialize)]
pub struct ContentCheck {
    pub status: String,
    pub posts: usize,
    pub categories: usize,
    pub authors: usize,
    pub pages: usize,
}

/// Detailed health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub content: ContentCheck,
    pub admin_login: String,
}

/// Ready check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Simple health response
#[derive(Debug, Serialize, Deserialize)]
pub struct SimpleHealthResponse {
    pub status: String,
}

fn content_check(state: &AppState) -> ContentCheck {
    let site = state.site.as_ref();
    ContentCheck {
        status: if site.posts().is_empty() {
            "empty".to_string()
        } else {
            "loaded".to_string()
        },
        posts: site.posts().len(),
        categories: site.categories().len(),
        authors: site.authors().len(),
        pages: site.pages().len(),
    }
}

/// GET /health - Simple health ping
pub async fn health_ping() -> impl IntoResponse {
    Json(SimpleHealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /health/detailed - Uptime and loaded content
pub async fn health_detailed(State(state): State<AppState>) -> impl IntoResponse {
    let response = DetailedHealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        uptime: Some(SERVER_START.elapsed().as_secs()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            content: content_check(&state),
            admin_login: if state.config.auth.login_enabled() {
                "enabled".to_string()
            } else {
                "disabled".to_string()
            },
        },
    };

    (StatusCode::OK, Json(response))
}

/// GET /health/ready - Ready once content is loaded
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = !state.site.posts().is_empty();

    let response = ReadyResponse {
        status: if is_ready {
            "ready".to_string()
        } else {
            "not ready".to_string()
        },
        timestamp: Utc::now(),
        uptime: Some(SERVER_START.elapsed().as_secs()),
        reason: if !is_ready {
            Some("No posts loaded".to_string())
        } else {
            None
        },
    };

    let status = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{models::Bundle, SiteContext};
    use crate::test_support::test_state;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_ping))
            .route("/health/detailed", get(health_detailed))
            .route("/health/ready", get(health_ready))
            .with_state(state)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(app: Router, uri: &str) -> (StatusCode, T) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value: T = serde_json::from_slice(&body).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn test_health_ping_returns_ok() {
        init_start_time();
        let (status, body) = get_json::<SimpleHealthResponse>(test_router(test_state()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn test_health_detailed_reports_content() {
        init_start_time();
        let (status, body) =
            get_json::<DetailedHealthResponse>(test_router(test_state()), "/health/detailed").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.uptime.is_some());
        assert_eq!(body.checks.content.posts, 12);
        assert_eq!(body.checks.content.categories, 3);
        assert_eq!(body.checks.admin_login, "enabled");
    }

    #[tokio::test]
    async fn test_health_ready_returns_ready() {
        let (status, body) = get_json::<ReadyResponse>(test_router(test_state()), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ready");
    }

    #[tokio::test]
    async fn test_health_ready_without_posts_is_unavailable() {
        let mut state = test_state();
        state.site = Arc::new(SiteContext::new(
            Bundle::default(),
            state.config.site_url.clone(),
            "Empty",
        ));
        let (status, body) = get_json::<ReadyResponse>(test_router(state), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.reason.as_deref(), Some("No posts loaded"));
    }
}

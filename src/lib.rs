//! Insurance Insight - content site rendering, admin session and JSON API

pub mod config;
pub mod content;
pub mod logging;
pub mod markdown;
pub mod path;
pub mod router;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

#[cfg(test)]
mod test_support;

use anyhow::Context;
use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    services::ServeDir, trace::TraceLayer,
};

use crate::config::Config;
use crate::content::SiteContext;
use crate::state::AppState;

/// Request bodies are login forms and small JSON payloads.
const BODY_LIMIT: usize = 64 * 1024;

/// Configure CORS from the configured origins.
/// Falls back to the local development origins when none are set.
pub fn configure_cors(config: &Config) -> CorsLayer {
    let mut allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed_origins.is_empty() {
        allowed_origins = vec![
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ];
    }

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

/// Create and configure the application router.
pub fn create_app(state: AppState) -> Router {
    let cors = configure_cors(&state.config);
    let assets = ServeDir::new(&state.config.assets_dir);

    Router::new()
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/verify", post(routes::auth::verify_token))
        .route("/api/auth/refresh", post(routes::auth::refresh))
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/posts", get(routes::blog::list_posts))
        .route("/api/posts/{id}", get(routes::blog::get_post))
        .route("/api/categories", get(routes::blog::list_categories))
        .route("/admin/login", post(routes::admin::login))
        .route("/admin/logout", post(routes::admin::logout))
        .route("/rss.xml", get(routes::rss::rss_feed))
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .route("/health/ready", get(routes::health::health_ready))
        .nest_service("/assets", assets)
        .fallback(routes::site::page)
        .with_state(state)
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(cors)
}

/// Run the server (used by main).
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Dropping the guards stops the background log writers.
    let _log_guards = logging::init(&logging::LogConfig::from_env());

    routes::health::init_start_time();

    let config = Config::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    let site = SiteContext::load(
        &config.data_bundle,
        &config.data_dir,
        config.site_url.clone(),
        config.site_name.clone(),
    )
    .context("failed to load site content")?;

    let addr = config.bind_addr()?;
    let app = create_app(AppState::new(Arc::new(site), Arc::new(config)));

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")
}

/**
 * Site Routes
 * Server-side rendering of every content path
 */
use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};

use crate::router::{location_path, Route};
use crate::session::Session;
use crate::state::AppState;
use crate::views::{self, layout, ViewState};

/// Render the full document for a site path.
pub fn render_document(
    state: &AppState,
    path: &str,
    session: &Session,
    notice: Option<String>,
) -> (StatusCode, Html<String>) {
    let site = state.site.as_ref();
    let view_state = ViewState {
        route: Route::resolve(path, site),
        path: path.to_string(),
        session,
        notice,
    };
    let page = views::render(site, &view_state);
    let status = if page.route.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (status, Html(layout::document(site, &page)))
}

/// Fallback handler: GET on any path renders that path.
pub async fn page(
    State(state): State<AppState>,
    session: Session,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET, HEAD")]).into_response();
    }

    let site_url = state.site.site_url();
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let path = match site_url.join(target) {
        Ok(location) => location_path(&location, site_url),
        Err(e) => {
            tracing::debug!(uri = %uri, error = %e, "Unparseable request target");
            "/".to_string()
        }
    };

    let (status, html) = render_document(&state, &path, &session, None);
    if status == StatusCode::NOT_FOUND {
        tracing::debug!(path = %path, "No content for path");
    }
    (status, html).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::auth::{create_access_token, UserInfo};
    use crate::test_support::test_state;
    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use tower::ServiceExt;

    fn site_router() -> Router {
        Router::new().fallback(page).with_state(test_state())
    }

    async fn get_html(uri: &str, cookie: Option<String>) -> (StatusCode, String) {
        let mut req = Request::get(uri);
        if let Some(cookie) = cookie {
            req = req.header("cookie", cookie);
        }
        let res = site_router()
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_home_renders() {
        let (status, html) = get_html("/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("blog-card"));
    }

    #[tokio::test]
    async fn test_trailing_slash_and_index_are_normalized() {
        let (status, html) = get_html("/post/featured-1/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<title>Title of featured-1 | Insurance Insight</title>"));

        let (status, html) = get_html("/blog/index.html", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<title>Insurance Blog | Insurance Insight</title>"));
    }

    #[tokio::test]
    async fn test_unknown_post_is_not_found() {
        let (status, html) = get_html("/post/unknown-id", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(html.contains("loading-state"));
    }

    #[tokio::test]
    async fn test_query_path_on_root_document() {
        let (status, html) = get_html("/?p=/category/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Health Insurance Guides | Insurance Insight"));
    }

    #[tokio::test]
    async fn test_admin_shows_login_without_session() {
        let (status, html) = get_html("/admin", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#"action="/admin/login""#));
        assert!(!html.contains("admin-table"));
    }

    #[tokio::test]
    async fn test_admin_shows_dashboard_with_session_cookie() {
        let user = UserInfo {
            user_id: "admin".to_string(),
            email: crate::test_support::ADMIN_EMAIL.to_string(),
            role: "ADMIN".to_string(),
        };
        let token = create_access_token(&user, "test-secret").unwrap();
        let (status, html) = get_html("/admin", Some(format!("session={}", token))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("admin-table"));
        assert!(html.contains("stat-card"));
    }

    #[tokio::test]
    async fn test_non_get_is_rejected() {
        let req = Request::delete("/blog").body(Body::empty()).unwrap();
        let res = site_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}

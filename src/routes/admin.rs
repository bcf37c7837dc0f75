/**
 * Admin Routes
 * Form sign-in and sign-out backed by an HttpOnly session cookie
 */
use axum::{
    extract::{ConnectInfo, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use std::net::SocketAddr;

use crate::routes::auth::{sign_in, AuthError, LoginRequest, ACCESS_TOKEN_EXPIRY_MINUTES};
use crate::routes::site::render_document;
use crate::session::{Session, SESSION_COOKIE};
use crate::state::AppState;

const ADMIN_PATH: &str = "/admin";

fn session_cookie(value: &str, max_age: i64, secure: bool) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}{}",
        SESSION_COOKIE,
        value,
        max_age,
        if secure { "; Secure" } else { "" }
    )
}

/// POST /admin/login
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Form(form): Form<LoginRequest>,
) -> Response {
    let ip = addr.ip().to_string();
    match sign_in(&state, &ip, &form.email, &form.password).await {
        Ok((_, access_token, _)) => {
            let cookie = session_cookie(
                &access_token,
                ACCESS_TOKEN_EXPIRY_MINUTES * 60,
                state.config.is_production(),
            );
            ([(header::SET_COOKIE, cookie)], Redirect::to(ADMIN_PATH)).into_response()
        }
        Err(e) => {
            if let AuthError::Token(_) | AuthError::Internal(_) = e {
                tracing::error!(error = ?e, "Admin form login failed internally");
            }
            let (_, html) =
                render_document(&state, ADMIN_PATH, &Session::anonymous(), Some(e.to_string()));
            (e.status(), html).into_response()
        }
    }
}

/// POST /admin/logout
pub async fn logout(State(state): State<AppState>) -> Response {
    let cookie = session_cookie("", 0, state.config.is_production());
    ([(header::SET_COOKIE, cookie)], Redirect::to(ADMIN_PATH)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_state, ADMIN_EMAIL, ADMIN_PASSWORD};
    use axum::body::Body;
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;

    fn admin_router() -> Router {
        Router::new()
            .route("/admin/login", post(login))
            .route("/admin/logout", post(logout))
            .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 12345))))
            .with_state(test_state())
    }

    fn form_request(body: String) -> Request<Body> {
        Request::post("/admin/login")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_form_login_sets_cookie_and_redirects() {
        let body = format!(
            "email={}&password={}",
            ADMIN_EMAIL.replace('@', "%40"),
            ADMIN_PASSWORD
        );
        let res = admin_router().oneshot(form_request(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/admin");
        let cookie = res.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
    }

    #[tokio::test]
    async fn test_form_login_failure_renders_inline_alert() {
        let body = format!("email={}&password=wrong", ADMIN_EMAIL.replace('@', "%40"));
        let res = admin_router().oneshot(form_request(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().get(header::SET_COOKIE).is_none());
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains(r#"role="alert""#));
        assert!(html.contains("Invalid email or password"));
        assert!(html.contains(r#"action="/admin/login""#));
    }

    #[tokio::test]
    async fn test_form_login_missing_field_renders_inline_alert() {
        let body = format!("email={}", ADMIN_EMAIL.replace('@', "%40"));
        let res = admin_router().oneshot(form_request(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(res.headers().get(header::SET_COOKIE).is_none());
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains(r#"role="alert""#));
        assert!(html.contains("Email and password are required"));
        assert!(html.contains(r#"action="/admin/login""#));
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let req = Request::post("/admin/logout").body(Body::empty()).unwrap();
        let res = admin_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let cookie = res.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}

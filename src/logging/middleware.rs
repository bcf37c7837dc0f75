use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};

/// Paths polled by load balancers; logged at debug to keep logs readable.
fn is_probe(path: &str) -> bool {
    path == "/health" || path.starts_with("/health/")
}

/// Log each request once it completes, at a level matching its outcome.
pub async fn log_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let req_id: String = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status();

    let level = classify(status, &path);
    if level == tracing::Level::ERROR {
        tracing::error!(
            request_id = %req_id, method = %method, path = %path,
            status = %status, duration_ms = %duration_ms,
            "request failed"
        );
    } else if level == tracing::Level::WARN {
        tracing::warn!(
            request_id = %req_id, method = %method, path = %path,
            status = %status, duration_ms = %duration_ms,
            "request rejected"
        );
    } else if level == tracing::Level::DEBUG {
        tracing::debug!(
            request_id = %req_id, method = %method, path = %path,
            status = %status, duration_ms = %duration_ms,
            "probe served"
        );
    } else {
        tracing::info!(
            request_id = %req_id, method = %method, path = %path,
            status = %status, duration_ms = %duration_ms,
            "request served"
        );
    }

    response
}

fn classify(status: StatusCode, path: &str) -> tracing::Level {
    if status.is_server_error() {
        tracing::Level::ERROR
    } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
        tracing::Level::WARN
    } else if is_probe(path) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_outcome() {
        assert_eq!(classify(StatusCode::INTERNAL_SERVER_ERROR, "/"), tracing::Level::ERROR);
        assert_eq!(classify(StatusCode::UNAUTHORIZED, "/admin/login"), tracing::Level::WARN);
        assert_eq!(classify(StatusCode::NOT_FOUND, "/post/gone"), tracing::Level::INFO);
        assert_eq!(classify(StatusCode::OK, "/health/ready"), tracing::Level::DEBUG);
        assert_eq!(classify(StatusCode::OK, "/blog"), tracing::Level::INFO);
    }
}

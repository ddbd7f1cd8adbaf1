//! HTTP 中间件
//! 请求追踪、HTTPS 重定向

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::{Arc, Once};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::state::AppState;

tokio::task_local! {
    static REQUEST_ID: String;
}

/// 当前请求的 request_id（仅在请求追踪中间件内部可用）
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        let mut response = REQUEST_ID.scope(request_id.clone(), next.run(req)).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        // metrics 标签使用静态字符串
        let method_name = match method.as_str() {
            "GET" => "GET",
            "POST" => "POST",
            "PUT" => "PUT",
            "DELETE" => "DELETE",
            "PATCH" => "PATCH",
            "OPTIONS" => "OPTIONS",
            _ => "UNKNOWN",
        };
        let status_code = match status {
            200 => "200",
            201 => "201",
            204 => "204",
            307 => "307",
            400 => "400",
            401 => "401",
            403 => "403",
            404 => "404",
            409 => "409",
            500 => "500",
            _ => "other",
        };

        metrics::counter!("http_requests_total", "method" => method_name, "status" => status_code)
            .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            method = %method,
            uri = %uri,
            status = status,
            elapsed_ms = elapsed.as_millis(),
            "Request completed"
        );

        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

static HTTPS_PORT_WARNING: Once = Once::new();

/// HTTPS 重定向中间件
///
/// 配置了 `server.https_port` 且请求经由明文 HTTP 到达（依据 `X-Forwarded-Proto`）时
/// 返回 307；未配置端口时只记录一次警告并放行。
pub async fn https_redirect_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let Some(https_port) = state.config.server.https_port else {
        HTTPS_PORT_WARNING.call_once(|| {
            tracing::warn!("Failed to determine the https port for redirect");
        });
        return next.run(req).await;
    };

    if !arrived_over_http(req.headers()) {
        return next.run(req).await;
    }

    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    match redirect_location(req.headers(), https_port, path_and_query) {
        Some(location) => match HeaderValue::from_str(&location) {
            Ok(value) => {
                tracing::debug!(location = %location, "Redirecting to HTTPS");
                (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, value)]).into_response()
            }
            Err(_) => next.run(req).await,
        },
        None => next.run(req).await,
    }
}

fn arrived_over_http(headers: &HeaderMap) -> bool {
    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|proto| proto.trim().eq_ignore_ascii_case("http"))
        .unwrap_or(false)
}

/// 由 Host 头构造 https 地址，缺少 Host 时返回 None
fn redirect_location(headers: &HeaderMap, https_port: u16, path_and_query: &str) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?;
    let host = strip_port(host);
    if host.is_empty() {
        return None;
    }

    Some(if https_port == 443 {
        format!("https://{}{}", host, path_and_query)
    } else {
        format!("https://{}:{}{}", host, https_port, path_and_query)
    })
}

fn strip_port(host: &str) -> &str {
    // IPv6 字面量: [::1]:8080
    if let Some(end) = host.find(']') {
        return &host[..=end];
    }
    host.split(':').next().unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_or_generate_trace_id() {
        let mut headers = HeaderMap::new();
        headers.insert("x-trace-id", "test-trace-123".parse().unwrap());

        let trace_id = extract_or_generate_trace_id(&headers);
        assert_eq!(trace_id, "test-trace-123");

        let headers = HeaderMap::new();
        let trace_id = extract_or_generate_trace_id(&headers);
        assert!(!trace_id.is_empty());
        assert_ne!(trace_id, "test-trace-123");
    }

    #[test]
    fn test_arrived_over_http() {
        let mut headers = HeaderMap::new();
        assert!(!arrived_over_http(&headers));

        headers.insert("x-forwarded-proto", "http".parse().unwrap());
        assert!(arrived_over_http(&headers));

        headers.insert("x-forwarded-proto", "https, http".parse().unwrap());
        assert!(!arrived_over_http(&headers));
    }

    #[test]
    fn test_redirect_location() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "api.repairnow.pe:5000".parse().unwrap());

        assert_eq!(
            redirect_location(&headers, 5001, "/api/v1/users?limit=5").as_deref(),
            Some("https://api.repairnow.pe:5001/api/v1/users?limit=5")
        );
        assert_eq!(
            redirect_location(&headers, 443, "/").as_deref(),
            Some("https://api.repairnow.pe/")
        );

        headers.insert(header::HOST, "[::1]:5000".parse().unwrap());
        assert_eq!(
            redirect_location(&headers, 5001, "/health").as_deref(),
            Some("https://[::1]:5001/health")
        );
    }

    #[test]
    fn test_redirect_location_requires_host() {
        assert!(redirect_location(&HeaderMap::new(), 5001, "/").is_none());
    }
}

//! 请求上下文与传输层密钥中间件
//!
//! - request_context：注入 request_id/trace_id，并回写到响应头
//! - transport_gate：所有业务调用必须在 `authorization` 头携带共享密钥
//!
//! 密钥校验与用户身份无关，先于任何业务逻辑执行。

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use mnemosyne_telemetry::new_request_ids;
use tracing::{Instrument, info_span, warn};

use crate::AppState;
use crate::utils::response::domain_error;

/// 请求上下文中间件：注入 request_id/trace_id
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ids = new_request_ids();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(ids.clone());

    let span = info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %method,
        path = %path
    );

    let mut response: Response = next.run(req).instrument(span).await;
    response.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&ids.request_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response.headers_mut().insert(
        "x-trace-id",
        HeaderValue::from_str(&ids.trace_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response
}

/// 从 `authorization` 头提取共享密钥（兼容 `Bearer ` 前缀）
pub fn presented_api_key(headers: &HeaderMap) -> Option<&str> {
    let header_value = headers.get(header::AUTHORIZATION)?;
    let raw = header_value.to_str().ok()?;
    Some(raw.strip_prefix("Bearer ").unwrap_or(raw))
}

/// 传输层密钥校验中间件
pub async fn transport_gate(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Err(err) = state.gate.check(presented_api_key(req.headers())) {
        warn!(path = %req.uri().path(), "transport gate rejected call");
        return domain_error(err);
    }
    next.run(req).await
}

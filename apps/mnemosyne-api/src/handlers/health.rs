//! 健康与就绪检查（不经过传输层密钥校验）
//!
//! - GET /health：进程存活
//! - GET /readyz：Postgres 模式下探测数据库

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

pub async fn readyz(State(state): State<AppState>) -> Response {
    let Some(pool) = state.pool.as_ref() else {
        return Json(json!({ "ready": true, "storage": "memory" })).into_response();
    };
    match sqlx::query("select 1").execute(pool).await {
        Ok(_) => Json(json!({ "ready": true, "storage": "postgres" })).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "database not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "ready": false, "storage": "postgres" })),
            )
                .into_response()
        }
    }
}

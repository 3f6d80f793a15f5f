//! HTTP 响应辅助函数
//!
//! - ok：成功响应（200 + ApiResponse 封装）
//! - domain_error：按错误类别映射状态码与错误码
//!
//! | 类别 | 状态码 | 错误码 |
//! |---|---|---|
//! | NotFound | 404 | RESOURCE.NOT_FOUND |
//! | Unauthorized | 403 | AUTH.FORBIDDEN |
//! | Unauthenticated | 401 | AUTH.UNAUTHENTICATED |
//! | Conflict | 409 | RESOURCE.CONFLICT |
//! | InvalidArgument | 400 | INVALID.REQUEST |
//! | Internal | 500 | INTERNAL.ERROR |

use api_contract::ApiResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;

/// 成功响应
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 错误响应（保留原始错误信息）
pub fn domain_error(err: DomainError) -> Response {
    let (status, code) = match &err {
        DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "RESOURCE.NOT_FOUND"),
        DomainError::Unauthorized => (StatusCode::FORBIDDEN, "AUTH.FORBIDDEN"),
        DomainError::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "AUTH.UNAUTHENTICATED"),
        DomainError::Conflict(_) => (StatusCode::CONFLICT, "RESOURCE.CONFLICT"),
        DomainError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "INVALID.REQUEST"),
        DomainError::Internal(_) => {
            tracing::error!(error = %err, "internal failure");
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL.ERROR")
        }
    };
    (status, Json(ApiResponse::<()>::error(code, err.to_string()))).into_response()
}

//! 稳定的 DTO 与 API 响应契约。
//!
//! 所有字段使用 camelCase；请求体字段缺省时取空值，由服务层统一校验。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// 请求体
// ---------------------------------------------------------------------------

/// 坐标（WGS-84）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// 注册请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// 缺省为 "user"
    pub role: Option<String>,
    pub workspace_id: Option<String>,
}

/// 登录请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 按主键读取。
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetByIdRequest {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ByWorkspaceRequest {
    pub workspace_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ByGridRequest {
    pub grid_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ByNodeRequest {
    pub node_id: String,
}

/// 用户可变字段（全量覆盖）。
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserFields {
    pub id: String,
    pub email: String,
    pub username: String,
    pub picture: Option<String>,
    pub role: String,
    pub current_workspace: Option<String>,
    pub current_grid: Option<String>,
}

/// 管理员更新用户请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub current_user: String,
    pub user: UserFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub id: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteUserRequest {
    pub current_user: String,
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateWorkspaceRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateGridRequest {
    pub name: String,
    pub workspace_id: String,
}

/// 节点创建请求体（location 必填，缺省时由服务层拒绝）。
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateNodeRequest {
    pub name: String,
    pub grid_id: String,
    pub location: Option<LocationDto>,
    pub created_by: String,
}

/// 节点可变字段。
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeFields {
    pub active: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateNodeRequest {
    pub node_id: String,
    pub current_user: String,
    pub fields: NodeFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteNodeRequest {
    pub node_id: String,
    pub current_user: String,
}

/// 设备创建请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateDeviceRequest {
    #[serde(alias = "apiKey")]
    pub device_key: String,
    pub device_type: String,
    pub created_by: String,
}

/// 设备位置写入请求体（自报与管理员更新共用）。
///
/// 自报路径中 `current_user` 记为 updated_by；管理员路径中同时作为守卫的操作者。
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceLocationRequest {
    #[serde(alias = "apiKey")]
    pub device_key: String,
    pub location: Option<LocationDto>,
    pub node_id: String,
    #[serde(alias = "updatedBy")]
    pub current_user: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteDeviceRequest {
    pub device_id: String,
    pub current_user: String,
}

// ---------------------------------------------------------------------------
// 响应体
// ---------------------------------------------------------------------------

/// 用户返回结构（不含口令哈希）。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    /// 缺省为空串
    pub picture: String,
    pub current_workspace: String,
    pub current_grid: String,
    pub last_login: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDto {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDto {
    pub id: String,
    pub name: String,
    pub workspace_id: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDto {
    pub id: String,
    pub name: String,
    pub grid_id: String,
    pub active: bool,
    pub location: LocationDto,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 设备返回结构（不回传设备密钥）。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDto {
    pub id: String,
    pub device_type: String,
    pub node_id: String,
    /// 尚未上报位置时为 null
    pub location: Option<LocationDto>,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 列表返回结构。
#[derive(Debug, Clone, Serialize)]
pub struct ListDto<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> ListDto<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self { items, total }
    }
}

/// 成功标记返回结构。
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusDto {
    pub success: bool,
}

/// 安全计数返回结构。
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsDto {
    pub gate_rejections: u64,
    pub authorization_denials: u64,
    pub login_successes: u64,
    pub login_failures: u64,
    pub location_reports: u64,
}

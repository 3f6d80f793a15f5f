//! 路由定义
//!
//! 每个远程调用对应一个 POST 路由，路径为调用名的 kebab-case 形式。
//! - 身份：/sign-up, /login, /get-user, /get-users-by-workspace, /update-user,
//!   /change-password, /delete-user
//! - 层级：/create-workspace, /get-workspace, /create-grid, /get-grid, /get-grids-by-workspace
//! - 节点：/create-node, /get-node, /get-nodes-by-grid, /update-node, /delete-node
//! - 设备：/create-device, /get-device, /get-devices-by-node, /update-device,
//!   /report-device-location, /delete-device
//! - 计数：GET /metrics

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

/// 创建 API 路由（全部需要传输层密钥）
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/login", post(login))
        .route("/get-user", post(get_user))
        .route("/get-users-by-workspace", post(get_users_by_workspace))
        .route("/update-user", post(update_user))
        .route("/change-password", post(change_password))
        .route("/delete-user", post(delete_user))
        .route("/create-workspace", post(create_workspace))
        .route("/get-workspace", post(get_workspace))
        .route("/create-grid", post(create_grid))
        .route("/get-grid", post(get_grid))
        .route("/get-grids-by-workspace", post(get_grids_by_workspace))
        .route("/create-node", post(create_node))
        .route("/get-node", post(get_node))
        .route("/get-nodes-by-grid", post(get_nodes_by_grid))
        .route("/update-node", post(update_node))
        .route("/delete-node", post(delete_node))
        .route("/create-device", post(create_device))
        .route("/get-device", post(get_device))
        .route("/get-devices-by-node", post(get_devices_by_node))
        .route("/update-device", post(update_device))
        .route("/report-device-location", post(report_device_location))
        .route("/delete-device", post(delete_device))
        .route("/metrics", get(get_metrics))
}

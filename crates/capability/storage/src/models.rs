//! 数据模型
//!
//! 定义所有存储相关的数据模型：
//! - 用户模型：UserRecord, NewUser, UserUpdate
//! - 层级模型：WorkspaceRecord, NewWorkspace, GridRecord, NewGrid
//! - 节点模型：NodeRecord, NewNode, NodeUpdate
//! - 设备模型：DeviceRecord, NewDevice, DevicePlacement
//!
//! `New*` 结构不含 id 与时间戳，由存储层在插入时生成并随记录一起返回。

use chrono::{DateTime, Utc};
use domain::{GeoPoint, Role};
use uuid::Uuid;

/// 用户记录。
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub picture: Option<String>,
    pub role: Role,
    pub current_workspace: Option<Uuid>,
    pub current_grid: Option<Uuid>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 用户创建输入。
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub current_workspace: Option<Uuid>,
}

/// 用户更新输入。
///
/// 标量字段整体覆盖；引用字段为 `None` 时保持原值。
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub email: String,
    pub username: String,
    pub picture: Option<String>,
    pub role: Role,
    pub current_workspace: Option<Uuid>,
    pub current_grid: Option<Uuid>,
}

/// 工作空间记录（层级根）。
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceRecord {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewWorkspace {
    pub name: String,
}

/// 网格记录。
#[derive(Debug, Clone, PartialEq)]
pub struct GridRecord {
    pub id: Uuid,
    pub name: String,
    pub workspace_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewGrid {
    pub name: String,
    pub workspace_id: Uuid,
}

/// 节点记录（网格内的固定地理点）。
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
    pub grid_id: Uuid,
    pub location: GeoPoint,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 节点创建输入（新节点默认 active）。
#[derive(Debug, Clone)]
pub struct NewNode {
    pub name: String,
    pub grid_id: Uuid,
    pub location: GeoPoint,
    pub created_by: Uuid,
}

/// 节点更新输入（仅 active 可变）。
#[derive(Debug, Clone)]
pub struct NodeUpdate {
    pub active: bool,
    pub updated_by: Uuid,
}

/// 设备记录。
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    pub id: Uuid,
    pub device_key: String,
    pub device_type: String,
    pub node_id: Option<Uuid>,
    pub location: Option<GeoPoint>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 设备创建输入（创建时无位置）。
#[derive(Debug, Clone)]
pub struct NewDevice {
    pub device_key: String,
    pub device_type: String,
    pub created_by: Uuid,
}

/// 设备位置上报 / 挂载节点。
#[derive(Debug, Clone)]
pub struct DevicePlacement {
    pub location: GeoPoint,
    pub node_id: Uuid,
    pub updated_by: Uuid,
}

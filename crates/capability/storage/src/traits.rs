//! 存储接口 Trait 定义
//!
//! 定义所有资源存储的异步接口：
//! - UserStore：用户存储
//! - WorkspaceStore：工作空间存储
//! - GridStore：网格存储
//! - NodeStore：节点存储
//! - DeviceStore：设备存储
//!
//! 设计原则：
//! - 每类实体一个按主键存取的存储，外加简单的父引用扫描
//! - 查询返回 `Option`，更新返回 `Option`（不存在时为 None），删除返回 `bool`
//! - 创建返回带生成 id 的完整记录
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{
    DevicePlacement, DeviceRecord, GridRecord, NewDevice, NewGrid, NewNode, NewUser,
    NewWorkspace, NodeRecord, NodeUpdate, UserRecord, UserUpdate, WorkspaceRecord,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 用户存储接口
///
/// 邮箱唯一，重复时返回冲突错误。
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 创建用户
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, StorageError>;

    /// 根据 id 查找用户
    async fn find_user(&self, id: Uuid) -> Result<Option<UserRecord>, StorageError>;

    /// 根据邮箱查找用户
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError>;

    /// 列出当前工作空间为指定值的用户
    async fn list_users_by_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<UserRecord>, StorageError>;

    /// 覆盖更新用户资料
    async fn update_user(
        &self,
        id: Uuid,
        update: UserUpdate,
    ) -> Result<Option<UserRecord>, StorageError>;

    /// 替换口令哈希
    async fn set_password_hash(&self, id: Uuid, password_hash: &str)
    -> Result<bool, StorageError>;

    /// 记录最近登录时间
    async fn record_login(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<UserRecord>, StorageError>;

    /// 删除用户
    async fn delete_user(&self, id: Uuid) -> Result<bool, StorageError>;
}

/// 工作空间存储接口
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    async fn create_workspace(
        &self,
        workspace: NewWorkspace,
    ) -> Result<WorkspaceRecord, StorageError>;

    async fn find_workspace(&self, id: Uuid) -> Result<Option<WorkspaceRecord>, StorageError>;
}

/// 网格存储接口
#[async_trait]
pub trait GridStore: Send + Sync {
    async fn create_grid(&self, grid: NewGrid) -> Result<GridRecord, StorageError>;

    async fn find_grid(&self, id: Uuid) -> Result<Option<GridRecord>, StorageError>;

    /// 列出指定工作空间下的网格
    async fn list_grids_by_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<GridRecord>, StorageError>;
}

/// 节点存储接口
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// 创建节点，直接返回生成的 id
    async fn create_node(&self, node: NewNode) -> Result<NodeRecord, StorageError>;

    async fn find_node(&self, id: Uuid) -> Result<Option<NodeRecord>, StorageError>;

    /// 列出指定网格下的节点
    async fn list_nodes_by_grid(&self, grid_id: Uuid) -> Result<Vec<NodeRecord>, StorageError>;

    async fn update_node(
        &self,
        id: Uuid,
        update: NodeUpdate,
    ) -> Result<Option<NodeRecord>, StorageError>;

    /// 删除节点（不级联删除设备）
    async fn delete_node(&self, id: Uuid) -> Result<bool, StorageError>;
}

/// 设备存储接口
///
/// 设备密钥唯一，重复时返回冲突错误。
#[async_trait]
pub trait DeviceStore: Send + Sync {
    async fn create_device(&self, device: NewDevice) -> Result<DeviceRecord, StorageError>;

    async fn find_device(&self, id: Uuid) -> Result<Option<DeviceRecord>, StorageError>;

    /// 根据设备密钥查找设备
    async fn find_device_by_key(
        &self,
        device_key: &str,
    ) -> Result<Option<DeviceRecord>, StorageError>;

    /// 列出挂载在指定节点上的设备
    async fn list_devices_by_node(&self, node_id: Uuid)
    -> Result<Vec<DeviceRecord>, StorageError>;

    /// 按设备密钥写入位置并挂载节点
    async fn place_device(
        &self,
        device_key: &str,
        placement: DevicePlacement,
    ) -> Result<Option<DeviceRecord>, StorageError>;

    async fn delete_device(&self, id: Uuid) -> Result<bool, StorageError>;
}

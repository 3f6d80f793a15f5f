//! # Mnemosyne Storage 模块
//!
//! 本模块提供统一的数据存储抽象层，支持多种存储后端实现。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：每类实体一个异步 Trait（按主键存取 + 父引用扫描）
//! 2. **数据模型层** (`models.rs`)：记录、创建输入、更新输入
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型（区分唯一约束冲突）
//! 4. **连接管理层** (`connection.rs`)：连接池与建表脚本
//! 5. **实现层**：
//!    - `in_memory/`：内存存储实现（测试与无数据库运行）
//!    - `postgres/`：PostgreSQL + PostGIS 存储实现（生产环境使用）
//!
//! ## 实体层级
//!
//! Workspace 1–N Grid，Grid 1–N Node，Node 1–N Device（仅引用，不级联）。
//! 用户可引用一个当前 Workspace 和一个当前 Grid，不做引用完整性校验。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use mnemosyne_storage::{InMemoryNodeStore, NewNode, NodeStore};
//! use domain::GeoPoint;
//!
//! let store = InMemoryNodeStore::new();
//! let node = store
//!     .create_node(NewNode {
//!         name: "N1".to_string(),
//!         grid_id,
//!         location: GeoPoint::new(10.0, 20.0)?,
//!         created_by: admin_id,
//!     })
//!     .await?;
//! ```

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod traits;

pub use connection::*;
pub use error::*;
pub use models::*;
pub use traits::*;

pub use in_memory::{
    InMemoryDeviceStore, InMemoryGridStore, InMemoryNodeStore, InMemoryUserStore,
    InMemoryWorkspaceStore,
};

pub use postgres::{PgDeviceStore, PgGridStore, PgNodeStore, PgUserStore, PgWorkspaceStore};

//! # PostgreSQL 存储实现模块
//!
//! 本模块提供所有存储接口的 PostgreSQL 实现，用于生产环境。
//!
//! ## 设计原则
//!
//! 1. **参数化查询**：所有 SQL 查询使用参数绑定，防止 SQL 注入攻击
//! 2. **插入即返回**：创建操作使用 `insert ... returning`，id 由数据库生成并直接返回
//! 3. **位置字段**：节点/设备位置存为 PostGIS `geometry(Point, 4326)`，
//!    写入 `st_setsrid(st_makepoint(lon, lat), 4326)`，读取 `st_y` / `st_x`
//! 4. **唯一约束**：`users.email`、`devices.device_key` 冲突映射为 Conflict
//!
//! ## 包含的实现
//!
//! - **UserStore** (`user.rs`)
//! - **WorkspaceStore** (`workspace.rs`)
//! - **GridStore** (`grid.rs`)
//! - **NodeStore** (`node.rs`)
//! - **DeviceStore** (`device.rs`)
//!
//! ## 事务支持
//!
//! 每个操作独立执行，不跨实体开启事务。
//! 读后写（如登录更新 last_login）没有并发控制，同一实体的并发更新以最后写入为准。

pub mod device;
pub mod grid;
pub mod node;
pub mod user;
pub mod workspace;

pub use device::*;
pub use grid::*;
pub use node::*;
pub use user::*;
pub use workspace::*;

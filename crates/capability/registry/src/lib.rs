//! 资源层级能力：Workspace → Grid → Node → Device。
//!
//! 每个服务只负责自己的实体；删除节点与设备、管理员更新设备前
//! 都先经过管理员守卫（[`mnemosyne_auth::Authorizer`]）。

mod devices;
mod hierarchy;
mod nodes;

pub use devices::{DeviceAccess, DeviceService};
pub use hierarchy::HierarchyService;
pub use nodes::NodeService;

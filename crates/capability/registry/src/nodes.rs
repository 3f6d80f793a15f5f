use domain::{DomainError, GeoPoint, parse_id};
use mnemosyne_auth::Authorizer;
use mnemosyne_storage::{NewNode, NodeRecord, NodeStore, NodeUpdate};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 节点注册表。
pub struct NodeService {
    node_store: Arc<dyn NodeStore>,
    guard: Arc<dyn Authorizer>,
}

impl NodeService {
    pub fn new(node_store: Arc<dyn NodeStore>, guard: Arc<dyn Authorizer>) -> Self {
        Self { node_store, guard }
    }

    /// 创建节点，位置必填。返回的记录已带生成的主键。
    pub async fn create_node(
        &self,
        name: &str,
        grid_id: Uuid,
        location: Option<GeoPoint>,
        created_by: Uuid,
    ) -> Result<NodeRecord, DomainError> {
        let name = DomainError::require_text(name, "name")?;
        let location = location.ok_or_else(|| DomainError::invalid("location required"))?;
        let node = self
            .node_store
            .create_node(NewNode {
                name,
                grid_id,
                location,
                created_by,
            })
            .await?;
        info!(node_id = %node.id, grid_id = %grid_id, created_by = %created_by, "node created");
        Ok(node)
    }

    pub async fn get_node(&self, id: Uuid) -> Result<NodeRecord, DomainError> {
        self.node_store
            .find_node(id)
            .await?
            .ok_or_else(|| DomainError::not_found("node not found"))
    }

    pub async fn list_by_grid(&self, grid_id: Uuid) -> Result<Vec<NodeRecord>, DomainError> {
        Ok(self.node_store.list_nodes_by_grid(grid_id).await?)
    }

    /// 只允许切换 active；不经过管理员守卫。
    pub async fn update_node(
        &self,
        id: Uuid,
        updated_by: Uuid,
        active: bool,
    ) -> Result<NodeRecord, DomainError> {
        let node = self
            .node_store
            .update_node(id, NodeUpdate { active, updated_by })
            .await?
            .ok_or_else(|| DomainError::not_found("node not found"))?;
        info!(node_id = %id, updated_by = %updated_by, active, "node updated");
        Ok(node)
    }

    /// 管理员删除节点（不级联删除设备）。
    pub async fn delete_node(&self, actor: Uuid, id: &str) -> Result<(), DomainError> {
        self.guard.require_admin(actor).await?;
        let id = parse_id(id, "nodeId")?;
        if !self.node_store.delete_node(id).await? {
            return Err(DomainError::not_found("node not found"));
        }
        info!(actor = %actor, node_id = %id, "node deleted");
        Ok(())
    }
}

//! 节点内存存储实现
//!
//! 功能：
//! - 节点 CRUD 操作
//! - 按网格过滤
//! - 插入即返回生成的 id（同名节点互不干扰）

use super::lock_failed;
use crate::error::StorageError;
use crate::models::{NewNode, NodeRecord, NodeUpdate};
use crate::traits::NodeStore;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// 节点内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryNodeStore {
    nodes: RwLock<HashMap<Uuid, NodeRecord>>,
}

impl InMemoryNodeStore {
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryNodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NodeStore for InMemoryNodeStore {
    async fn create_node(&self, node: NewNode) -> Result<NodeRecord, StorageError> {
        let now = Utc::now();
        let record = NodeRecord {
            id: Uuid::new_v4(),
            name: node.name,
            active: true,
            grid_id: node.grid_id,
            location: node.location,
            created_by: node.created_by,
            updated_by: node.created_by,
            created_at: now,
            updated_at: now,
        };
        self.nodes
            .write()
            .map_err(lock_failed)?
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_node(&self, id: Uuid) -> Result<Option<NodeRecord>, StorageError> {
        Ok(self.nodes.read().map_err(lock_failed)?.get(&id).cloned())
    }

    async fn list_nodes_by_grid(&self, grid_id: Uuid) -> Result<Vec<NodeRecord>, StorageError> {
        let map = self.nodes.read().map_err(lock_failed)?;
        Ok(map
            .values()
            .filter(|item| item.grid_id == grid_id)
            .cloned()
            .collect())
    }

    async fn update_node(
        &self,
        id: Uuid,
        update: NodeUpdate,
    ) -> Result<Option<NodeRecord>, StorageError> {
        let mut map = self.nodes.write().map_err(lock_failed)?;
        let node = match map.get_mut(&id) {
            Some(node) => node,
            None => return Ok(None),
        };
        node.active = update.active;
        node.updated_by = update.updated_by;
        node.updated_at = Utc::now();
        Ok(Some(node.clone()))
    }

    async fn delete_node(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut map = self.nodes.write().map_err(lock_failed)?;
        Ok(map.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageErrorKind;

    #[tokio::test]
    async fn list_reports_poisoned_lock() {
        let store = InMemoryNodeStore::new();
        super::super::poison(&store.nodes);
        let err = store.list_nodes_by_grid(Uuid::new_v4()).await.expect_err("poisoned");
        assert_eq!(err.kind(), StorageErrorKind::Internal);
    }
}

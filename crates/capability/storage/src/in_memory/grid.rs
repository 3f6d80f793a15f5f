//! 网格内存存储实现
//!
//! 不校验 workspace_id 是否存在（与 Postgres 表一致，无外键）。

use super::lock_failed;
use crate::error::StorageError;
use crate::models::{GridRecord, NewGrid};
use crate::traits::GridStore;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

pub struct InMemoryGridStore {
    grids: RwLock<HashMap<Uuid, GridRecord>>,
}

impl InMemoryGridStore {
    pub fn new() -> Self {
        Self {
            grids: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryGridStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GridStore for InMemoryGridStore {
    async fn create_grid(&self, grid: NewGrid) -> Result<GridRecord, StorageError> {
        let now = Utc::now();
        let record = GridRecord {
            id: Uuid::new_v4(),
            name: grid.name,
            workspace_id: grid.workspace_id,
            created_at: now,
            updated_at: now,
        };
        self.grids
            .write()
            .map_err(lock_failed)?
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_grid(&self, id: Uuid) -> Result<Option<GridRecord>, StorageError> {
        Ok(self.grids.read().map_err(lock_failed)?.get(&id).cloned())
    }

    async fn list_grids_by_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<GridRecord>, StorageError> {
        let map = self.grids.read().map_err(lock_failed)?;
        Ok(map
            .values()
            .filter(|item| item.workspace_id == workspace_id)
            .cloned()
            .collect())
    }
}

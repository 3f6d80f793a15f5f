//! 工作空间内存存储实现

use super::lock_failed;
use crate::error::StorageError;
use crate::models::{NewWorkspace, WorkspaceRecord};
use crate::traits::WorkspaceStore;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

pub struct InMemoryWorkspaceStore {
    workspaces: RwLock<HashMap<Uuid, WorkspaceRecord>>,
}

impl InMemoryWorkspaceStore {
    pub fn new() -> Self {
        Self {
            workspaces: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryWorkspaceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl WorkspaceStore for InMemoryWorkspaceStore {
    async fn create_workspace(
        &self,
        workspace: NewWorkspace,
    ) -> Result<WorkspaceRecord, StorageError> {
        let now = Utc::now();
        let record = WorkspaceRecord {
            id: Uuid::new_v4(),
            name: workspace.name,
            created_at: now,
            updated_at: now,
        };
        self.workspaces
            .write()
            .map_err(lock_failed)?
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_workspace(&self, id: Uuid) -> Result<Option<WorkspaceRecord>, StorageError> {
        Ok(self.workspaces.read().map_err(lock_failed)?.get(&id).cloned())
    }
}

use domain::DomainError;
use mnemosyne_storage::{GridRecord, GridStore, NewGrid, NewWorkspace, WorkspaceRecord, WorkspaceStore};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Workspace / Grid 管理。
///
/// 创建 Grid 时不校验 Workspace 是否存在，引用按原值保存。
pub struct HierarchyService {
    workspace_store: Arc<dyn WorkspaceStore>,
    grid_store: Arc<dyn GridStore>,
}

impl HierarchyService {
    pub fn new(workspace_store: Arc<dyn WorkspaceStore>, grid_store: Arc<dyn GridStore>) -> Self {
        Self {
            workspace_store,
            grid_store,
        }
    }

    pub async fn create_workspace(&self, name: &str) -> Result<WorkspaceRecord, DomainError> {
        let name = DomainError::require_text(name, "name")?;
        let workspace = self
            .workspace_store
            .create_workspace(NewWorkspace { name })
            .await?;
        info!(workspace_id = %workspace.id, "workspace created");
        Ok(workspace)
    }

    pub async fn get_workspace(&self, id: Uuid) -> Result<WorkspaceRecord, DomainError> {
        self.workspace_store
            .find_workspace(id)
            .await?
            .ok_or_else(|| DomainError::not_found("workspace not found"))
    }

    pub async fn create_grid(&self, name: &str, workspace_id: Uuid) -> Result<GridRecord, DomainError> {
        let name = DomainError::require_text(name, "name")?;
        let grid = self
            .grid_store
            .create_grid(NewGrid { name, workspace_id })
            .await?;
        info!(grid_id = %grid.id, workspace_id = %workspace_id, "grid created");
        Ok(grid)
    }

    pub async fn get_grid(&self, id: Uuid) -> Result<GridRecord, DomainError> {
        self.grid_store
            .find_grid(id)
            .await?
            .ok_or_else(|| DomainError::not_found("grid not found"))
    }

    pub async fn list_grids(&self, workspace_id: Uuid) -> Result<Vec<GridRecord>, DomainError> {
        Ok(self.grid_store.list_grids_by_workspace(workspace_id).await?)
    }
}

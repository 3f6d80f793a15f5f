//! Postgres 工作空间存储实现

use crate::error::StorageError;
use crate::models::{NewWorkspace, WorkspaceRecord};
use crate::traits::WorkspaceStore;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub struct PgWorkspaceStore {
    pub pool: PgPool,
}

impl PgWorkspaceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn workspace_from_row(row: &PgRow) -> Result<WorkspaceRecord, StorageError> {
    Ok(WorkspaceRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait::async_trait]
impl WorkspaceStore for PgWorkspaceStore {
    async fn create_workspace(
        &self,
        workspace: NewWorkspace,
    ) -> Result<WorkspaceRecord, StorageError> {
        let row = sqlx::query(
            "insert into workspaces (name) values ($1) \
             returning id, name, created_at, updated_at",
        )
        .bind(&workspace.name)
        .fetch_one(&self.pool)
        .await?;
        workspace_from_row(&row)
    }

    async fn find_workspace(&self, id: Uuid) -> Result<Option<WorkspaceRecord>, StorageError> {
        let row = sqlx::query("select id, name, created_at, updated_at from workspaces where id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(workspace_from_row).transpose()
    }
}

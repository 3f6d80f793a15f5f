//! Postgres 网格存储实现

use crate::error::StorageError;
use crate::models::{GridRecord, NewGrid};
use crate::traits::GridStore;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub struct PgGridStore {
    pub pool: PgPool,
}

impl PgGridStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn grid_from_row(row: &PgRow) -> Result<GridRecord, StorageError> {
    Ok(GridRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        workspace_id: row.try_get("workspace_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait::async_trait]
impl GridStore for PgGridStore {
    async fn create_grid(&self, grid: NewGrid) -> Result<GridRecord, StorageError> {
        let row = sqlx::query(
            "insert into grids (name, workspace_id) values ($1, $2) \
             returning id, name, workspace_id, created_at, updated_at",
        )
        .bind(&grid.name)
        .bind(grid.workspace_id)
        .fetch_one(&self.pool)
        .await?;
        grid_from_row(&row)
    }

    async fn find_grid(&self, id: Uuid) -> Result<Option<GridRecord>, StorageError> {
        let row = sqlx::query(
            "select id, name, workspace_id, created_at, updated_at from grids where id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(grid_from_row).transpose()
    }

    async fn list_grids_by_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<GridRecord>, StorageError> {
        let rows = sqlx::query(
            "select id, name, workspace_id, created_at, updated_at \
             from grids where workspace_id = $1 order by created_at asc",
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(grid_from_row).collect()
    }
}

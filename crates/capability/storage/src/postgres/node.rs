//! Postgres 节点存储实现
//!
//! 设计要点：
//! - 位置列为 `geometry(Point, 4326)`，写入时 x = 经度、y = 纬度
//! - 创建使用 `returning`，不再按名称回查

use crate::error::StorageError;
use crate::models::{NewNode, NodeRecord, NodeUpdate};
use crate::traits::NodeStore;
use domain::GeoPoint;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const NODE_COLUMNS: &str = "id, name, active, grid_id, \
     st_y(location) as latitude, st_x(location) as longitude, \
     created_by, updated_by, created_at, updated_at";

pub struct PgNodeStore {
    pub pool: PgPool,
}

impl PgNodeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn node_from_row(row: &PgRow) -> Result<NodeRecord, StorageError> {
    let latitude: f64 = row.try_get("latitude")?;
    let longitude: f64 = row.try_get("longitude")?;
    Ok(NodeRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        active: row.try_get("active")?,
        grid_id: row.try_get("grid_id")?,
        location: GeoPoint::new(latitude, longitude)?,
        created_by: row.try_get("created_by")?,
        updated_by: row.try_get("updated_by")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait::async_trait]
impl NodeStore for PgNodeStore {
    async fn create_node(&self, node: NewNode) -> Result<NodeRecord, StorageError> {
        let sql = format!(
            "insert into nodes (name, grid_id, location, created_by, updated_by) \
             values ($1, $2, st_setsrid(st_makepoint($3, $4), $5), $6, $6) \
             returning {NODE_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&node.name)
            .bind(node.grid_id)
            .bind(node.location.longitude())
            .bind(node.location.latitude())
            .bind(node.location.srid())
            .bind(node.created_by)
            .fetch_one(&self.pool)
            .await?;
        node_from_row(&row)
    }

    async fn find_node(&self, id: Uuid) -> Result<Option<NodeRecord>, StorageError> {
        let sql = format!("select {NODE_COLUMNS} from nodes where id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(node_from_row).transpose()
    }

    async fn list_nodes_by_grid(&self, grid_id: Uuid) -> Result<Vec<NodeRecord>, StorageError> {
        let sql =
            format!("select {NODE_COLUMNS} from nodes where grid_id = $1 order by created_at asc");
        let rows = sqlx::query(&sql)
            .bind(grid_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(node_from_row).collect()
    }

    async fn update_node(
        &self,
        id: Uuid,
        update: NodeUpdate,
    ) -> Result<Option<NodeRecord>, StorageError> {
        let sql = format!(
            "update nodes set active = $1, updated_by = $2, updated_at = now() \
             where id = $3 returning {NODE_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(update.active)
            .bind(update.updated_by)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(node_from_row).transpose()
    }

    async fn delete_node(&self, id: Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from nodes where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

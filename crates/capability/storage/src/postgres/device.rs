//! Postgres 设备存储实现
//!
//! 设计要点：
//! - 设备密钥唯一约束由 `devices_device_key_key` 保证
//! - 位置列可空，首次上报前为 NULL

use crate::error::StorageError;
use crate::models::{DevicePlacement, DeviceRecord, NewDevice};
use crate::traits::DeviceStore;
use domain::GeoPoint;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const DEVICE_COLUMNS: &str = "id, device_key, type, node_id, \
     st_y(location) as latitude, st_x(location) as longitude, \
     created_by, updated_by, created_at, updated_at";

pub struct PgDeviceStore {
    pub pool: PgPool,
}

impl PgDeviceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn device_from_row(row: &PgRow) -> Result<DeviceRecord, StorageError> {
    let latitude: Option<f64> = row.try_get("latitude")?;
    let longitude: Option<f64> = row.try_get("longitude")?;
    let location = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)?),
        _ => None,
    };
    Ok(DeviceRecord {
        id: row.try_get("id")?,
        device_key: row.try_get("device_key")?,
        device_type: row.try_get("type")?,
        node_id: row.try_get("node_id")?,
        location,
        created_by: row.try_get("created_by")?,
        updated_by: row.try_get("updated_by")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait::async_trait]
impl DeviceStore for PgDeviceStore {
    async fn create_device(&self, device: NewDevice) -> Result<DeviceRecord, StorageError> {
        let sql = format!(
            "insert into devices (device_key, type, created_by, updated_by) \
             values ($1, $2, $3, $3) returning {DEVICE_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&device.device_key)
            .bind(&device.device_type)
            .bind(device.created_by)
            .fetch_one(&self.pool)
            .await?;
        device_from_row(&row)
    }

    async fn find_device(&self, id: Uuid) -> Result<Option<DeviceRecord>, StorageError> {
        let sql = format!("select {DEVICE_COLUMNS} from devices where id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(device_from_row).transpose()
    }

    async fn find_device_by_key(
        &self,
        device_key: &str,
    ) -> Result<Option<DeviceRecord>, StorageError> {
        let sql = format!("select {DEVICE_COLUMNS} from devices where device_key = $1");
        let row = sqlx::query(&sql)
            .bind(device_key)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(device_from_row).transpose()
    }

    async fn list_devices_by_node(
        &self,
        node_id: Uuid,
    ) -> Result<Vec<DeviceRecord>, StorageError> {
        let sql = format!(
            "select {DEVICE_COLUMNS} from devices where node_id = $1 order by created_at asc"
        );
        let rows = sqlx::query(&sql)
            .bind(node_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(device_from_row).collect()
    }

    async fn place_device(
        &self,
        device_key: &str,
        placement: DevicePlacement,
    ) -> Result<Option<DeviceRecord>, StorageError> {
        let sql = format!(
            "update devices set \
             location = st_setsrid(st_makepoint($1, $2), $3), \
             node_id = $4, \
             updated_by = $5, \
             updated_at = now() \
             where device_key = $6 \
             returning {DEVICE_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(placement.location.longitude())
            .bind(placement.location.latitude())
            .bind(placement.location.srid())
            .bind(placement.node_id)
            .bind(placement.updated_by)
            .bind(device_key)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(device_from_row).transpose()
    }

    async fn delete_device(&self, id: Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from devices where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

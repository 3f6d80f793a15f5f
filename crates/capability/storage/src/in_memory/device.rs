//! 设备内存存储实现
//!
//! 功能：
//! - 设备 CRUD 操作
//! - 设备密钥唯一约束
//! - 按设备密钥写入位置

use super::lock_failed;
use crate::error::StorageError;
use crate::models::{DevicePlacement, DeviceRecord, NewDevice};
use crate::traits::DeviceStore;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// 设备内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryDeviceStore {
    devices: RwLock<HashMap<Uuid, DeviceRecord>>,
}

impl InMemoryDeviceStore {
    /// 创建新的设备存储
    pub fn new() -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryDeviceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DeviceStore for InMemoryDeviceStore {
    async fn create_device(&self, device: NewDevice) -> Result<DeviceRecord, StorageError> {
        let mut map = self.devices.write().map_err(lock_failed)?;
        if map.values().any(|item| item.device_key == device.device_key) {
            return Err(StorageError::conflict("device key already exists"));
        }
        let now = Utc::now();
        let record = DeviceRecord {
            id: Uuid::new_v4(),
            device_key: device.device_key,
            device_type: device.device_type,
            node_id: None,
            location: None,
            created_by: device.created_by,
            updated_by: device.created_by,
            created_at: now,
            updated_at: now,
        };
        map.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_device(&self, id: Uuid) -> Result<Option<DeviceRecord>, StorageError> {
        Ok(self.devices.read().map_err(lock_failed)?.get(&id).cloned())
    }

    async fn find_device_by_key(
        &self,
        device_key: &str,
    ) -> Result<Option<DeviceRecord>, StorageError> {
        Ok(self
            .devices
            .read()
            .map_err(lock_failed)?
            .values()
            .find(|item| item.device_key == device_key)
            .cloned())
    }

    async fn list_devices_by_node(
        &self,
        node_id: Uuid,
    ) -> Result<Vec<DeviceRecord>, StorageError> {
        let map = self.devices.read().map_err(lock_failed)?;
        Ok(map
            .values()
            .filter(|item| item.node_id == Some(node_id))
            .cloned()
            .collect())
    }

    async fn place_device(
        &self,
        device_key: &str,
        placement: DevicePlacement,
    ) -> Result<Option<DeviceRecord>, StorageError> {
        let mut map = self.devices.write().map_err(lock_failed)?;
        let device = match map.values_mut().find(|item| item.device_key == device_key) {
            Some(device) => device,
            None => return Ok(None),
        };
        device.location = Some(placement.location);
        device.node_id = Some(placement.node_id);
        device.updated_by = placement.updated_by;
        device.updated_at = Utc::now();
        Ok(Some(device.clone()))
    }

    async fn delete_device(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut map = self.devices.write().map_err(lock_failed)?;
        Ok(map.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageErrorKind;

    #[tokio::test]
    async fn list_reports_poisoned_lock() {
        let store = InMemoryDeviceStore::new();
        super::super::poison(&store.devices);
        let err = store.list_devices_by_node(Uuid::new_v4()).await.expect_err("poisoned");
        assert_eq!(err.kind(), StorageErrorKind::Internal);
    }
}

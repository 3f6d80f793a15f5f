use domain::{DomainError, GeoPoint, parse_id};
use mnemosyne_auth::Authorizer;
use mnemosyne_storage::{DevicePlacement, DeviceRecord, DeviceStore, NewDevice};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 设备位置写入的访问策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAccess {
    /// 设备自报，仅凭设备密钥定位记录
    SelfReport,
    /// 管理员更新，先经过管理员守卫
    Admin,
}

/// 设备注册表。
pub struct DeviceService {
    device_store: Arc<dyn DeviceStore>,
    guard: Arc<dyn Authorizer>,
}

impl DeviceService {
    pub fn new(device_store: Arc<dyn DeviceStore>, guard: Arc<dyn Authorizer>) -> Self {
        Self {
            device_store,
            guard,
        }
    }

    /// 创建设备，位置为空直到首次上报。
    pub async fn create_device(
        &self,
        device_key: &str,
        device_type: &str,
        created_by: Uuid,
    ) -> Result<DeviceRecord, DomainError> {
        let device_key = DomainError::require_text(device_key, "deviceKey")?;
        let device_type = DomainError::require_text(device_type, "deviceType")?;
        let device = self
            .device_store
            .create_device(NewDevice {
                device_key,
                device_type,
                created_by,
            })
            .await?;
        info!(device_id = %device.id, created_by = %created_by, "device created");
        Ok(device)
    }

    pub async fn get_device(&self, id: Uuid) -> Result<DeviceRecord, DomainError> {
        self.device_store
            .find_device(id)
            .await?
            .ok_or_else(|| DomainError::not_found("device not found"))
    }

    pub async fn list_by_node(&self, node_id: Uuid) -> Result<Vec<DeviceRecord>, DomainError> {
        Ok(self.device_store.list_devices_by_node(node_id).await?)
    }

    /// 按设备密钥写入位置并挂到节点上。
    ///
    /// 自报与管理员更新共用这一条路径，差别只在 `access`。
    /// `coordinates` 为 (纬度, 经度) 原值，`node_id` 为线上原文，均在守卫之后校验。
    pub async fn place(
        &self,
        device_key: &str,
        coordinates: Option<(f64, f64)>,
        node_id: &str,
        actor: Uuid,
        access: DeviceAccess,
    ) -> Result<DeviceRecord, DomainError> {
        if access == DeviceAccess::Admin {
            self.guard.require_admin(actor).await?;
        }
        let device_key = DomainError::require_text(device_key, "deviceKey")?;
        let node_id = parse_id(node_id, "nodeId")?;
        let (latitude, longitude) =
            coordinates.ok_or_else(|| DomainError::invalid("location required"))?;
        let location = GeoPoint::new(latitude, longitude)?;

        let device = self
            .device_store
            .place_device(
                &device_key,
                DevicePlacement {
                    location,
                    node_id,
                    updated_by: actor,
                },
            )
            .await?
            .ok_or_else(|| DomainError::not_found("device not found"))?;
        mnemosyne_telemetry::record_location_report();
        info!(device_id = %device.id, node_id = %node_id, ?access, "device location updated");
        Ok(device)
    }

    /// 设备自报位置（无需管理员）。
    pub async fn report_location(
        &self,
        device_key: &str,
        coordinates: Option<(f64, f64)>,
        node_id: &str,
        updated_by: Uuid,
    ) -> Result<DeviceRecord, DomainError> {
        self.place(device_key, coordinates, node_id, updated_by, DeviceAccess::SelfReport)
            .await
    }

    /// 管理员更新设备位置。
    pub async fn update_device(
        &self,
        device_key: &str,
        coordinates: Option<(f64, f64)>,
        node_id: &str,
        current_user: Uuid,
    ) -> Result<DeviceRecord, DomainError> {
        self.place(device_key, coordinates, node_id, current_user, DeviceAccess::Admin)
            .await
    }

    /// 管理员删除设备。
    pub async fn delete_device(&self, actor: Uuid, id: &str) -> Result<(), DomainError> {
        self.guard.require_admin(actor).await?;
        let id = parse_id(id, "deviceId")?;
        if !self.device_store.delete_device(id).await? {
            return Err(DomainError::not_found("device not found"));
        }
        info!(actor = %actor, device_id = %id, "device deleted");
        Ok(())
    }
}

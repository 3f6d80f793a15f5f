//! 记录 → 响应 DTO 的投影
//!
//! - 标识输出为 UUID 文本
//! - 时间戳输出为 RFC 3339（UTC，毫秒精度）
//! - 缺省引用输出为哨兵值 `"null"`，缺省头像输出为空串
//! - 设备未上报位置时 location 为 null，不与 (0,0) 混淆

use api_contract::{DeviceDto, GridDto, LocationDto, NodeDto, UserDto, WorkspaceDto};
use chrono::{DateTime, SecondsFormat, Utc};
use domain::{ABSENT_REF, GeoPoint};
use mnemosyne_storage::{DeviceRecord, GridRecord, NodeRecord, UserRecord, WorkspaceRecord};
use uuid::Uuid;

pub fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn optional_ref(value: Option<Uuid>) -> String {
    value
        .map(|id| id.to_string())
        .unwrap_or_else(|| ABSENT_REF.to_string())
}

fn location_to_dto(point: GeoPoint) -> LocationDto {
    LocationDto {
        latitude: point.latitude(),
        longitude: point.longitude(),
    }
}

/// UserRecord 转 UserDto（不含口令哈希）
pub fn user_to_dto(record: UserRecord) -> UserDto {
    UserDto {
        id: record.id.to_string(),
        username: record.username,
        email: record.email,
        role: record.role.as_str().to_string(),
        picture: record.picture.unwrap_or_default(),
        current_workspace: optional_ref(record.current_workspace),
        current_grid: optional_ref(record.current_grid),
        last_login: record
            .last_login
            .map(timestamp)
            .unwrap_or_else(|| ABSENT_REF.to_string()),
        created_at: timestamp(record.created_at),
        updated_at: timestamp(record.updated_at),
    }
}

pub fn workspace_to_dto(record: WorkspaceRecord) -> WorkspaceDto {
    WorkspaceDto {
        id: record.id.to_string(),
        name: record.name,
        created_at: timestamp(record.created_at),
        updated_at: timestamp(record.updated_at),
    }
}

pub fn grid_to_dto(record: GridRecord) -> GridDto {
    GridDto {
        id: record.id.to_string(),
        name: record.name,
        workspace_id: record.workspace_id.to_string(),
        created_at: timestamp(record.created_at),
        updated_at: timestamp(record.updated_at),
    }
}

pub fn node_to_dto(record: NodeRecord) -> NodeDto {
    NodeDto {
        id: record.id.to_string(),
        name: record.name,
        grid_id: record.grid_id.to_string(),
        active: record.active,
        location: location_to_dto(record.location),
        created_by: record.created_by.to_string(),
        updated_by: record.updated_by.to_string(),
        created_at: timestamp(record.created_at),
        updated_at: timestamp(record.updated_at),
    }
}

/// DeviceRecord 转 DeviceDto（设备密钥不回传）
pub fn device_to_dto(record: DeviceRecord) -> DeviceDto {
    DeviceDto {
        id: record.id.to_string(),
        device_type: record.device_type,
        node_id: optional_ref(record.node_id),
        location: record.location.map(location_to_dto),
        created_by: record.created_by.to_string(),
        updated_by: record.updated_by.to_string(),
        created_at: timestamp(record.created_at),
        updated_at: timestamp(record.updated_at),
    }
}

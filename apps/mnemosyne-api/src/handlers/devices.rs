//! 设备 handlers
//!
//! - POST /create-device - 创建设备（无位置）
//! - POST /get-device
//! - POST /get-devices-by-node
//! - POST /report-device-location - 设备自报位置（无需管理员）
//! - POST /update-device - 管理员更新位置
//! - POST /delete-device - 管理员删除
//!
//! 自报与管理员更新共用同一个服务操作，仅访问策略不同。
//! 受守卫的操作只在这里解析 currentUser，其余字段交给服务层在守卫之后校验。

use crate::AppState;
use crate::utils::projection::device_to_dto;
use crate::utils::response::{domain_error, ok};
use crate::utils::parse_uuid;
use api_contract::{
    ByNodeRequest, CreateDeviceRequest, DeleteDeviceRequest, DeviceLocationRequest,
    GetByIdRequest, ListDto, StatusDto,
};
use axum::{Json, extract::State, response::Response};
use mnemosyne_registry::DeviceAccess;

pub async fn create_device(
    State(state): State<AppState>,
    Json(req): Json<CreateDeviceRequest>,
) -> Response {
    let created_by = match parse_uuid(&req.created_by, "createdBy") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state
        .devices
        .create_device(&req.device_key, &req.device_type, created_by)
        .await
    {
        Ok(device) => ok(device_to_dto(device)),
        Err(err) => domain_error(err),
    }
}

pub async fn get_device(
    State(state): State<AppState>,
    Json(req): Json<GetByIdRequest>,
) -> Response {
    let id = match parse_uuid(&req.id, "id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.devices.get_device(id).await {
        Ok(device) => ok(device_to_dto(device)),
        Err(err) => domain_error(err),
    }
}

pub async fn get_devices_by_node(
    State(state): State<AppState>,
    Json(req): Json<ByNodeRequest>,
) -> Response {
    let node_id = match parse_uuid(&req.node_id, "nodeId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.devices.list_by_node(node_id).await {
        Ok(devices) => ok(ListDto::new(devices.into_iter().map(device_to_dto).collect())),
        Err(err) => domain_error(err),
    }
}

pub async fn report_device_location(
    State(state): State<AppState>,
    Json(req): Json<DeviceLocationRequest>,
) -> Response {
    place_device(state, req, DeviceAccess::SelfReport).await
}

pub async fn update_device(
    State(state): State<AppState>,
    Json(req): Json<DeviceLocationRequest>,
) -> Response {
    place_device(state, req, DeviceAccess::Admin).await
}

async fn place_device(state: AppState, req: DeviceLocationRequest, access: DeviceAccess) -> Response {
    let actor = match parse_uuid(&req.current_user, "currentUser") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let coordinates = req
        .location
        .map(|location| (location.latitude, location.longitude));
    match state
        .devices
        .place(&req.device_key, coordinates, &req.node_id, actor, access)
        .await
    {
        Ok(device) => ok(device_to_dto(device)),
        Err(err) => domain_error(err),
    }
}

pub async fn delete_device(
    State(state): State<AppState>,
    Json(req): Json<DeleteDeviceRequest>,
) -> Response {
    let actor = match parse_uuid(&req.current_user, "currentUser") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.devices.delete_device(actor, &req.device_id).await {
        Ok(()) => ok(StatusDto { success: true }),
        Err(err) => domain_error(err),
    }
}

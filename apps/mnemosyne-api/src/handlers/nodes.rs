//! 节点 handlers
//!
//! - POST /create-node - 创建节点（location 必填）
//! - POST /get-node
//! - POST /get-nodes-by-grid
//! - POST /update-node - 切换 active（不经过管理员守卫）
//! - POST /delete-node - 管理员删除（不级联删除设备）

use crate::AppState;
use crate::utils::projection::node_to_dto;
use crate::utils::response::{domain_error, ok};
use crate::utils::{parse_location, parse_uuid};
use api_contract::{
    ByGridRequest, CreateNodeRequest, DeleteNodeRequest, GetByIdRequest, ListDto, StatusDto,
    UpdateNodeRequest,
};
use axum::{Json, extract::State, response::Response};

pub async fn create_node(
    State(state): State<AppState>,
    Json(req): Json<CreateNodeRequest>,
) -> Response {
    let grid_id = match parse_uuid(&req.grid_id, "gridId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let created_by = match parse_uuid(&req.created_by, "createdBy") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let location = match parse_location(req.location) {
        Ok(location) => location,
        Err(response) => return response,
    };
    match state
        .nodes
        .create_node(&req.name, grid_id, location, created_by)
        .await
    {
        Ok(node) => ok(node_to_dto(node)),
        Err(err) => domain_error(err),
    }
}

pub async fn get_node(State(state): State<AppState>, Json(req): Json<GetByIdRequest>) -> Response {
    let id = match parse_uuid(&req.id, "id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.nodes.get_node(id).await {
        Ok(node) => ok(node_to_dto(node)),
        Err(err) => domain_error(err),
    }
}

pub async fn get_nodes_by_grid(
    State(state): State<AppState>,
    Json(req): Json<ByGridRequest>,
) -> Response {
    let grid_id = match parse_uuid(&req.grid_id, "gridId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.nodes.list_by_grid(grid_id).await {
        Ok(nodes) => ok(ListDto::new(nodes.into_iter().map(node_to_dto).collect())),
        Err(err) => domain_error(err),
    }
}

pub async fn update_node(
    State(state): State<AppState>,
    Json(req): Json<UpdateNodeRequest>,
) -> Response {
    let node_id = match parse_uuid(&req.node_id, "nodeId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let updated_by = match parse_uuid(&req.current_user, "currentUser") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state
        .nodes
        .update_node(node_id, updated_by, req.fields.active)
        .await
    {
        Ok(node) => ok(node_to_dto(node)),
        Err(err) => domain_error(err),
    }
}

pub async fn delete_node(
    State(state): State<AppState>,
    Json(req): Json<DeleteNodeRequest>,
) -> Response {
    let actor = match parse_uuid(&req.current_user, "currentUser") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.nodes.delete_node(actor, &req.node_id).await {
        Ok(()) => ok(StatusDto { success: true }),
        Err(err) => domain_error(err),
    }
}

//! Workspace / Grid handlers
//!
//! - POST /create-workspace
//! - POST /get-workspace
//! - POST /create-grid（不校验 workspaceId 是否存在）
//! - POST /get-grid
//! - POST /get-grids-by-workspace

use crate::AppState;
use crate::utils::parse_uuid;
use crate::utils::projection::{grid_to_dto, workspace_to_dto};
use crate::utils::response::{domain_error, ok};
use api_contract::{ByWorkspaceRequest, CreateGridRequest, CreateWorkspaceRequest, GetByIdRequest, ListDto};
use axum::{Json, extract::State, response::Response};

pub async fn create_workspace(
    State(state): State<AppState>,
    Json(req): Json<CreateWorkspaceRequest>,
) -> Response {
    match state.hierarchy.create_workspace(&req.name).await {
        Ok(workspace) => ok(workspace_to_dto(workspace)),
        Err(err) => domain_error(err),
    }
}

pub async fn get_workspace(
    State(state): State<AppState>,
    Json(req): Json<GetByIdRequest>,
) -> Response {
    let id = match parse_uuid(&req.id, "id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.hierarchy.get_workspace(id).await {
        Ok(workspace) => ok(workspace_to_dto(workspace)),
        Err(err) => domain_error(err),
    }
}

pub async fn create_grid(
    State(state): State<AppState>,
    Json(req): Json<CreateGridRequest>,
) -> Response {
    let workspace_id = match parse_uuid(&req.workspace_id, "workspaceId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.hierarchy.create_grid(&req.name, workspace_id).await {
        Ok(grid) => ok(grid_to_dto(grid)),
        Err(err) => domain_error(err),
    }
}

pub async fn get_grid(State(state): State<AppState>, Json(req): Json<GetByIdRequest>) -> Response {
    let id = match parse_uuid(&req.id, "id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.hierarchy.get_grid(id).await {
        Ok(grid) => ok(grid_to_dto(grid)),
        Err(err) => domain_error(err),
    }
}

pub async fn get_grids_by_workspace(
    State(state): State<AppState>,
    Json(req): Json<ByWorkspaceRequest>,
) -> Response {
    let workspace_id = match parse_uuid(&req.workspace_id, "workspaceId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.hierarchy.list_grids(workspace_id).await {
        Ok(grids) => ok(ListDto::new(grids.into_iter().map(grid_to_dto).collect())),
        Err(err) => domain_error(err),
    }
}

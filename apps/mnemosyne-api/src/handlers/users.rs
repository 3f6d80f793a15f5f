//! 身份 handlers
//!
//! - POST /sign-up - 注册
//! - POST /login - 登录（刷新 lastLogin）
//! - POST /get-user - 按主键读取
//! - POST /get-users-by-workspace - 按当前工作空间列出
//! - POST /update-user - 管理员更新目标用户
//! - POST /change-password - 重置口令
//! - POST /delete-user - 管理员删除用户
//!
//! 口令哈希永远不会出现在响应里。

use crate::AppState;
use crate::utils::projection::user_to_dto;
use crate::utils::response::{domain_error, ok};
use crate::utils::{parse_ref, parse_role, parse_uuid};
use api_contract::{
    ByWorkspaceRequest, ChangePasswordRequest, DeleteUserRequest, GetByIdRequest, ListDto,
    LoginRequest, SignUpRequest, StatusDto, UpdateUserRequest,
};
use axum::{Json, extract::State, response::Response};
use mnemosyne_auth::{SignUpInput, UserChanges};

/// 注册
///
/// 角色缺省为 user；workspaceId 缺省、为空或为 "null" 时不关联工作空间，
/// 其他无法解析的文本返回 400。
pub async fn sign_up(State(state): State<AppState>, Json(req): Json<SignUpRequest>) -> Response {
    let role = match parse_role(req.role.as_deref()) {
        Ok(role) => role,
        Err(response) => return response,
    };
    let workspace = match parse_ref(req.workspace_id.as_deref(), "workspaceId") {
        Ok(workspace) => workspace,
        Err(response) => return response,
    };
    let input = SignUpInput {
        username: req.username,
        email: req.email,
        password: req.password,
        role,
        workspace,
    };
    match state.identity.sign_up(input).await {
        Ok(user) => ok(user_to_dto(user)),
        Err(err) => domain_error(err),
    }
}

pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    match state.identity.login(&req.email, &req.password).await {
        Ok(user) => ok(user_to_dto(user)),
        Err(err) => domain_error(err),
    }
}

pub async fn get_user(State(state): State<AppState>, Json(req): Json<GetByIdRequest>) -> Response {
    let id = match parse_uuid(&req.id, "id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.identity.get_user(id).await {
        Ok(user) => ok(user_to_dto(user)),
        Err(err) => domain_error(err),
    }
}

pub async fn get_users_by_workspace(
    State(state): State<AppState>,
    Json(req): Json<ByWorkspaceRequest>,
) -> Response {
    let workspace_id = match parse_uuid(&req.workspace_id, "workspaceId") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.identity.list_by_workspace(workspace_id).await {
        Ok(users) => ok(ListDto::new(users.into_iter().map(user_to_dto).collect())),
        Err(err) => domain_error(err),
    }
}

/// 管理员更新目标用户
///
/// email/username/picture/role 整体覆盖；currentWorkspace/currentGrid 未提供时保持原值。
/// 除 currentUser 外的字段由服务层在管理员校验之后解析。
pub async fn update_user(
    State(state): State<AppState>,
    Json(req): Json<UpdateUserRequest>,
) -> Response {
    let actor = match parse_uuid(&req.current_user, "currentUser") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let fields = req.user;
    let changes = UserChanges {
        id: fields.id,
        email: fields.email,
        username: fields.username,
        picture: fields.picture,
        role: fields.role,
        current_workspace: fields.current_workspace,
        current_grid: fields.current_grid,
    };
    match state.identity.update_user(actor, changes).await {
        Ok(user) => ok(user_to_dto(user)),
        Err(err) => domain_error(err),
    }
}

pub async fn change_password(
    State(state): State<AppState>,
    Json(req): Json<ChangePasswordRequest>,
) -> Response {
    let id = match parse_uuid(&req.id, "id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.identity.change_password(id, &req.password).await {
        Ok(()) => ok(StatusDto { success: true }),
        Err(err) => domain_error(err),
    }
}

pub async fn delete_user(
    State(state): State<AppState>,
    Json(req): Json<DeleteUserRequest>,
) -> Response {
    let actor = match parse_uuid(&req.current_user, "currentUser") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.identity.delete_user(actor, &req.id).await {
        Ok(()) => ok(StatusDto { success: true }),
        Err(err) => domain_error(err),
    }
}

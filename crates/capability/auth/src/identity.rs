//! 用户生命周期。

use crate::guard::Authorizer;
use crate::password::{hash_password, verify_password};
use chrono::Utc;
use domain::{DomainError, Role, parse_id, parse_optional_ref};
use mnemosyne_storage::{NewUser, UserRecord, UserStore, UserUpdate};
use std::sync::Arc;
use uuid::Uuid;

/// 注册输入（引用已解析）。
#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub workspace: Option<Uuid>,
}

/// 管理员更新用户的输入（线上原文，守卫通过后才解析）。
///
/// 标量字段整体覆盖；`current_workspace`/`current_grid` 缺省、为空或为 "null" 时保持原值。
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub id: String,
    pub email: String,
    pub username: String,
    pub picture: Option<String>,
    pub role: String,
    pub current_workspace: Option<String>,
    pub current_grid: Option<String>,
}

/// 身份服务（基于 UserStore + 管理员守卫）。
pub struct IdentityService {
    user_store: Arc<dyn UserStore>,
    guard: Arc<dyn Authorizer>,
}

impl IdentityService {
    pub fn new(user_store: Arc<dyn UserStore>, guard: Arc<dyn Authorizer>) -> Self {
        Self { user_store, guard }
    }

    /// 注册：口令哈希后落库，邮箱重复返回 Conflict。
    pub async fn sign_up(&self, input: SignUpInput) -> Result<UserRecord, DomainError> {
        let username = DomainError::require_text(&input.username, "username")?;
        let email = DomainError::require_text(&input.email, "email")?;
        require_password(&input.password)?;
        let password_hash = hash_password(&input.password)?;

        let user = self
            .user_store
            .create_user(NewUser {
                username,
                email,
                password_hash,
                role: input.role,
                current_workspace: input.workspace,
            })
            .await?;
        tracing::info!(user_id = %user.id, role = %user.role, "user signed up");
        Ok(user)
    }

    /// 登录：校验口令并刷新 last_login。
    pub async fn login(&self, email: &str, password: &str) -> Result<UserRecord, DomainError> {
        let user = self
            .user_store
            .find_user_by_email(email.trim())
            .await?
            .ok_or_else(|| {
                mnemosyne_telemetry::record_login_failure();
                DomainError::not_found("user not found")
            })?;
        if !verify_password(&user.password_hash, password)? {
            mnemosyne_telemetry::record_login_failure();
            tracing::warn!(user_id = %user.id, "login rejected");
            return Err(DomainError::Unauthenticated("invalid password".to_string()));
        }

        let user = self
            .user_store
            .record_login(user.id, Utc::now())
            .await?
            .ok_or_else(|| DomainError::not_found("user not found"))?;
        mnemosyne_telemetry::record_login_success();
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<UserRecord, DomainError> {
        self.user_store
            .find_user(id)
            .await?
            .ok_or_else(|| DomainError::not_found("user not found"))
    }

    pub async fn list_by_workspace(&self, workspace_id: Uuid) -> Result<Vec<UserRecord>, DomainError> {
        Ok(self.user_store.list_users_by_workspace(workspace_id).await?)
    }

    /// 管理员更新目标用户。
    pub async fn update_user(
        &self,
        actor: Uuid,
        changes: UserChanges,
    ) -> Result<UserRecord, DomainError> {
        self.guard.require_admin(actor).await?;
        let id = parse_id(&changes.id, "user.id")?;
        let role = changes.role.trim().parse::<Role>()?;
        let current_workspace =
            parse_optional_ref(changes.current_workspace.as_deref(), "currentWorkspace")?;
        let current_grid = parse_optional_ref(changes.current_grid.as_deref(), "currentGrid")?;
        let email = DomainError::require_text(&changes.email, "email")?;
        let username = DomainError::require_text(&changes.username, "username")?;
        let picture = changes
            .picture
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let user = self
            .user_store
            .update_user(
                id,
                UserUpdate {
                    email,
                    username,
                    picture,
                    role,
                    current_workspace,
                    current_grid,
                },
            )
            .await?
            .ok_or_else(|| DomainError::not_found("target user not found"))?;
        tracing::info!(actor = %actor, user_id = %user.id, "user updated");
        Ok(user)
    }

    /// 重置口令，不校验旧口令。
    pub async fn change_password(&self, id: Uuid, new_password: &str) -> Result<(), DomainError> {
        require_password(new_password)?;
        let password_hash = hash_password(new_password)?;
        if !self.user_store.set_password_hash(id, &password_hash).await? {
            return Err(DomainError::not_found("user not found"));
        }
        tracing::info!(user_id = %id, "password changed");
        Ok(())
    }

    /// 管理员删除用户。
    pub async fn delete_user(&self, actor: Uuid, id: &str) -> Result<(), DomainError> {
        self.guard.require_admin(actor).await?;
        let id = parse_id(id, "id")?;
        if !self.user_store.delete_user(id).await? {
            return Err(DomainError::not_found("user not found"));
        }
        tracing::info!(actor = %actor, user_id = %id, "user deleted");
        Ok(())
    }
}

fn require_password(password: &str) -> Result<(), DomainError> {
    if password.trim().is_empty() {
        return Err(DomainError::invalid("password required"));
    }
    Ok(())
}

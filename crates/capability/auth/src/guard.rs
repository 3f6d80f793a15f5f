//! 管理员守卫。

use async_trait::async_trait;
use domain::DomainError;
use mnemosyne_storage::{UserRecord, UserStore};
use std::sync::Arc;
use uuid::Uuid;

/// 特权操作前的授权检查，便于替换实现与测试。
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// 操作者不存在返回 NotFound，非管理员返回 Unauthorized。
    async fn require_admin(&self, actor: Uuid) -> Result<UserRecord, DomainError>;
}

/// 基于 UserStore 的管理员守卫（无状态）。
pub struct AuthorizationGuard {
    user_store: Arc<dyn UserStore>,
}

impl AuthorizationGuard {
    pub fn new(user_store: Arc<dyn UserStore>) -> Self {
        Self { user_store }
    }
}

#[async_trait]
impl Authorizer for AuthorizationGuard {
    async fn require_admin(&self, actor: Uuid) -> Result<UserRecord, DomainError> {
        let user = self
            .user_store
            .find_user(actor)
            .await?
            .ok_or_else(|| DomainError::not_found("current user not found"))?;
        if !user.role.is_admin() {
            mnemosyne_telemetry::record_authorization_denial();
            tracing::warn!(actor = %actor, role = %user.role, "admin required");
            return Err(DomainError::Unauthorized);
        }
        Ok(user)
    }
}

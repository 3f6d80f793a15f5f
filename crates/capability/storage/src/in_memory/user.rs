//! 用户内存存储实现
//!
//! 功能：
//! - 用户 CRUD 操作
//! - 邮箱唯一约束（与 Postgres 的 users_email_key 行为一致）

use super::lock_failed;
use crate::error::StorageError;
use crate::models::{NewUser, UserRecord, UserUpdate};
use crate::traits::UserStore;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// 用户内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, StorageError> {
        let mut map = self.users.write().map_err(lock_failed)?;
        if map.values().any(|item| item.email == user.email) {
            return Err(StorageError::conflict("email already exists"));
        }
        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            picture: None,
            role: user.role,
            current_workspace: user.current_workspace,
            current_grid: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        map.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<UserRecord>, StorageError> {
        Ok(self.users.read().map_err(lock_failed)?.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        Ok(self
            .users
            .read()
            .map_err(lock_failed)?
            .values()
            .find(|item| item.email == email)
            .cloned())
    }

    async fn list_users_by_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<UserRecord>, StorageError> {
        let map = self.users.read().map_err(lock_failed)?;
        Ok(map
            .values()
            .filter(|item| item.current_workspace == Some(workspace_id))
            .cloned()
            .collect())
    }

    async fn update_user(
        &self,
        id: Uuid,
        update: UserUpdate,
    ) -> Result<Option<UserRecord>, StorageError> {
        let mut map = self.users.write().map_err(lock_failed)?;
        if map
            .values()
            .any(|item| item.id != id && item.email == update.email)
        {
            return Err(StorageError::conflict("email already exists"));
        }
        let user = match map.get_mut(&id) {
            Some(user) => user,
            None => return Ok(None),
        };
        user.email = update.email;
        user.username = update.username;
        user.picture = update.picture;
        user.role = update.role;
        if let Some(workspace) = update.current_workspace {
            user.current_workspace = Some(workspace);
        }
        if let Some(grid) = update.current_grid {
            user.current_grid = Some(grid);
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn set_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, StorageError> {
        let mut map = self.users.write().map_err(lock_failed)?;
        match map.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn record_login(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<UserRecord>, StorageError> {
        let mut map = self.users.write().map_err(lock_failed)?;
        Ok(map.get_mut(&id).map(|user| {
            user.last_login = Some(at);
            user.clone()
        }))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut map = self.users.write().map_err(lock_failed)?;
        Ok(map.remove(&id).is_some())
    }
}

//! Postgres 用户存储实现
//!
//! 设计要点：
//! - 邮箱唯一约束由 `users_email_key` 保证
//! - 角色以文本存储，读取时还原为 `Role`

use crate::error::StorageError;
use crate::models::{NewUser, UserRecord, UserUpdate};
use crate::traits::UserStore;
use chrono::{DateTime, Utc};
use domain::Role;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, hash, picture, role, current_workspace, \
     current_grid, last_login, created_at, updated_at";

pub struct PgUserStore {
    pub pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<UserRecord, StorageError> {
    let role: String = row.try_get("role")?;
    Ok(UserRecord {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("hash")?,
        picture: row.try_get("picture")?,
        role: role.parse::<Role>()?,
        current_workspace: row.try_get("current_workspace")?,
        current_grid: row.try_get("current_grid")?,
        last_login: row.try_get("last_login")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, StorageError> {
        let sql = format!(
            "insert into users (username, email, hash, role, current_workspace) \
             values ($1, $2, $3, $4, $5) returning {USER_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.current_workspace)
            .fetch_one(&self.pool)
            .await?;
        user_from_row(&row)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<UserRecord>, StorageError> {
        let sql = format!("select {USER_COLUMNS} from users where id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        let sql = format!("select {USER_COLUMNS} from users where email = $1");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn list_users_by_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<UserRecord>, StorageError> {
        let sql = format!(
            "select {USER_COLUMNS} from users where current_workspace = $1 order by created_at asc"
        );
        let rows = sqlx::query(&sql)
            .bind(workspace_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(user_from_row).collect()
    }

    async fn update_user(
        &self,
        id: Uuid,
        update: UserUpdate,
    ) -> Result<Option<UserRecord>, StorageError> {
        let sql = format!(
            "update users set \
             email = $1, \
             username = $2, \
             picture = $3, \
             role = $4, \
             current_workspace = coalesce($5, current_workspace), \
             current_grid = coalesce($6, current_grid), \
             updated_at = now() \
             where id = $7 \
             returning {USER_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&update.email)
            .bind(&update.username)
            .bind(&update.picture)
            .bind(update.role.as_str())
            .bind(update.current_workspace)
            .bind(update.current_grid)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn set_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query("update users set hash = $2, updated_at = now() where id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn record_login(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<UserRecord>, StorageError> {
        let sql = format!("update users set last_login = $2 where id = $1 returning {USER_COLUMNS}");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(at)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from users where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! 数据库连接管理
//!
//! 提供数据库连接池初始化与建表功能：
//! - connect_pool：建立 Postgres 连接池
//! - apply_schema：执行随 crate 发布的建表脚本（幂等）
//!
//! 位置列依赖 PostGIS 扩展（`geometry(Point, 4326)`）。

use crate::error::StorageError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// 建表脚本（全部使用 `if not exists`，可重复执行）。
pub const SCHEMA_SQL: &str = include_str!("../schema.sql");

/// 默认最大连接数
pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;

/// 建立 Postgres 连接池
///
/// # 参数
/// - `database_url`：Postgres 连接字符串
/// - `max_connections`：连接池上限
///
/// # 返回
/// - `Result<PgPool, StorageError>`：连接池或错误
pub async fn connect_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, StorageError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// 执行建表脚本
pub async fn apply_schema(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}

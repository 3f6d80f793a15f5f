//! 存储层错误类型
//!
//! 定义统一的存储错误类型，用于封装底层错误：
//! - 唯一约束冲突（邮箱、设备密钥）
//! - SQL 执行错误、连接错误
//! - 数据一致性错误（列值无法还原为领域类型）

use domain::DomainError;

/// 存储错误类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    Conflict,
    Internal,
}

#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: StorageErrorKind::Internal,
            message: message.into(),
        }
    }

    /// 唯一约束冲突。
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            kind: StorageErrorKind::Conflict,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StorageError {}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                let message = match db_err.constraint() {
                    Some("users_email_key") => "email already exists".to_string(),
                    Some("devices_device_key_key") => "device key already exists".to_string(),
                    Some(other) => format!("{other} violated"),
                    None => "unique constraint violated".to_string(),
                };
                return Self::conflict(message);
            }
        }
        Self::new(err.to_string())
    }
}

impl From<DomainError> for StorageError {
    fn from(err: DomainError) -> Self {
        Self::new(format!("corrupt row: {err}"))
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err.kind {
            StorageErrorKind::Conflict => DomainError::Conflict(err.message),
            StorageErrorKind::Internal => DomainError::Internal(err.message),
        }
    }
}

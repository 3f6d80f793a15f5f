//! 领域错误分类
//!
//! 各能力模块抛出的失败都归入以下类别，并一路保留到 HTTP 边界，
//! 由边界映射为不同的状态码：
//! - NotFound：实体不存在
//! - Unauthorized：操作者不是管理员
//! - Unauthenticated：凭据错误或传输层密钥错误
//! - Conflict：唯一约束冲突（邮箱、设备密钥）
//! - InvalidArgument：标识格式错误、坐标越界、必填字段为空
//! - Internal：存储等外部协作方失败

/// 领域错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// 必填文本：去除首尾空格后不能为空。
    pub fn require_text(value: &str, field: &str) -> Result<String, Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Self::InvalidArgument(format!("{field} required")));
        }
        Ok(trimmed.to_string())
    }
}

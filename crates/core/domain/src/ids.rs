//! 标识解析
//!
//! 所有实体标识都是 UUID 文本。
//! - parse_id：必填标识，格式错误返回 InvalidArgument
//! - parse_optional_ref：可选引用，未提供 / 空串 / 哨兵值 视为缺省，
//!   其他无法解析的文本仍返回 InvalidArgument（不把"格式错误"当成"缺省"）

use crate::error::DomainError;
use uuid::Uuid;

/// 缺省引用在线上的哨兵值。
pub const ABSENT_REF: &str = "null";

/// 解析必填标识。
pub fn parse_id(value: &str, field: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| DomainError::InvalidArgument(format!("{field} is not a valid uuid")))
}

/// 解析可选引用。
pub fn parse_optional_ref(value: Option<&str>, field: &str) -> Result<Option<Uuid>, DomainError> {
    match value.map(str::trim) {
        None => Ok(None),
        Some(text) if text.is_empty() || text == ABSENT_REF => Ok(None),
        Some(text) => parse_id(text, field).map(Some),
    }
}

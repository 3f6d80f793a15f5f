//! 核心领域模型：所有模块共享的词汇。
//!
//! - [`Role`]：用户角色（admin / user），决定管理员守卫是否放行
//! - [`GeoPoint`]：带 SRID 4326 标记的经纬度
//! - [`DomainError`]：贯穿调用链的分类错误
//! - [`ids`]：UUID 标识解析（必填 / 可选引用）

pub mod error;
pub mod geo;
pub mod ids;

pub use error::DomainError;
pub use geo::{GeoPoint, SRID_WGS84};
pub use ids::{ABSENT_REF, parse_id, parse_optional_ref};

use std::fmt;
use std::str::FromStr;

/// 用户角色。
///
/// 只有 `Admin` 能通过管理员守卫。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const ADMIN: &'static str = "admin";
    pub const USER: &'static str = "user";

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => Self::ADMIN,
            Role::User => Self::USER,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    /// 严格匹配小写角色名，其他值一律视为非法参数。
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            Self::ADMIN => Ok(Role::Admin),
            Self::USER => Ok(Role::User),
            other => Err(DomainError::InvalidArgument(format!("unknown role: {other}"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! 输入解析辅助函数
//!
//! 把线上的文本字段解析为领域类型，失败时直接返回 400 响应：
//! - parse_uuid：必填标识
//! - parse_ref：可选引用（缺省 / 空串 / "null" 视为未提供）
//! - parse_role：角色（缺省为 user）
//! - parse_location：坐标范围校验

use crate::utils::response::domain_error;
use api_contract::LocationDto;
use axum::response::Response;
use domain::{GeoPoint, Role, parse_id, parse_optional_ref};
use uuid::Uuid;

/// 解析必填标识
pub fn parse_uuid(value: &str, field: &str) -> Result<Uuid, Response> {
    parse_id(value, field).map_err(domain_error)
}

/// 解析可选引用
pub fn parse_ref(value: Option<&str>, field: &str) -> Result<Option<Uuid>, Response> {
    parse_optional_ref(value, field).map_err(domain_error)
}

/// 解析角色，未提供时为普通用户
pub fn parse_role(value: Option<&str>) -> Result<Role, Response> {
    match value.map(str::trim) {
        None | Some("") => Ok(Role::User),
        Some(text) => text.parse::<Role>().map_err(domain_error),
    }
}

/// 校验坐标（缺省由服务层判定是否必填）
pub fn parse_location(value: Option<LocationDto>) -> Result<Option<GeoPoint>, Response> {
    match value {
        Some(location) => GeoPoint::new(location.latitude, location.longitude)
            .map(Some)
            .map_err(domain_error),
        None => Ok(None),
    }
}

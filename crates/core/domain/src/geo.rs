//! 地理位置表示
//!
//! 位置只是一对 (latitude, longitude)，固定标记为 WGS-84（SRID 4326）。
//! 构造时校验坐标范围，存储层按 `st_makepoint(lon, lat)` 写入。

use crate::error::DomainError;

/// WGS-84 地理坐标参考系标识。
pub const SRID_WGS84: i32 = 4326;

/// 经纬度点（SRID 4326）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// 构造并校验坐标。
    ///
    /// 纬度须在 [-90, 90]，经度须在 [-180, 180]，且均为有限值。
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::invalid(format!(
                "latitude out of range: {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::invalid(format!(
                "longitude out of range: {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn srid(&self) -> i32 {
        SRID_WGS84
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundaries() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            GeoPoint::new(90.5, 0.0),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            GeoPoint::new(0.0, -180.1),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }
}

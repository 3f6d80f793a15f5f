//! 安全计数快照。
//!
//! - GET /metrics

use api_contract::MetricsDto;
use axum::response::Response;
use mnemosyne_telemetry::metrics;

use crate::utils::response::ok;

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    ok(MetricsDto {
        gate_rejections: snapshot.gate_rejections,
        authorization_denials: snapshot.authorization_denials,
        login_successes: snapshot.login_successes,
        login_failures: snapshot.login_failures,
        location_reports: snapshot.location_reports,
    })
}

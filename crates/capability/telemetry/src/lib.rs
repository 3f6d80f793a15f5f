//! 追踪、请求 ID 生成与安全相关计数。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 计数快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// 传输层密钥校验拒绝次数
    pub gate_rejections: u64,
    /// 管理员守卫拒绝次数
    pub authorization_denials: u64,
    pub login_successes: u64,
    pub login_failures: u64,
    /// 设备位置上报次数（自报 + 管理员更新）
    pub location_reports: u64,
}

/// 进程级计数器。
pub struct TelemetryMetrics {
    gate_rejections: AtomicU64,
    authorization_denials: AtomicU64,
    login_successes: AtomicU64,
    login_failures: AtomicU64,
    location_reports: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            gate_rejections: AtomicU64::new(0),
            authorization_denials: AtomicU64::new(0),
            login_successes: AtomicU64::new(0),
            login_failures: AtomicU64::new(0),
            location_reports: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            gate_rejections: self.gate_rejections.load(Ordering::Relaxed),
            authorization_denials: self.authorization_denials.load(Ordering::Relaxed),
            login_successes: self.login_successes.load(Ordering::Relaxed),
            login_failures: self.login_failures.load(Ordering::Relaxed),
            location_reports: self.location_reports.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录传输层密钥校验拒绝。
pub fn record_gate_rejection() {
    metrics().gate_rejections.fetch_add(1, Ordering::Relaxed);
}

/// 记录管理员守卫拒绝。
pub fn record_authorization_denial() {
    metrics()
        .authorization_denials
        .fetch_add(1, Ordering::Relaxed);
}

pub fn record_login_success() {
    metrics().login_successes.fetch_add(1, Ordering::Relaxed);
}

pub fn record_login_failure() {
    metrics().login_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录设备位置写入。
pub fn record_location_report() {
    metrics().location_reports.fetch_add(1, Ordering::Relaxed);
}

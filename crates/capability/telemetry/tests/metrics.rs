use mnemosyne_telemetry::{
    TelemetryMetrics, metrics, record_authorization_denial, record_gate_rejection,
    record_login_failure,
};

#[test]
fn fresh_metrics_start_at_zero() {
    let local = TelemetryMetrics::new();
    let snapshot = local.snapshot();
    assert_eq!(snapshot.gate_rejections, 0);
    assert_eq!(snapshot.login_failures, 0);
}

#[test]
fn record_functions_increment_global_counters() {
    let before = metrics().snapshot();
    record_gate_rejection();
    record_authorization_denial();
    record_login_failure();
    let after = metrics().snapshot();

    assert!(after.gate_rejections > before.gate_rejections);
    assert!(after.authorization_denials > before.authorization_denials);
    assert!(after.login_failures > before.login_failures);
}

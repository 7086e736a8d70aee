//! Tests for adapter health-check types

use core_kernel::health::{AdapterHealth, HealthCheckResult};

#[test]
fn test_health_check_result_healthy() {
    let result = HealthCheckResult::healthy("hubspot_gateway");

    assert_eq!(result.adapter_id, "hubspot_gateway");
    assert_eq!(result.status, AdapterHealth::Healthy);
    assert!(result.is_healthy());
    assert!(result.message.is_none());
}

#[test]
fn test_health_check_result_degraded() {
    let result = HealthCheckResult::degraded("hubspot_gateway", "token missing");

    assert_eq!(result.status, AdapterHealth::Degraded);
    assert!(!result.is_healthy());
    assert_eq!(result.message.as_deref(), Some("token missing"));
}

#[test]
fn test_adapter_health_serializes_snake_case() {
    let encoded = serde_json::to_string(&AdapterHealth::Degraded).unwrap();
    assert_eq!(encoded, "\"degraded\"");
}

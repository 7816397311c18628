#[test]
fn internal_api_key_env_name_is_stable() {
    let cfg = hopebridge_payments::config::AppConfig::from_env();
    assert!(!cfg.internal_api_key.is_empty());
}

#[test]
fn outbound_timeout_has_a_sane_default() {
    let cfg = hopebridge_payments::config::AppConfig::from_env();
    assert!(cfg.outbound_timeout_ms >= 1000);
}

#[test]
fn public_endpoints_are_documented() {
    let readme = std::fs::read_to_string("README.md").unwrap_or_default();
    assert!(readme.contains("/donations"));
    assert!(readme.contains("/stripe/webhook"));
    assert!(readme.contains("/ops/readiness"));
    assert!(readme.contains("/admin/email-logs"));
}

//! Integration tests for log redaction.

use startup_gateway_app::redact_sensitive;

#[test]
fn log_redaction_tests_removes_obvious_secret_markers() {
    let raw = "authorization=Bearer abc123";
    let redacted = redact_sensitive(raw);

    assert!(redacted.contains("<redacted>"));
    assert!(!redacted.contains("abc123"));
}

#[test]
fn log_redaction_tests_masks_serialized_registration_password() {
    let body = serde_json::json!({
        "email": "founder@example.com",
        "password": "password123",
        "role": "startup",
    })
    .to_string();

    let redacted = redact_sensitive(&body);
    assert!(!redacted.contains("password123"));
    assert!(redacted.contains("founder@example.com"));
}

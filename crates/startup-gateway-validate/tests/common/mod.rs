//! Shared fixtures for validation integration tests.

use startup_gateway_core::FormValues;

/// Returns a snapshot that passes every client rule.
#[allow(dead_code)]
pub fn valid_values() -> FormValues {
    FormValues {
        email: "test@example.com".to_string(),
        password: "password123".to_string(),
        password_confirm: "password123".to_string(),
        company_name: "Acme Inc".to_string(),
        short_pitch: "We build something useful.".to_string(),
        website: "https://example.com".to_string(),
        contact: "+380000000000".to_string(),
        terms_accepted: true,
        ..FormValues::default()
    }
}

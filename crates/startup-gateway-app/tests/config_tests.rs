//! Integration tests for environment configuration.

use std::collections::HashMap;

use startup_gateway_app::{AppConfig, ENV_API_BASE_URL, ENV_REGISTER_PATH, ENV_REQUIRE_HTTPS};
use startup_gateway_transport::EndpointPolicy;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn config_tests_defaults_to_local_backend() {
    let config = AppConfig::from_lookup(lookup_from(&[]));
    assert_eq!(
        config.register_endpoint().expect("default endpoint should join"),
        "http://localhost:8000/api/auth/register/"
    );
    assert_eq!(config.endpoint_policy(), EndpointPolicy::AllowHttp);
}

#[test]
fn config_tests_reads_overrides_and_ignores_blank_values() {
    let config = AppConfig::from_lookup(lookup_from(&[
        (ENV_API_BASE_URL, "https://api.example.test"),
        (ENV_REGISTER_PATH, "   "),
        (ENV_REQUIRE_HTTPS, "TRUE"),
    ]));

    assert_eq!(
        config.register_endpoint().expect("endpoint should join"),
        "https://api.example.test/api/auth/register/"
    );
    assert_eq!(config.endpoint_policy(), EndpointPolicy::HttpsOnly);
}

#[test]
fn config_tests_rejects_malformed_base_url() {
    let config = AppConfig::from_lookup(lookup_from(&[(ENV_API_BASE_URL, "not a url")]));
    assert!(config.register_endpoint().is_err());
}

#[test]
fn config_tests_https_requirement_blocks_http_client() {
    let config = AppConfig::from_lookup(lookup_from(&[(ENV_REQUIRE_HTTPS, "on")]));
    assert!(startup_gateway_app::build_client(&config).is_err());
}

#[test]
fn config_tests_reads_process_environment() {
    // Safety:
    // - This is the only test in this binary that touches these variables.
    // - We remove the variable before returning.
    unsafe { std::env::set_var(ENV_REGISTER_PATH, "/api/v2/register/") };
    let config = AppConfig::from_env();
    // Safety: see rationale above.
    unsafe { std::env::remove_var(ENV_REGISTER_PATH) };

    assert_eq!(config.register_path, "/api/v2/register/");
}

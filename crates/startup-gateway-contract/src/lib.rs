#![warn(missing_docs)]
//! # startup-gateway-contract
//!
//! ## Purpose
//! Maps the registration backend's failure responses onto the form's error
//! model.
//!
//! ## Responsibilities
//! - Decode failure bodies leniently (malformed JSON is an empty payload).
//! - Translate backend field keys into [`FieldKey`] through a static table.
//! - Extract a general banner from `detail` / `non_field_errors`.
//! - Choose the fallback banner when the backend gave none.
//!
//! ## Data flow
//! Raw response bytes -> [`decode_error_body`] -> [`map_server_errors`] ->
//! [`ServerErrors`] merged by the form controller -> [`failure_banner`].
//!
//! ## Ownership and lifetimes
//! Mapped messages are owned strings; nothing borrows from the transient
//! response buffer.
//!
//! ## Error model
//! Unknown shapes never fail: unrecognised keys and non-string values are
//! ignored, and a non-object body yields an empty result.
//!
//! ## Security and privacy notes
//! Backend messages are shown verbatim and are expected to be user-safe.

use serde_json::Value;
use startup_gateway_core::{FieldErrors, FieldKey};

/// Banner shown after a successful registration.
pub const SUCCESS_BANNER: &str = "Check your email to verify your account.";
/// Banner shown when the backend reported only field errors.
pub const FIX_FIELDS_BANNER: &str = "Please fix the highlighted fields and try again.";
/// Banner shown when the backend reported nothing usable.
pub const GENERIC_FAILURE_BANNER: &str = "Registration failed. Please try again.";
/// Banner shown when the request never completed.
pub const NETWORK_ERROR_BANNER: &str = "Network error. Please try again.";

/// Backend error key -> form field key.
pub const BACKEND_FIELD_KEYS: &[(&str, FieldKey)] = &[
    ("email", FieldKey::Email),
    ("password", FieldKey::Password),
    ("company_name", FieldKey::CompanyName),
    ("short_pitch", FieldKey::ShortPitch),
    ("website", FieldKey::Website),
    ("contact_phone", FieldKey::Contact),
];

/// Field errors and optional banner extracted from a failure body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerErrors {
    /// Per-field messages keyed by form field.
    pub field_errors: FieldErrors,
    /// General message for the banner.
    pub banner: Option<String>,
}

impl ServerErrors {
    /// Returns `true` when neither field errors nor a banner were found.
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.banner.is_none()
    }
}

/// Parses a response body, treating malformed or empty JSON as absent.
pub fn decode_error_body(raw: &[u8]) -> Option<Value> {
    serde_json::from_slice(raw).ok()
}

/// Translates a backend failure payload into form errors.
pub fn map_server_errors(payload: Option<&Value>) -> ServerErrors {
    let Some(Value::Object(object)) = payload else {
        return ServerErrors::default();
    };

    let mut mapped = ServerErrors::default();

    if let Some(detail @ Value::String(_)) = object.get("detail") {
        mapped.banner = to_message(detail);
    }
    // non_field_errors is read after detail and wins when both are present,
    // even when it carries no text.
    if let Some(general @ (Value::String(_) | Value::Array(_))) = object.get("non_field_errors") {
        mapped.banner = to_message(general);
    }

    for (backend_key, field) in BACKEND_FIELD_KEYS {
        if let Some(message) = object.get(*backend_key).and_then(to_message) {
            mapped.field_errors.set(*field, message);
        }
    }

    mapped
}

/// Picks the banner text after a failed (non-2xx) response.
pub fn failure_banner(errors: &ServerErrors) -> String {
    if let Some(banner) = &errors.banner {
        return banner.clone();
    }
    if !errors.field_errors.is_empty() {
        return FIX_FIELDS_BANNER.to_string();
    }
    GENERIC_FAILURE_BANNER.to_string()
}

/// A non-empty string is used as-is; a list keeps its non-empty string
/// entries joined by one space. Anything else, or an empty result, is no
/// message.
fn to_message(value: &Value) -> Option<String> {
    match value {
        Value::String(message) => (!message.is_empty()).then(|| message.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(Value::as_str)
                .filter(|part| !part.is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}

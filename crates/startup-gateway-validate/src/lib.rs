#![warn(missing_docs)]
//! # startup-gateway-validate
//!
//! ## Purpose
//! Client-side validation rules for the startup registration form.
//!
//! ## Responsibilities
//! - Validate the text and checkbox inputs of a [`FormValues`] snapshot.
//! - Validate logo and pitch deck attachments from picker metadata.
//!
//! ## Data flow
//! Form snapshot -> [`validate_all`] -> [`FieldErrors`].
//! Picked file -> [`validate_logo_file`] / [`validate_pitch_deck_file`] ->
//! optional message merged by the form controller.
//!
//! ## Ownership and lifetimes
//! Validators borrow their input and return owned messages.
//!
//! ## Error model
//! Validation outcomes are data, not errors: each failing field yields one
//! human-readable message. Rules on a field are checked in priority order
//! and the first failure wins.
//!
//! ## Security and privacy notes
//! Only the password length is inspected; its value is never copied into a
//! message.
//!
//! ## Example
//! ```rust
//! use startup_gateway_core::{FieldKey, FormValues};
//! use startup_gateway_validate::validate_all;
//!
//! let errors = validate_all(&FormValues::default());
//! assert_eq!(errors.get(FieldKey::Email), Some("Email is required."));
//! ```

use std::sync::OnceLock;

use regex::Regex;
use startup_gateway_core::{FieldErrors, FieldKey, FileHandle, FormValues};
use url::Url;

/// Minimum accepted password length in UTF-16 code units, the unit browsers
/// report for input length.
pub const MIN_PASSWORD_UNITS: usize = 8;
/// Largest accepted logo in bytes (2 MiB).
pub const MAX_LOGO_BYTES: u64 = 2 * 1024 * 1024;
/// Largest accepted pitch deck in bytes (10 MiB).
pub const MAX_PITCH_DECK_BYTES: u64 = 10 * 1024 * 1024;
/// Media types accepted for logos.
pub const LOGO_MEDIA_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];
/// Media types accepted for pitch decks.
pub const PITCH_DECK_MEDIA_TYPES: [&str; 1] = ["application/pdf"];

/// User-facing validation messages.
pub mod messages {
    /// Blank email.
    pub const EMAIL_REQUIRED: &str = "Email is required.";
    /// Malformed email.
    pub const EMAIL_INVALID: &str = "Enter a valid email.";
    /// Blank password.
    pub const PASSWORD_REQUIRED: &str = "Password is required.";
    /// Password below the minimum length.
    pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters.";
    /// Blank confirmation.
    pub const PASSWORD_CONFIRM_REQUIRED: &str = "Confirm your password.";
    /// Confirmation differs from password.
    pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";
    /// Blank company name.
    pub const COMPANY_NAME_REQUIRED: &str = "Company name is required.";
    /// Blank short pitch.
    pub const SHORT_PITCH_REQUIRED: &str = "Short pitch is required.";
    /// Blank website.
    pub const WEBSITE_REQUIRED: &str = "Website is required.";
    /// Website is not an absolute http(s) URL.
    pub const WEBSITE_INVALID: &str = "Enter a valid URL (http/https).";
    /// Blank contact.
    pub const CONTACT_REQUIRED: &str = "Contact is required.";
    /// Terms checkbox left unchecked.
    pub const TERMS_REQUIRED: &str = "You must accept the Terms & Privacy Policy.";
    /// Logo media type rejected.
    pub const LOGO_TYPE: &str = "Logo must be PNG, JPG, or WEBP.";
    /// Logo too large.
    pub const LOGO_SIZE: &str = "Logo must be 2MB or smaller.";
    /// Pitch deck media type rejected.
    pub const PITCH_DECK_TYPE: &str = "Pitch deck must be a PDF.";
    /// Pitch deck too large.
    pub const PITCH_DECK_SIZE: &str = "Pitch deck must be 10MB or smaller.";
}

/// Validates every non-file input of `values`.
///
/// Pure: the same snapshot always yields the same mapping. File fields are
/// never inspected; callers merge attachment errors separately.
pub fn validate_all(values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();

    errors.set_optional(FieldKey::Email, email_error(&values.email));
    errors.set_optional(FieldKey::Password, password_error(&values.password));
    errors.set_optional(
        FieldKey::PasswordConfirm,
        password_confirm_error(&values.password, &values.password_confirm),
    );
    errors.set_optional(
        FieldKey::CompanyName,
        required(&values.company_name, messages::COMPANY_NAME_REQUIRED),
    );
    errors.set_optional(
        FieldKey::ShortPitch,
        required(&values.short_pitch, messages::SHORT_PITCH_REQUIRED),
    );
    errors.set_optional(FieldKey::Website, website_error(&values.website));
    errors.set_optional(
        FieldKey::Contact,
        required(&values.contact, messages::CONTACT_REQUIRED),
    );
    if !values.terms_accepted {
        errors.set(FieldKey::TermsAccepted, messages::TERMS_REQUIRED);
    }

    errors
}

/// Validates a picked logo. Type is checked before size.
pub fn validate_logo_file(file: &FileHandle) -> Option<String> {
    if !LOGO_MEDIA_TYPES.contains(&file.media_type.as_str()) {
        return Some(messages::LOGO_TYPE.to_string());
    }
    if file.size > MAX_LOGO_BYTES {
        return Some(messages::LOGO_SIZE.to_string());
    }
    None
}

/// Validates a picked pitch deck. Type is checked before size.
pub fn validate_pitch_deck_file(file: &FileHandle) -> Option<String> {
    if !PITCH_DECK_MEDIA_TYPES.contains(&file.media_type.as_str()) {
        return Some(messages::PITCH_DECK_TYPE.to_string());
    }
    if file.size > MAX_PITCH_DECK_BYTES {
        return Some(messages::PITCH_DECK_SIZE.to_string());
    }
    None
}

/// Dispatches to the attachment validator for `key`.
///
/// Returns `None` for non-file keys.
pub fn validate_file(key: FieldKey, file: &FileHandle) -> Option<String> {
    match key {
        FieldKey::Logo => validate_logo_file(file),
        FieldKey::PitchDeck => validate_pitch_deck_file(file),
        _ => None,
    }
}

/// Returns `true` when `value` is empty after trimming.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns `true` for `local@domain.tld`-shaped input (surrounding
/// whitespace ignored).
pub fn is_email(value: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let regex =
        EMAIL_RE.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));
    regex.is_match(value.trim())
}

/// Returns `true` when `value` parses as an absolute `http`/`https` URL.
pub fn is_http_url(value: &str) -> bool {
    Url::parse(value.trim())
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

fn required(value: &str, message: &str) -> Option<String> {
    is_blank(value).then(|| message.to_string())
}

fn email_error(email: &str) -> Option<String> {
    if is_blank(email) {
        return Some(messages::EMAIL_REQUIRED.to_string());
    }
    (!is_email(email)).then(|| messages::EMAIL_INVALID.to_string())
}

fn password_error(password: &str) -> Option<String> {
    if is_blank(password) {
        return Some(messages::PASSWORD_REQUIRED.to_string());
    }
    (password.encode_utf16().count() < MIN_PASSWORD_UNITS)
        .then(|| messages::PASSWORD_TOO_SHORT.to_string())
}

fn password_confirm_error(password: &str, confirm: &str) -> Option<String> {
    if is_blank(confirm) {
        return Some(messages::PASSWORD_CONFIRM_REQUIRED.to_string());
    }
    (confirm != password).then(|| messages::PASSWORD_MISMATCH.to_string())
}

fn website_error(website: &str) -> Option<String> {
    if is_blank(website) {
        return Some(messages::WEBSITE_REQUIRED.to_string());
    }
    (!is_http_url(website)).then(|| messages::WEBSITE_INVALID.to_string())
}

#![warn(missing_docs)]
//! # startup-gateway-core
//!
//! ## Purpose
//! Defines the pure data model shared by the `startup-gateway` workspace.
//!
//! ## Responsibilities
//! - Name every registration form input with a stable [`FieldKey`].
//! - Hold the authoritative snapshot of user input in [`FormValues`].
//! - Represent field-scoped messages ([`FieldErrors`]) and blur tracking
//!   ([`TouchedSet`]).
//! - Encode the outbound [`RegistrationPayload`] as JSON.
//!
//! ## Data flow
//! UI input mutates [`FormValues`] -> validators produce [`FieldErrors`] ->
//! a valid snapshot becomes a [`RegistrationPayload`] for transport.
//!
//! ## Ownership and lifetimes
//! All values own their strings so snapshots can be cloned into request
//! bodies without borrowing from the live form.
//!
//! ## Error model
//! Unknown field names, misuse of a non-text key as text, and JSON codec
//! failures return [`CoreError`].
//!
//! ## Security and privacy notes
//! The password is carried verbatim (never trimmed) and must not be logged.
//! [`RegistrationPayload`] intentionally has no `Display` implementation.
//!
//! ## Example
//! ```rust
//! use startup_gateway_core::{FieldErrors, FieldKey};
//!
//! let mut errors = FieldErrors::new();
//! errors.set(FieldKey::Email, "Email is required.");
//! errors.set(FieldKey::Email, "");
//! assert!(errors.is_empty());
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier of one registration form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    /// Account email.
    Email,
    /// Account password.
    Password,
    /// Repeated password.
    PasswordConfirm,
    /// Startup company name.
    CompanyName,
    /// One-paragraph pitch.
    ShortPitch,
    /// Company website.
    Website,
    /// Contact phone or handle.
    Contact,
    /// Optional logo attachment.
    Logo,
    /// Optional pitch deck attachment.
    PitchDeck,
    /// Terms & Privacy Policy checkbox.
    TermsAccepted,
}

impl FieldKey {
    /// Every field key in form order.
    pub const ALL: [FieldKey; 10] = [
        FieldKey::Email,
        FieldKey::Password,
        FieldKey::PasswordConfirm,
        FieldKey::CompanyName,
        FieldKey::ShortPitch,
        FieldKey::Website,
        FieldKey::Contact,
        FieldKey::Logo,
        FieldKey::PitchDeck,
        FieldKey::TermsAccepted,
    ];

    /// Returns the form-level name of this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Email => "email",
            FieldKey::Password => "password",
            FieldKey::PasswordConfirm => "passwordConfirm",
            FieldKey::CompanyName => "companyName",
            FieldKey::ShortPitch => "shortPitch",
            FieldKey::Website => "website",
            FieldKey::Contact => "contact",
            FieldKey::Logo => "logo",
            FieldKey::PitchDeck => "pitchDeck",
            FieldKey::TermsAccepted => "termsAccepted",
        }
    }

    /// Returns `true` for attachment keys.
    pub fn is_file(&self) -> bool {
        matches!(self, FieldKey::Logo | FieldKey::PitchDeck)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == raw)
            .ok_or_else(|| CoreError::UnknownField(raw.to_string()))
    }
}

/// Metadata of a file chosen in a file picker. Contents are never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// File name as reported by the picker.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared media type (for example `image/png`).
    pub media_type: String,
}

impl FileHandle {
    /// Creates a file handle.
    pub fn new(name: impl Into<String>, size: u64, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
        }
    }
}

/// Snapshot of every registration input. No field is ever unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Repeated password.
    pub password_confirm: String,
    /// Company name.
    pub company_name: String,
    /// Short pitch.
    pub short_pitch: String,
    /// Website URL.
    pub website: String,
    /// Contact phone or handle.
    pub contact: String,
    /// Terms & Privacy Policy acceptance.
    pub terms_accepted: bool,
    /// Selected logo, if any.
    pub logo_file: Option<FileHandle>,
    /// Selected pitch deck, if any.
    pub pitch_deck_file: Option<FileHandle>,
}

impl FormValues {
    /// Returns the text value for `key`, or `None` for non-text keys.
    pub fn text(&self, key: FieldKey) -> Option<&str> {
        let value = match key {
            FieldKey::Email => &self.email,
            FieldKey::Password => &self.password,
            FieldKey::PasswordConfirm => &self.password_confirm,
            FieldKey::CompanyName => &self.company_name,
            FieldKey::ShortPitch => &self.short_pitch,
            FieldKey::Website => &self.website,
            FieldKey::Contact => &self.contact,
            FieldKey::Logo | FieldKey::PitchDeck | FieldKey::TermsAccepted => return None,
        };
        Some(value.as_str())
    }

    /// Overwrites the text value for `key`.
    ///
    /// # Errors
    /// Returns [`CoreError::NotATextField`] for file and checkbox keys.
    pub fn set_text(&mut self, key: FieldKey, value: impl Into<String>) -> Result<(), CoreError> {
        let slot = match key {
            FieldKey::Email => &mut self.email,
            FieldKey::Password => &mut self.password,
            FieldKey::PasswordConfirm => &mut self.password_confirm,
            FieldKey::CompanyName => &mut self.company_name,
            FieldKey::ShortPitch => &mut self.short_pitch,
            FieldKey::Website => &mut self.website,
            FieldKey::Contact => &mut self.contact,
            FieldKey::Logo | FieldKey::PitchDeck | FieldKey::TermsAccepted => {
                return Err(CoreError::NotATextField(key));
            }
        };
        *slot = value.into();
        Ok(())
    }

    /// Returns the attachment stored under a file key.
    pub fn file(&self, key: FieldKey) -> Option<&FileHandle> {
        match key {
            FieldKey::Logo => self.logo_file.as_ref(),
            FieldKey::PitchDeck => self.pitch_deck_file.as_ref(),
            _ => None,
        }
    }
}

/// Field key -> message mapping. A key is present only while invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: BTreeMap<FieldKey, String>,
}

impl FieldErrors {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `key`. An empty message removes the entry.
    pub fn set(&mut self, key: FieldKey, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, message);
        }
    }

    /// Records `message` when present, otherwise clears `key`.
    pub fn set_optional(&mut self, key: FieldKey, message: Option<String>) {
        match message {
            Some(message) => self.set(key, message),
            None => self.clear(key),
        }
    }

    /// Removes any message for `key`.
    pub fn clear(&mut self, key: FieldKey) {
        self.entries.remove(&key);
    }

    /// Returns the message for `key`.
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    /// Returns `true` when `key` currently has a message.
    pub fn contains(&self, key: FieldKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no field is invalid.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.entries.iter().map(|(key, message)| (*key, message.as_str()))
    }

    /// Overlays `other` onto `self`; `other` wins on shared keys.
    pub fn merge(&mut self, other: &FieldErrors) {
        for (key, message) in other.iter() {
            self.set(key, message);
        }
    }

    /// Returns only the attachment entries.
    pub fn file_errors(&self) -> FieldErrors {
        FieldErrors {
            entries: self
                .entries
                .iter()
                .filter(|(key, _)| key.is_file())
                .map(|(key, message)| (*key, message.clone()))
                .collect(),
        }
    }
}

/// Fields the user has blurred at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchedSet {
    touched: BTreeSet<FieldKey>,
}

impl TouchedSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as touched. Idempotent.
    pub fn mark(&mut self, key: FieldKey) {
        self.touched.insert(key);
    }

    /// Returns `true` when `key` has been touched.
    pub fn is_touched(&self, key: FieldKey) -> bool {
        self.touched.contains(&key)
    }
}

/// Registration form lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    /// Editable, no request pending.
    #[default]
    Idle,
    /// Request in flight; inputs disabled.
    Submitting,
    /// Terminal confirmation view.
    Success,
}

/// Account role discriminator sent with registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Startup founder account.
    Startup,
}

/// JSON body posted to the registration endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    /// Trimmed email.
    pub email: String,
    /// Password exactly as typed.
    pub password: String,
    /// Always [`Role::Startup`] for this form.
    pub role: Role,
    /// Trimmed company name.
    pub company_name: String,
    /// Trimmed short pitch.
    pub short_pitch: String,
    /// Trimmed website.
    pub website: String,
    /// Trimmed contact value.
    pub contact_phone: String,
}

impl RegistrationPayload {
    /// Builds the normalized payload from a form snapshot.
    ///
    /// Attachments are not part of the JSON body.
    pub fn from_values(values: &FormValues) -> Self {
        Self {
            email: values.email.trim().to_string(),
            password: values.password.clone(),
            role: Role::Startup,
            company_name: values.company_name.trim().to_string(),
            short_pitch: values.short_pitch.trim().to_string(),
            website: values.website.trim().to_string(),
            contact_phone: values.contact.trim().to_string(),
        }
    }

    /// Serializes payload into JSON bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Codec`] when serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(self).map_err(CoreError::Codec)
    }

    /// Deserializes payload from JSON bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Codec`] for invalid JSON or schema mismatch.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(bytes).map_err(CoreError::Codec)
    }
}

/// Core model errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Name does not match any [`FieldKey`].
    #[error("unknown field: {0}")]
    UnknownField(String),
    /// Key does not hold a text value.
    #[error("field {0} is not a text field")]
    NotATextField(FieldKey),
    /// JSON encode/decode failure.
    #[error("payload codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}

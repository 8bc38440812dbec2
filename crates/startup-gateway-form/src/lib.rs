#![warn(missing_docs)]
//! # startup-gateway-form
//!
//! ## Purpose
//! Controller for the startup registration form.
//!
//! ## Responsibilities
//! - Own the field store, error map, touched set, and lifecycle state.
//! - Validate attachments at selection time and the full form on blur and
//!   submit.
//! - Decide which errors are visible (touched field or submit attempted).
//! - Drive the `idle -> submitting -> success | idle` submission machine and
//!   fold server responses back into field errors and the banner.
//! - Project a render-ready [`FormView`].
//!
//! ## Data flow
//! Input events -> [`RegistrationForm`] setters / [`RegistrationForm::blur`]
//! -> validators -> [`RegistrationForm::begin_submit`] ->
//! [`RegistrationPayload`] -> transport ->
//! [`RegistrationForm::complete_submit`] -> banner / field errors.
//!
//! ## Ownership and lifetimes
//! The form owns every piece of state. Submission is split in two halves so
//! the caller owns the in-flight request and the form never blocks; while a
//! request is outstanding every mutating input is rejected.
//!
//! ## Error model
//! Validation and server failures are state, not errors. [`FormError`] only
//! reports misuse: writing a non-text key as text, selecting a file for a
//! non-file key, or editing while inputs are disabled. Transport failures
//! passed to [`RegistrationForm::complete_submit`] never escape.
//!
//! ## Security and privacy notes
//! Logs carry field keys, counts, and status codes; never values.

use startup_gateway_contract::{
    NETWORK_ERROR_BANNER, SUCCESS_BANNER, decode_error_body, failure_banner, map_server_errors,
};
use startup_gateway_core::{
    CoreError, FieldErrors, FieldKey, FileHandle, FormValues, RegistrationPayload, TouchedSet,
    UiState,
};
use startup_gateway_transport::{
    RegistrationClient, TransportError, TransportResponse, classify_status,
};
use startup_gateway_validate::{validate_all, validate_file};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Label shown next to a file input with nothing selected.
pub const NO_FILE_CHOSEN: &str = "No file chosen";
/// Submit button label while editable.
pub const SUBMIT_LABEL_IDLE: &str = "Register";
/// Submit button label while a request is in flight.
pub const SUBMIT_LABEL_SUBMITTING: &str = "Registering...";

/// Visible label of each input.
pub fn field_label(key: FieldKey) -> &'static str {
    match key {
        FieldKey::Email => "Email",
        FieldKey::Password => "Password",
        FieldKey::PasswordConfirm => "Confirm password",
        FieldKey::CompanyName => "Company name",
        FieldKey::ShortPitch => "Short pitch",
        FieldKey::Website => "Website",
        FieldKey::Contact => "Contact",
        FieldKey::Logo => "Logo (optional)",
        FieldKey::PitchDeck => "Pitch deck (optional)",
        FieldKey::TermsAccepted => "I accept the Terms & Privacy Policy",
    }
}

/// Outcome of a file picker change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelection {
    /// Picker was emptied; stored file and error were cleared.
    Cleared,
    /// File passed validation and is now selected.
    Accepted,
    /// File failed validation; nothing is selected and the picker control
    /// should be reset so the same file can be chosen again.
    Rejected(String),
}

/// Outcome of pressing submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStep {
    /// Form was not idle; nothing happened.
    Ignored,
    /// Client validation failed; no request may be sent.
    Blocked(FieldErrors),
    /// Form is now submitting; send this payload exactly once.
    Send(RegistrationPayload),
}

/// Displayed value of one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValueView {
    /// Current text.
    Text(String),
    /// Checkbox state.
    Checkbox(bool),
    /// Chosen file name or [`NO_FILE_CHOSEN`].
    File(String),
}

/// Render-ready state of one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Field identity.
    pub key: FieldKey,
    /// Visible label.
    pub label: &'static str,
    /// Value to display.
    pub value: FieldValueView,
    /// Error to display inline, already filtered by visibility.
    pub error: Option<String>,
}

/// Snapshot the UI renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// Lifecycle state; `Success` replaces the form with a confirmation.
    pub state: UiState,
    /// Banner text above the form.
    pub banner: Option<String>,
    /// Every input in form order.
    pub fields: Vec<FieldView>,
    /// Submit button label.
    pub submit_label: &'static str,
    /// Whether inputs and the submit control are disabled.
    pub disabled: bool,
}

/// Registration form controller.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    values: FormValues,
    errors: FieldErrors,
    touched: TouchedSet,
    submit_attempted: bool,
    state: UiState,
    banner: Option<String>,
}

impl RegistrationForm {
    /// Creates an empty, idle form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input snapshot.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// All current errors, visible or not.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Lifecycle state.
    pub fn state(&self) -> UiState {
        self.state
    }

    /// Banner text, if any.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Whether `key` has been blurred or picked at least once.
    pub fn is_touched(&self, key: FieldKey) -> bool {
        self.touched.is_touched(key)
    }

    /// Returns `true` while inputs and the submit control are disabled.
    pub fn inputs_disabled(&self) -> bool {
        self.state != UiState::Idle
    }

    /// Overwrites a text input.
    ///
    /// # Errors
    /// Returns [`FormError::InputsDisabled`] unless idle and
    /// [`FormError::Core`] for non-text keys.
    pub fn set_text(&mut self, key: FieldKey, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.values.set_text(key, value)?;
        Ok(())
    }

    /// Overwrites the terms checkbox.
    ///
    /// # Errors
    /// Returns [`FormError::InputsDisabled`] unless idle.
    pub fn set_terms_accepted(&mut self, accepted: bool) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.values.terms_accepted = accepted;
        Ok(())
    }

    /// Handles focus leaving `key`: marks it touched and revalidates.
    ///
    /// Ignored unless idle.
    pub fn blur(&mut self, key: FieldKey) {
        if self.inputs_disabled() {
            return;
        }
        self.touched.mark(key);
        self.revalidate();
    }

    /// Handles a logo picker change.
    ///
    /// # Errors
    /// Returns [`FormError::InputsDisabled`] unless idle.
    pub fn select_logo(&mut self, file: Option<FileHandle>) -> Result<FileSelection, FormError> {
        self.select_file(FieldKey::Logo, file)
    }

    /// Handles a pitch deck picker change.
    ///
    /// # Errors
    /// Returns [`FormError::InputsDisabled`] unless idle.
    pub fn select_pitch_deck(
        &mut self,
        file: Option<FileHandle>,
    ) -> Result<FileSelection, FormError> {
        self.select_file(FieldKey::PitchDeck, file)
    }

    /// Handles a picker change for `key`, validating the file immediately.
    ///
    /// # Errors
    /// Returns [`FormError::NotAFileField`] for non-file keys and
    /// [`FormError::InputsDisabled`] unless idle.
    pub fn select_file(
        &mut self,
        key: FieldKey,
        file: Option<FileHandle>,
    ) -> Result<FileSelection, FormError> {
        if !key.is_file() {
            return Err(FormError::NotAFileField(key));
        }
        self.ensure_editable()?;
        self.touched.mark(key);

        let Some(file) = file else {
            *self.file_slot(key) = None;
            self.errors.clear(key);
            return Ok(FileSelection::Cleared);
        };

        if let Some(message) = validate_file(key, &file) {
            debug!(field = %key, "attachment rejected");
            *self.file_slot(key) = None;
            self.errors.set(key, message.clone());
            return Ok(FileSelection::Rejected(message));
        }

        *self.file_slot(key) = Some(file);
        self.errors.clear(key);
        Ok(FileSelection::Accepted)
    }

    /// Label for a file input: the chosen name or [`NO_FILE_CHOSEN`].
    pub fn file_label(&self, key: FieldKey) -> &str {
        self.values
            .file(key)
            .map(|file| file.name.as_str())
            .unwrap_or(NO_FILE_CHOSEN)
    }

    /// Error to display for `key`: present only when the field has an error
    /// and either it was touched or submit was attempted.
    pub fn visible_error(&self, key: FieldKey) -> Option<&str> {
        let message = self.errors.get(key)?;
        (self.submit_attempted || self.touched.is_touched(key)).then_some(message)
    }

    /// Submit button label for the current state.
    pub fn submit_label(&self) -> &'static str {
        if self.state == UiState::Submitting {
            SUBMIT_LABEL_SUBMITTING
        } else {
            SUBMIT_LABEL_IDLE
        }
    }

    /// Handles a submit press.
    ///
    /// Marks submit attempted, clears the banner, and validates the whole
    /// form plus current attachment errors. With no errors the form moves to
    /// `submitting` and returns the payload to send.
    pub fn begin_submit(&mut self) -> SubmitStep {
        if self.inputs_disabled() {
            debug!(state = ?self.state, "submit ignored");
            return SubmitStep::Ignored;
        }

        self.submit_attempted = true;
        self.banner = None;
        self.revalidate();

        if !self.errors.is_empty() {
            info!(invalid_fields = self.errors.len(), "submit blocked by validation");
            return SubmitStep::Blocked(self.errors.clone());
        }

        self.state = UiState::Submitting;
        info!("registration submitting");
        SubmitStep::Send(RegistrationPayload::from_values(&self.values))
    }

    /// Applies the outcome of the request issued for [`SubmitStep::Send`].
    ///
    /// Ignored unless submitting.
    pub fn complete_submit(&mut self, outcome: Result<TransportResponse, TransportError>) {
        if self.state != UiState::Submitting {
            debug!(state = ?self.state, "stale submission outcome ignored");
            return;
        }

        let response = match outcome {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, "registration request failed");
                self.banner = Some(NETWORK_ERROR_BANNER.to_string());
                self.state = UiState::Idle;
                return;
            }
        };

        if response.is_success() {
            info!(status = response.status, "registration accepted");
            self.banner = Some(SUCCESS_BANNER.to_string());
            self.state = UiState::Success;
            return;
        }

        let body = decode_error_body(&response.body);
        let server = map_server_errors(body.as_ref());
        warn!(
            status = response.status,
            class = ?classify_status(response.status),
            field_errors = server.field_errors.len(),
            "registration rejected"
        );
        self.errors.merge(&server.field_errors);
        self.banner = Some(failure_banner(&server));
        self.state = UiState::Idle;
    }

    /// Runs a full submission synchronously through `client`.
    ///
    /// Returns the resulting state. Transport failures are absorbed into the
    /// banner.
    pub fn submit(&mut self, client: &RegistrationClient) -> UiState {
        if let SubmitStep::Send(payload) = self.begin_submit() {
            let outcome = client.register(&payload);
            self.complete_submit(outcome);
        }
        self.state
    }

    /// Builds the render snapshot.
    pub fn view(&self) -> FormView {
        let fields = FieldKey::ALL
            .iter()
            .map(|key| FieldView {
                key: *key,
                label: field_label(*key),
                value: self.value_view(*key),
                error: self.visible_error(*key).map(str::to_string),
            })
            .collect();

        FormView {
            state: self.state,
            banner: self.banner.clone(),
            fields,
            submit_label: self.submit_label(),
            disabled: self.inputs_disabled(),
        }
    }

    fn value_view(&self, key: FieldKey) -> FieldValueView {
        if key.is_file() {
            return FieldValueView::File(self.file_label(key).to_string());
        }
        match self.values.text(key) {
            Some(text) => FieldValueView::Text(text.to_string()),
            None => FieldValueView::Checkbox(self.values.terms_accepted),
        }
    }

    /// Recomputes client errors, carrying attachment errors over untouched.
    fn revalidate(&mut self) {
        let file_errors = self.errors.file_errors();
        self.errors = validate_all(&self.values);
        self.errors.merge(&file_errors);
    }

    fn file_slot(&mut self, key: FieldKey) -> &mut Option<FileHandle> {
        if key == FieldKey::Logo {
            &mut self.values.logo_file
        } else {
            &mut self.values.pitch_deck_file
        }
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        if self.inputs_disabled() {
            return Err(FormError::InputsDisabled(self.state));
        }
        Ok(())
    }
}

/// Misuse of the form controller.
#[derive(Debug, Error)]
pub enum FormError {
    /// Field store rejected the write.
    #[error("field store error: {0}")]
    Core(#[from] CoreError),
    /// Key is not an attachment.
    #[error("field {0} does not accept files")]
    NotAFileField(FieldKey),
    /// Inputs are disabled in this state.
    #[error("inputs are disabled while {0:?}")]
    InputsDisabled(UiState),
}

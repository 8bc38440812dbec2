//! Integration tests for the render snapshot.

mod common;

use startup_gateway_core::{FieldKey, UiState};
use startup_gateway_form::{FieldValueView, RegistrationForm, SubmitStep};

#[test]
fn form_view_tests_projects_values_and_visible_errors() {
    let mut form = RegistrationForm::new();
    form.set_text(FieldKey::Email, "bad")
        .expect("email should accept input");
    form.blur(FieldKey::Email);

    let view = form.view();
    assert_eq!(view.fields.len(), FieldKey::ALL.len());
    assert_eq!(view.state, UiState::Idle);
    assert!(!view.disabled);

    let email = view
        .fields
        .iter()
        .find(|field| field.key == FieldKey::Email)
        .expect("email field should be present");
    assert_eq!(email.value, FieldValueView::Text("bad".to_string()));
    assert_eq!(email.error.as_deref(), Some("Enter a valid email."));

    let website = view
        .fields
        .iter()
        .find(|field| field.key == FieldKey::Website)
        .expect("website field should be present");
    assert_eq!(website.error, None);

    let terms = view
        .fields
        .iter()
        .find(|field| field.key == FieldKey::TermsAccepted)
        .expect("terms field should be present");
    assert_eq!(terms.value, FieldValueView::Checkbox(false));
}

#[test]
fn form_view_tests_reflects_submitting_state() {
    let mut form = RegistrationForm::new();
    common::fill_valid_form(&mut form);
    assert!(matches!(form.begin_submit(), SubmitStep::Send(_)));

    let view = form.view();
    assert!(view.disabled);
    assert_eq!(view.submit_label, "Registering...");
    assert!(view.fields.iter().all(|field| field.error.is_none()));
}

//! Integration tests for field error bookkeeping.

use startup_gateway_core::{FieldErrors, FieldKey, TouchedSet};

#[test]
fn field_errors_tests_never_store_empty_messages() {
    let mut errors = FieldErrors::new();
    errors.set(FieldKey::Website, "Website is required.");
    errors.set_optional(FieldKey::Website, None);
    errors.set(FieldKey::Contact, "");

    assert!(errors.is_empty());
    assert!(!errors.contains(FieldKey::Contact));
}

#[test]
fn field_errors_tests_iterate_in_form_order() {
    let mut errors = FieldErrors::new();
    errors.set(FieldKey::TermsAccepted, "terms");
    errors.set(FieldKey::Email, "email");
    errors.set(FieldKey::Website, "website");

    let keys: Vec<FieldKey> = errors.iter().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        vec![FieldKey::Email, FieldKey::Website, FieldKey::TermsAccepted]
    );
}

#[test]
fn field_errors_tests_touched_marking_is_idempotent() {
    let mut touched = TouchedSet::new();
    touched.mark(FieldKey::Email);
    touched.mark(FieldKey::Email);

    assert!(touched.is_touched(FieldKey::Email));
    assert!(!touched.is_touched(FieldKey::Password));
}

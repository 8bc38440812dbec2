//! Integration tests for attachment selection.

mod common;

use startup_gateway_core::{FieldKey, FileHandle};
use startup_gateway_form::{FileSelection, NO_FILE_CHOSEN, RegistrationForm, SubmitStep};

#[test]
fn file_selection_tests_logo_rejects_text_then_accepts_png() {
    let mut form = RegistrationForm::new();

    let rejected = form
        .select_logo(Some(FileHandle::new("logo.txt", 1, "text/plain")))
        .expect("logo picker should be editable");
    assert_eq!(
        rejected,
        FileSelection::Rejected("Logo must be PNG, JPG, or WEBP.".to_string())
    );
    assert_eq!(
        form.visible_error(FieldKey::Logo),
        Some("Logo must be PNG, JPG, or WEBP.")
    );
    assert_eq!(form.file_label(FieldKey::Logo), NO_FILE_CHOSEN);

    let accepted = form
        .select_logo(Some(FileHandle::new("logo.png", 1, "image/png")))
        .expect("logo picker should be editable");
    assert_eq!(accepted, FileSelection::Accepted);
    assert_eq!(form.visible_error(FieldKey::Logo), None);
    assert_eq!(form.file_label(FieldKey::Logo), "logo.png");
}

#[test]
fn file_selection_tests_pitch_deck_rejects_text_then_accepts_pdf() {
    let mut form = RegistrationForm::new();

    form.select_pitch_deck(Some(FileHandle::new("deck.txt", 1, "text/plain")))
        .expect("deck picker should be editable");
    assert_eq!(
        form.visible_error(FieldKey::PitchDeck),
        Some("Pitch deck must be a PDF.")
    );
    assert_eq!(form.file_label(FieldKey::PitchDeck), NO_FILE_CHOSEN);

    form.select_pitch_deck(Some(FileHandle::new("deck.pdf", 1, "application/pdf")))
        .expect("deck picker should be editable");
    assert_eq!(form.visible_error(FieldKey::PitchDeck), None);
    assert_eq!(form.file_label(FieldKey::PitchDeck), "deck.pdf");
}

#[test]
fn file_selection_tests_file_errors_survive_blur_revalidation() {
    let mut form = RegistrationForm::new();
    form.select_logo(Some(FileHandle::new("big.png", 3 * 1024 * 1024, "image/png")))
        .expect("logo picker should be editable");

    form.blur(FieldKey::Email);
    assert_eq!(
        form.errors().get(FieldKey::Logo),
        Some("Logo must be 2MB or smaller.")
    );
}

#[test]
fn file_selection_tests_invalid_file_blocks_submit_until_cleared() {
    let mut form = RegistrationForm::new();
    common::fill_valid_form(&mut form);
    form.select_pitch_deck(Some(FileHandle::new("deck.docx", 1, "application/msword")))
        .expect("deck picker should be editable");

    let SubmitStep::Blocked(errors) = form.begin_submit() else {
        panic!("rejected attachment should block submit");
    };
    assert_eq!(errors.len(), 1);
    assert!(errors.contains(FieldKey::PitchDeck));

    let cleared = form
        .select_pitch_deck(None)
        .expect("deck picker should be editable");
    assert_eq!(cleared, FileSelection::Cleared);
    assert!(matches!(form.begin_submit(), SubmitStep::Send(_)));
}

#[test]
fn file_selection_tests_absent_files_never_block_submit() {
    let mut form = RegistrationForm::new();
    common::fill_valid_form(&mut form);

    assert!(matches!(form.begin_submit(), SubmitStep::Send(_)));
    assert_eq!(form.file_label(FieldKey::Logo), NO_FILE_CHOSEN);
}

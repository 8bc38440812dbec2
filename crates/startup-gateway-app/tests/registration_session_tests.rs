//! Integration tests for the line-oriented registration session.

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use startup_gateway_app::{RESUBMIT_PROMPT, SPAM_HINT, run_registration};
use startup_gateway_core::UiState;
use startup_gateway_form::RegistrationForm;
use startup_gateway_transport::{
    RegistrationClient, RegistrationTransport, TransportError, TransportResponse,
};

/// One answer per field, in form order.
const VALID_PASS: &str = "test@example.com\n\
password123\n\
password123\n\
Acme Inc\n\
We build something useful.\n\
https://example.com\n\
+380000000000\n\
\n\
\n\
y\n";

/// Replays queued outcomes; a drained queue answers like a dead network.
#[derive(Debug, Default)]
struct QueuedTransport {
    outcomes: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    bodies: Mutex<Vec<Vec<u8>>>,
}

impl QueuedTransport {
    fn with(outcomes: Vec<Result<TransportResponse, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            bodies: Mutex::new(Vec::new()),
        })
    }

    fn request_count(&self) -> usize {
        self.bodies.lock().expect("body lock should work").len()
    }

    fn body(&self, index: usize) -> Value {
        let bodies = self.bodies.lock().expect("body lock should work");
        serde_json::from_slice(&bodies[index]).expect("request body should be JSON")
    }
}

impl RegistrationTransport for QueuedTransport {
    fn post_json(&self, _endpoint: &str, body: &[u8]) -> Result<TransportResponse, TransportError> {
        self.bodies
            .lock()
            .expect("body lock should work")
            .push(body.to_vec());
        self.outcomes
            .lock()
            .expect("outcome lock should work")
            .pop_front()
            .unwrap_or(Err(TransportError::Network("connection refused".to_string())))
    }
}

fn responding(status: u16, body: &str) -> Result<TransportResponse, TransportError> {
    Ok(TransportResponse {
        status,
        body: body.as_bytes().to_vec(),
    })
}

fn run_session(transport: &Arc<QueuedTransport>, input: &str) -> (UiState, String) {
    let client = RegistrationClient::new(
        "http://localhost:8000/api/auth/register/",
        transport.clone(),
    )
    .expect("client should build");
    let mut form = RegistrationForm::new();
    let mut output = Vec::new();
    let state = run_registration(
        &mut form,
        &client,
        &mut Cursor::new(input.as_bytes()),
        &mut output,
    )
    .expect("session should not fail on in-memory io");
    (state, String::from_utf8(output).expect("output should be utf-8"))
}

#[test]
fn registration_session_tests_network_failure_sends_once_per_pass() {
    let transport = QueuedTransport::with(Vec::new());
    let (state, output) = run_session(&transport, VALID_PASS);

    assert_eq!(transport.request_count(), 1);
    assert_eq!(state, UiState::Idle);
    assert_eq!(output.matches("Network error. Please try again.").count(), 1);
    assert!(output.contains(RESUBMIT_PROMPT));
}

#[test]
fn registration_session_tests_detail_only_failure_waits_for_confirmation() {
    let transport = QueuedTransport::with(vec![responding(
        429,
        r#"{"detail":"Too many attempts."}"#,
    )]);
    let (state, output) = run_session(&transport, &format!("{VALID_PASS}n\n"));

    assert_eq!(transport.request_count(), 1);
    assert_eq!(state, UiState::Idle);
    assert_eq!(output.matches("Too many attempts.").count(), 1);
}

#[test]
fn registration_session_tests_confirmed_retry_sends_again() {
    let transport = QueuedTransport::with(Vec::new());
    let (state, output) = run_session(&transport, &format!("{VALID_PASS}yes\n"));

    assert_eq!(transport.request_count(), 2);
    assert_eq!(state, UiState::Idle);
    assert_eq!(output.matches(RESUBMIT_PROMPT).count(), 2);
}

#[test]
fn registration_session_tests_retry_asks_only_for_rejected_fields() {
    let transport = QueuedTransport::with(vec![
        responding(400, r#"{"email":["Email already exists."]}"#),
        responding(201, "{}"),
    ]);
    let input = format!("{VALID_PASS}y\nother@example.com\n");
    let (state, output) = run_session(&transport, &input);

    assert_eq!(state, UiState::Success);
    assert_eq!(transport.request_count(), 2);
    assert_eq!(transport.body(0)["email"], "test@example.com");
    assert_eq!(transport.body(1)["email"], "other@example.com");
    assert_eq!(transport.body(1)["company_name"], "Acme Inc");
    assert!(output.contains("  Email: Email already exists."));
    assert!(output.contains(SPAM_HINT));
}

#[test]
fn registration_session_tests_success_ends_session() {
    let transport = QueuedTransport::with(vec![responding(201, "{}")]);
    let (state, output) = run_session(&transport, VALID_PASS);

    assert_eq!(state, UiState::Success);
    assert_eq!(transport.request_count(), 1);
    assert!(output.contains("Check your email to verify your account."));
    assert!(!output.contains(RESUBMIT_PROMPT));
}

#[test]
fn registration_session_tests_closed_input_sends_nothing() {
    let transport = QueuedTransport::with(Vec::new());
    let (state, _) = run_session(&transport, "test@example.com\npassword123\n");

    assert_eq!(transport.request_count(), 0);
    assert_eq!(state, UiState::Idle);
}

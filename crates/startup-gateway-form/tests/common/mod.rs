//! Shared fixtures for form controller integration tests.

use std::sync::{Arc, Mutex};

use startup_gateway_core::FieldKey;
use startup_gateway_form::RegistrationForm;
use startup_gateway_transport::{
    RegistrationClient, RegistrationTransport, TransportError, TransportResponse,
};

/// Types a complete, valid registration into `form`.
#[allow(dead_code)]
pub fn fill_valid_form(form: &mut RegistrationForm) {
    let entries = [
        (FieldKey::Email, "test@example.com"),
        (FieldKey::Password, "password123"),
        (FieldKey::PasswordConfirm, "password123"),
        (FieldKey::CompanyName, "Acme Inc"),
        (FieldKey::ShortPitch, "We build something useful."),
        (FieldKey::Website, "https://example.com"),
        (FieldKey::Contact, "+380000000000"),
    ];
    for (key, value) in entries {
        form.set_text(key, value).expect("text field should accept input");
        form.blur(key);
    }
    form.set_terms_accepted(true)
        .expect("checkbox should accept input");
    form.blur(FieldKey::TermsAccepted);
}

/// Transport that records request bodies and replays one scripted outcome.
#[allow(dead_code)]
#[derive(Debug)]
pub struct ScriptedTransport {
    outcome: Mutex<Option<Result<TransportResponse, TransportError>>>,
    pub bodies: Mutex<Vec<Vec<u8>>>,
}

impl ScriptedTransport {
    /// Responds with `status` and a raw body.
    #[allow(dead_code)]
    pub fn responding(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Mutex::new(Some(Ok(TransportResponse {
                status,
                body: body.as_bytes().to_vec(),
            }))),
            bodies: Mutex::new(Vec::new()),
        })
    }

    /// Fails before any response arrives.
    #[allow(dead_code)]
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            outcome: Mutex::new(Some(Err(TransportError::Network(
                "connection refused".to_string(),
            )))),
            bodies: Mutex::new(Vec::new()),
        })
    }

    /// Number of requests received.
    #[allow(dead_code)]
    pub fn request_count(&self) -> usize {
        self.bodies.lock().expect("body lock should work").len()
    }
}

impl RegistrationTransport for ScriptedTransport {
    fn post_json(&self, _endpoint: &str, body: &[u8]) -> Result<TransportResponse, TransportError> {
        self.bodies
            .lock()
            .expect("body lock should work")
            .push(body.to_vec());
        self.outcome
            .lock()
            .expect("outcome lock should work")
            .take()
            .unwrap_or(Err(TransportError::Network("no scripted outcome".to_string())))
    }
}

/// Builds a client over `transport`.
#[allow(dead_code)]
pub fn client(transport: Arc<ScriptedTransport>) -> RegistrationClient {
    RegistrationClient::new("http://localhost:8000/api/auth/register/", transport)
        .expect("client should build")
}

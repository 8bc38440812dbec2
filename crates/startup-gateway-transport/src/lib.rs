#![warn(missing_docs)]
//! # startup-gateway-transport
//!
//! ## Purpose
//! Sends registration payloads to the backend.
//!
//! ## Responsibilities
//! - Validate the registration endpoint (absolute http(s) URL, optionally
//!   https only).
//! - Post JSON bodies through an injectable [`RegistrationTransport`].
//! - Provide a blocking HTTP implementation backed by `reqwest`.
//! - Classify transport failures for diagnostics.
//!
//! ## Data flow
//! Form controller -> [`RegistrationClient::register`] -> JSON body ->
//! [`RegistrationTransport::post_json`] -> [`TransportResponse`].
//!
//! ## Ownership and lifetimes
//! Responses own their body bytes so they outlive the connection that
//! produced them.
//!
//! ## Error model
//! Every completed HTTP exchange is `Ok`, whatever its status. Only requests
//! that never produced a response map to [`TransportError::Network`] or
//! [`TransportError::Timeout`]. There is no retry: one registration is one
//! request.
//!
//! ## Security and privacy notes
//! Bodies carry the password; this crate logs endpoints and status codes
//! only.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use startup_gateway_core::{CoreError, RegistrationPayload};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Content type sent with every registration request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Scheme policy applied to the registration endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointPolicy {
    /// `http` and `https` are both accepted.
    #[default]
    AllowHttp,
    /// Only `https` is accepted.
    HttpsOnly,
}

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body; empty when it could not be read.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract transport used by [`RegistrationClient`].
pub trait RegistrationTransport: Send + Sync {
    /// Posts a JSON body and returns the completed response.
    ///
    /// # Errors
    /// Returns [`TransportError::Network`] or [`TransportError::Timeout`]
    /// when no response was received.
    fn post_json(&self, endpoint: &str, body: &[u8]) -> Result<TransportResponse, TransportError>;
}

/// Registration client bound to one validated endpoint.
#[derive(Clone)]
pub struct RegistrationClient {
    endpoint: String,
    transport: Arc<dyn RegistrationTransport>,
}

impl RegistrationClient {
    /// Creates a client that accepts `http` or `https` endpoints.
    ///
    /// # Errors
    /// Returns [`TransportError::InvalidEndpoint`] for relative or non-http
    /// URLs.
    pub fn new(
        endpoint: impl Into<String>,
        transport: Arc<dyn RegistrationTransport>,
    ) -> Result<Self, TransportError> {
        Self::with_policy(endpoint, EndpointPolicy::AllowHttp, transport)
    }

    /// Creates a client with an explicit scheme policy.
    ///
    /// # Errors
    /// Returns [`TransportError::InvalidEndpoint`] when the endpoint violates
    /// `policy`.
    pub fn with_policy(
        endpoint: impl Into<String>,
        policy: EndpointPolicy,
        transport: Arc<dyn RegistrationTransport>,
    ) -> Result<Self, TransportError> {
        let endpoint = endpoint.into();
        validate_registration_endpoint(&endpoint, policy)?;
        Ok(Self {
            endpoint,
            transport,
        })
    }

    /// Serializes `payload` and posts it to the endpoint.
    ///
    /// # Errors
    /// Returns [`TransportError::Encode`] when the payload cannot be encoded
    /// and propagates transport failures as-is.
    pub fn register(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<TransportResponse, TransportError> {
        let body = payload.to_json_bytes()?;
        debug!(endpoint = %self.endpoint, bytes = body.len(), "posting registration");
        self.transport.post_json(&self.endpoint, &body)
    }

    /// Returns configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Validates the registration endpoint against `policy`.
///
/// # Errors
/// Returns [`TransportError::InvalidEndpoint`] for unparsable URLs,
/// non-http(s) schemes, or `http` under [`EndpointPolicy::HttpsOnly`].
pub fn validate_registration_endpoint(
    endpoint: &str,
    policy: EndpointPolicy,
) -> Result<(), TransportError> {
    let parsed = Url::parse(endpoint).map_err(|error| {
        TransportError::InvalidEndpoint(format!("invalid registration url: {error}"))
    })?;

    match (parsed.scheme(), policy) {
        ("https", _) | ("http", EndpointPolicy::AllowHttp) => Ok(()),
        ("http", EndpointPolicy::HttpsOnly) => Err(TransportError::InvalidEndpoint(
            "registration endpoint must use https".to_string(),
        )),
        (scheme, _) => Err(TransportError::InvalidEndpoint(format!(
            "unsupported scheme {scheme}"
        ))),
    }
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Builds a transport. `None` imposes no request timeout.
    ///
    /// # Errors
    /// Returns [`TransportError::Network`] when the HTTP client cannot be
    /// initialised (for example, TLS backend failure).
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| TransportError::Network(format!("client init failed: {error}")))?;
        Ok(Self { client })
    }
}

impl RegistrationTransport for HttpTransport {
    fn post_json(&self, endpoint: &str, body: &[u8]) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body.to_vec())
            .send()
            .map_err(|error| {
                if error.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Network(error.to_string())
                }
            })?;

        let status = response.status().as_u16();
        // An unreadable body is handled like a malformed one.
        let body = response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .unwrap_or_default();
        debug!(status, bytes = body.len(), "registration response received");

        Ok(TransportResponse { status, body })
    }
}

/// Coarse failure category used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Trying again later may succeed.
    Retriable,
    /// Trying again unchanged will fail the same way.
    Permanent,
}

/// Classifies a transport failure.
pub fn classify_transport_error(error: &TransportError) -> FailureClass {
    match error {
        TransportError::Network(_) | TransportError::Timeout => FailureClass::Retriable,
        TransportError::InvalidEndpoint(_) | TransportError::Encode(_) => FailureClass::Permanent,
    }
}

/// Classifies a non-2xx status; `None` for success statuses.
pub fn classify_status(status: u16) -> Option<FailureClass> {
    match status {
        200..=299 => None,
        408 | 429 | 500..=599 => Some(FailureClass::Retriable),
        _ => Some(FailureClass::Permanent),
    }
}

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Endpoint violates URL or scheme requirements.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Request failed before a response arrived.
    #[error("network failure: {0}")]
    Network(String),
    /// Request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// Payload could not be encoded.
    #[error("payload encode failure: {0}")]
    Encode(#[from] CoreError),
}

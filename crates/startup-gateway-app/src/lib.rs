#![warn(missing_docs)]
//! # startup-gateway-app
//!
//! ## Purpose
//! Wires configuration, logging, transport, and the registration form into a
//! runnable client.
//!
//! ## Responsibilities
//! - Load [`AppConfig`] from the environment.
//! - Initialise `tracing` output.
//! - Resolve the requested route against the stored session.
//! - Build the HTTP-backed [`RegistrationClient`].
//! - Drive a line-oriented registration session.
//! - Turn local files into picker metadata for the form.
//! - Redact secrets from diagnostic strings.
//!
//! ## Data flow
//! Environment -> [`AppConfig`] -> [`resolve_entry`] -> [`build_client`] ->
//! [`run_registration`] -> form submission.
//! Local path -> [`file_handle_from_path`] -> form attachment selection.
//!
//! ## Ownership and lifetimes
//! Configuration is an owned value cloned into whatever needs it.
//!
//! ## Error model
//! Startup failures (bad endpoint, logger already set, unreadable file) are
//! wrapped in [`AppError`]. Submission outcomes stay inside the form.
//!
//! ## Security and privacy notes
//! - [`redact_sensitive`] masks password, token, and authorization values.
//! - [`AppConfig`]'s `Debug` output hides the session token.
//! - Plain `http` endpoints can be refused with
//!   `STARTUP_GATEWAY_REQUIRE_HTTPS`.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use startup_gateway_auth::{
    AuthError, CredentialStore, InMemoryCredentialStore, Route, RouteDecision, guard_route,
};
use startup_gateway_core::{FieldKey, FileHandle, UiState};
use startup_gateway_form::{
    FileSelection, FormError, RegistrationForm, SUBMIT_LABEL_SUBMITTING, field_label,
};
use startup_gateway_transport::{
    EndpointPolicy, HttpTransport, RegistrationClient, TransportError,
};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("STARTUP_GATEWAY_VERSION");

/// Default backend origin.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// Default registration path on the backend.
pub const DEFAULT_REGISTER_PATH: &str = "/api/auth/register/";

/// Env var holding the backend origin.
pub const ENV_API_BASE_URL: &str = "STARTUP_GATEWAY_API_BASE_URL";
/// Env var holding the registration path.
pub const ENV_REGISTER_PATH: &str = "STARTUP_GATEWAY_REGISTER_PATH";
/// Env var enabling the https-only endpoint policy.
pub const ENV_REQUIRE_HTTPS: &str = "STARTUP_GATEWAY_REQUIRE_HTTPS";
/// Env var holding the log filter; falls back to `RUST_LOG`.
pub const ENV_LOG_FILTER: &str = "STARTUP_GATEWAY_LOG";
/// Env var holding a session token issued by an earlier sign-in.
pub const ENV_SESSION_TOKEN: &str = "STARTUP_GATEWAY_SESSION_TOKEN";

/// Route opened when none is requested.
pub const DEFAULT_ENTRY_PATH: &str = "/register";
/// Follow-up hint printed under the success banner.
pub const SPAM_HINT: &str =
    "If you don't see the email, check your spam folder or try again later.";
/// Question asked before a failed registration is sent again.
pub const RESUBMIT_PROMPT: &str = "Submit again? [y/N]";

const SENSITIVE_KEYS: [&str; 4] = ["bearer", "authorization", "password", "token"];

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Runtime configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin, for example `https://api.example.com`.
    pub api_base_url: String,
    /// Registration path joined onto the origin.
    pub register_path: String,
    /// Refuse plain `http` endpoints.
    pub require_https: bool,
    /// Token from an earlier sign-in; gates protected routes.
    pub session_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            register_path: DEFAULT_REGISTER_PATH.to_string(),
            require_https: false,
            session_token: None,
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("register_path", &self.register_path)
            .field("require_https", &self.require_https)
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl AppConfig {
    /// Loads configuration from process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`; blank values fall back to
    /// defaults.
    ///
    /// `STARTUP_GATEWAY_REQUIRE_HTTPS` semantics:
    /// - `1`, `true`, `on`, `yes` (case-insensitive) => https required.
    /// - Unset or anything else => http allowed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            api_base_url: non_blank(ENV_API_BASE_URL).unwrap_or(defaults.api_base_url),
            register_path: non_blank(ENV_REGISTER_PATH).unwrap_or(defaults.register_path),
            require_https: non_blank(ENV_REQUIRE_HTTPS).is_some_and(|value| {
                matches!(
                    value.to_ascii_lowercase().as_str(),
                    "1" | "true" | "on" | "yes"
                )
            }),
            session_token: non_blank(ENV_SESSION_TOKEN),
        }
    }

    /// Credential store seeded with `session_token`, if any.
    ///
    /// # Errors
    /// Returns [`AppError::Auth`] when the store rejects the token.
    pub fn credential_store(&self) -> Result<InMemoryCredentialStore, AppError> {
        let store = InMemoryCredentialStore::new();
        if let Some(token) = &self.session_token {
            store.set_token(token)?;
        }
        Ok(store)
    }

    /// Joins base URL and registration path.
    ///
    /// # Errors
    /// Returns [`AppError::Config`] when either part does not form a URL.
    pub fn register_endpoint(&self) -> Result<String, AppError> {
        let base = Url::parse(&self.api_base_url)
            .map_err(|error| AppError::Config(format!("invalid {ENV_API_BASE_URL}: {error}")))?;
        let endpoint = base
            .join(&self.register_path)
            .map_err(|error| AppError::Config(format!("invalid {ENV_REGISTER_PATH}: {error}")))?;
        Ok(endpoint.to_string())
    }

    /// Endpoint scheme policy implied by `require_https`.
    pub fn endpoint_policy(&self) -> EndpointPolicy {
        if self.require_https {
            EndpointPolicy::HttpsOnly
        } else {
            EndpointPolicy::AllowHttp
        }
    }
}

/// Installs the global `tracing` subscriber writing to stderr.
///
/// # Errors
/// Returns [`AppError::Logging`] when a subscriber is already installed.
pub fn init_logging() -> Result<(), AppError> {
    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .map_err(|error| AppError::Logging(error.to_string()))
}

/// Builds a registration client over blocking HTTP.
///
/// # Errors
/// Returns [`AppError::Config`] for malformed URLs and
/// [`AppError::Transport`] when the endpoint violates the scheme policy or
/// the HTTP client cannot start.
pub fn build_client(config: &AppConfig) -> Result<RegistrationClient, AppError> {
    let endpoint = config.register_endpoint()?;
    let transport = Arc::new(HttpTransport::new(None)?);
    Ok(RegistrationClient::with_policy(
        endpoint,
        config.endpoint_policy(),
        transport,
    )?)
}

/// What the terminal client does for a requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Run the registration form.
    Register,
    /// Protected route without a session; go here instead.
    Redirect(&'static str),
    /// Route is allowed but rendered by another client.
    Elsewhere(Route),
}

/// Resolves `path` against the stored session.
pub fn resolve_entry(store: &dyn CredentialStore, path: &str) -> Entry {
    match guard_route(store, path) {
        RouteDecision::Redirect(target) => Entry::Redirect(target),
        RouteDecision::Allow(Route::Register) => Entry::Register,
        RouteDecision::Allow(route) => Entry::Elsewhere(route),
    }
}

/// Runs one registration session over line-oriented input.
///
/// Every field is asked once. After a submission that did not succeed, the
/// user must confirm before anything is sent again; the next pass asks only
/// for fields that show an error. End of input or a refusal ends the session
/// and returns the form state at that point.
///
/// # Errors
/// Returns [`AppError::Io`] when reading input or writing output fails.
pub fn run_registration(
    form: &mut RegistrationForm,
    client: &RegistrationClient,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<UiState, AppError> {
    writeln!(output, "Startup registration")?;
    let mut first_pass = true;

    loop {
        for key in FieldKey::ALL {
            let needs_input = first_pass || form.visible_error(key).is_some();
            if needs_input && !prompt_field(form, input, output, key)? {
                return Ok(form.state());
            }
        }
        first_pass = false;

        writeln!(output, "{SUBMIT_LABEL_SUBMITTING}")?;
        let state = form.submit(client);
        if let Some(banner) = form.banner() {
            writeln!(output, "{banner}")?;
        }
        if state == UiState::Success {
            writeln!(output, "{SPAM_HINT}")?;
            return Ok(state);
        }
        for key in FieldKey::ALL {
            if let Some(message) = form.visible_error(key) {
                writeln!(output, "  {}: {message}", field_label(key))?;
            }
        }

        let answer = read_line(input, output, RESUBMIT_PROMPT)?;
        if !answer.as_deref().is_some_and(is_yes) {
            debug!("resubmission declined");
            return Ok(form.state());
        }
    }
}

/// Prompts for one field. Returns `false` on end of input.
fn prompt_field(
    form: &mut RegistrationForm,
    input: &mut impl BufRead,
    output: &mut impl Write,
    key: FieldKey,
) -> Result<bool, AppError> {
    let label = field_label(key);
    let prompt = match key {
        FieldKey::TermsAccepted => format!("{label}? [y/N]"),
        FieldKey::Logo | FieldKey::PitchDeck => format!("{label} path, blank to skip"),
        _ => label.to_string(),
    };
    let Some(line) = read_line(input, output, &prompt)? else {
        return Ok(false);
    };

    match key {
        FieldKey::TermsAccepted => {
            form.set_terms_accepted(is_yes(&line))?;
            form.blur(key);
        }
        FieldKey::Logo | FieldKey::PitchDeck => {
            let path = line.trim();
            let handle = if path.is_empty() {
                None
            } else {
                match file_handle_from_path(Path::new(path)) {
                    Ok(handle) => Some(handle),
                    Err(error) => {
                        writeln!(output, "  cannot read {path}: {error}")?;
                        None
                    }
                }
            };
            match form.select_file(key, handle)? {
                FileSelection::Accepted => writeln!(output, "  {}", form.file_label(key))?,
                FileSelection::Rejected(message) => writeln!(output, "  {message}")?,
                FileSelection::Cleared => {}
            }
        }
        _ => {
            form.set_text(key, line)?;
            form.blur(key);
            if let Some(message) = form.visible_error(key) {
                writeln!(output, "  {message}")?;
            }
        }
    }

    Ok(true)
}

fn read_line(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> Result<Option<String>, AppError> {
    write!(output, "{prompt}: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        info!("input closed");
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Declared media type for a file name, by extension.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Reads picker metadata (name, size, media type) for a local file.
///
/// # Errors
/// Returns [`AppError::Io`] when the file cannot be inspected.
pub fn file_handle_from_path(path: &Path) -> Result<FileHandle, AppError> {
    let metadata = std::fs::metadata(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FileHandle::new(
        name,
        metadata.len(),
        media_type_for_path(path),
    ))
}

/// Masks values that follow common secret markers.
///
/// Handles `key=value`, `key: value`, `"key":"value"`, and `Bearer value`.
pub fn redact_sensitive(input: &str) -> String {
    SENSITIVE_KEYS
        .iter()
        .fold(input.to_string(), |redacted, key| redact_values_after(&redacted, key))
}

fn redact_values_after(input: &str, key: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `input`.
    let lower = input.to_ascii_lowercase();
    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;

    while let Some(found) = lower[cursor..].find(key) {
        let key_end = cursor + found + key.len();
        output.push_str(&input[cursor..key_end]);

        let rest = &input[key_end..];
        let separator_len = rest.len()
            - rest
                .trim_start_matches(['"', '\'', ':', '=', ' '])
                .len();
        if separator_len == 0 {
            cursor = key_end;
            continue;
        }
        output.push_str(&rest[..separator_len]);

        let value_start = key_end + separator_len;
        let value_len = input[value_start..]
            .find(|c: char| matches!(c, '"' | '\'' | ',' | '&' | '}' | ';') || c.is_whitespace())
            .unwrap_or(input.len() - value_start);
        output.push_str("<redacted>");
        cursor = value_start + value_len;
    }

    output.push_str(&input[cursor..]);
    output
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration value is malformed.
    #[error("config error: {0}")]
    Config(String),
    /// Transport could not be built.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    /// Form rejected an input event.
    #[error("form error: {0}")]
    Form(#[from] FormError),
    /// Session token could not be stored.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),
    /// Local file or terminal I/O failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// Logger initialisation failed.
    #[error("logging error: {0}")]
    Logging(String),
}

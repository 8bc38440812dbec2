#![warn(missing_docs)]
//! # startup-gateway-app binary
//!
//! Terminal driver for the startup registration flow.
//!
//! Usage: `startup-gateway-app [--version] [PATH]`. `PATH` defaults to
//! `/register`; protected paths need `STARTUP_GATEWAY_SESSION_TOKEN`.

use std::io;

use startup_gateway_app::{
    AppConfig, AppError, DEFAULT_ENTRY_PATH, Entry, app_version, build_client, init_logging,
    redact_sensitive, resolve_entry, run_registration,
};
use startup_gateway_auth::{is_authenticated, nav_links};
use startup_gateway_form::RegistrationForm;
use tracing::{error, info};

/// CLI entry point.
fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--version") {
        println!("startup-gateway-app {}", app_version());
        return;
    }

    if let Err(error) = init_logging() {
        eprintln!("logging disabled: {error}");
    }

    let path = args
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .map_or(DEFAULT_ENTRY_PATH, String::as_str);

    if let Err(error) = run(path) {
        let message = redact_sensitive(&error.to_string());
        error!(error = %message, "registration aborted");
        eprintln!("startup-gateway-app: {message}");
        std::process::exit(1);
    }
}

fn run(path: &str) -> Result<(), AppError> {
    let config = AppConfig::from_env();
    let credentials = config.credential_store()?;

    match resolve_entry(&credentials, path) {
        Entry::Register => {}
        Entry::Redirect(target) => {
            println!("Redirecting to {target}");
            return Ok(());
        }
        Entry::Elsewhere(route) => {
            info!(?route, "route is not served by the terminal client");
            println!("{path} is not available here. Try:");
            for link in nav_links(is_authenticated(&credentials)) {
                if let Some(href) = link.href() {
                    println!("  {:<10} {href}", link.label());
                }
            }
            return Ok(());
        }
    }

    let client = build_client(&config)?;
    info!(endpoint = client.endpoint(), version = app_version(), "registration client ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let state = run_registration(
        &mut RegistrationForm::new(),
        &client,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;
    info!(?state, "registration session ended");
    Ok(())
}

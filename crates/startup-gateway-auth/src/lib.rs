#![warn(missing_docs)]
//! # startup-gateway-auth
//!
//! ## Purpose
//! Models the stored-credential flag that gates navigation.
//!
//! ## Responsibilities
//! - Abstract the credential store behind [`CredentialStore`].
//! - Decide whether a path may render or must redirect to `/login`.
//! - Project the navigation links shown for the current auth state.
//!
//! ## Data flow
//! Login flow stores a token -> [`guard_route`] / [`nav_links`] read
//! presence only -> [`logout`] clears it and redirects.
//!
//! ## Ownership and lifetimes
//! Stores own their token; readers receive clones so no lock is held across
//! rendering.
//!
//! ## Error model
//! Blank tokens and poisoned store locks are reported as [`AuthError`].
//! Reads never fail: an unreadable store counts as signed out.
//!
//! ## Security and privacy notes
//! Token values are never logged. Only presence is inspected.
//!
//! ## Example
//! ```rust
//! use startup_gateway_auth::{guard_route, InMemoryCredentialStore, RouteDecision};
//!
//! let store = InMemoryCredentialStore::new();
//! assert_eq!(guard_route(&store, "/dashboard"), RouteDecision::Redirect("/login"));
//! ```

use std::sync::Mutex;

use thiserror::Error;
use tracing::info;
use url::Url;

/// Path anonymous users are sent to.
pub const LOGIN_PATH: &str = "/login";

/// Persistent holder of the session token.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored token, if any.
    fn token(&self) -> Option<String>;

    /// Stores `token`.
    ///
    /// # Errors
    /// Returns [`AuthError::EmptyToken`] for blank tokens.
    fn set_token(&self, token: &str) -> Result<(), AuthError>;

    /// Removes any stored token.
    ///
    /// # Errors
    /// Returns [`AuthError::StoreUnavailable`] when the store cannot be
    /// written.
    fn clear_token(&self) -> Result<(), AuthError>;
}

/// Returns `true` when a non-blank token is stored.
pub fn is_authenticated(store: &dyn CredentialStore) -> bool {
    store
        .token()
        .is_some_and(|token| !token.trim().is_empty())
}

/// Process-local credential store.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl InMemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|token| token.clone())
    }

    fn set_token(&self, token: &str) -> Result<(), AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::EmptyToken);
        }
        let mut slot = self.token.lock().map_err(|_| AuthError::StoreUnavailable)?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), AuthError> {
        let mut slot = self.token.lock().map_err(|_| AuthError::StoreUnavailable)?;
        *slot = None;
        Ok(())
    }
}

/// Application routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/dashboard`
    Dashboard,
    /// `/messages`
    Messages,
    /// `/startups/{id}`
    Startup(String),
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// Any other path.
    NotFound,
}

impl Route {
    /// Resolves a browser path (query and fragment ignored).
    pub fn parse(path: &str) -> Route {
        let Some(path) = normalized_path(path) else {
            return Route::NotFound;
        };
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["dashboard"] => Route::Dashboard,
            ["messages"] => Route::Messages,
            ["startups", id] => Route::Startup((*id).to_string()),
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            _ => Route::NotFound,
        }
    }

    /// Returns `true` when the route requires a stored credential.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Home | Route::Dashboard | Route::Messages | Route::Startup(_)
        )
    }
}

fn normalized_path(path: &str) -> Option<String> {
    let base = Url::parse("http://app.invalid/").ok()?;
    base.join(path).ok().map(|url| url.path().to_string())
}

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the route.
    Allow(Route),
    /// Replace the current location with this path.
    Redirect(&'static str),
}

/// Allows public routes and redirects anonymous users away from protected
/// ones.
pub fn guard_route(store: &dyn CredentialStore, path: &str) -> RouteDecision {
    let route = Route::parse(path);
    if route.is_protected() && !is_authenticated(store) {
        return RouteDecision::Redirect(LOGIN_PATH);
    }
    RouteDecision::Allow(route)
}

/// Entries of the top navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLink {
    /// Home page.
    Home,
    /// Investor dashboard.
    Dashboard,
    /// Inbox.
    Messages,
    /// Sample startup page.
    Startup,
    /// Sign-in page.
    Login,
    /// Registration landing page.
    Register,
    /// Sign-out action.
    Logout,
}

impl NavLink {
    /// Display text.
    pub fn label(&self) -> &'static str {
        match self {
            NavLink::Home => "Home",
            NavLink::Dashboard => "Dashboard",
            NavLink::Messages => "Messages",
            NavLink::Startup => "Startup",
            NavLink::Login => "Login",
            NavLink::Register => "Register",
            NavLink::Logout => "Logout",
        }
    }

    /// Link target; `None` for actions.
    pub fn href(&self) -> Option<&'static str> {
        match self {
            NavLink::Home => Some("/"),
            NavLink::Dashboard => Some("/dashboard"),
            NavLink::Messages => Some("/messages"),
            NavLink::Startup => Some("/startups/1"),
            NavLink::Login => Some(LOGIN_PATH),
            NavLink::Register => Some("/register"),
            NavLink::Logout => None,
        }
    }
}

/// Links shown for the given auth state, in display order.
pub fn nav_links(authenticated: bool) -> Vec<NavLink> {
    if authenticated {
        vec![
            NavLink::Home,
            NavLink::Dashboard,
            NavLink::Messages,
            NavLink::Startup,
            NavLink::Logout,
        ]
    } else {
        vec![NavLink::Login, NavLink::Register]
    }
}

/// Clears the stored credential and returns the post-logout location.
///
/// # Errors
/// Propagates [`AuthError::StoreUnavailable`] from the store.
pub fn logout(store: &dyn CredentialStore) -> Result<RouteDecision, AuthError> {
    store.clear_token()?;
    info!("signed out");
    Ok(RouteDecision::Redirect(LOGIN_PATH))
}

/// Errors produced by credential handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Token is missing or blank.
    #[error("token must be non-empty")]
    EmptyToken,
    /// Store lock was poisoned.
    #[error("credential store unavailable")]
    StoreUnavailable,
}

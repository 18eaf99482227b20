//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical redirect behavior: signed-out
//! visitors go to `/login`, and a signed-in user who lacks the route's role is
//! sent to their own home view.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::{AuthSession, AuthState, Role};

pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_HOME: &str = "/admin";
pub const CLIENT_HOME: &str = "/tasks";

/// Who may see a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Any signed-in session.
    SignedIn,
    /// Super-admins outside an impersonated tab.
    SuperAdmin,
}

/// Landing route for a session.
#[must_use]
pub fn home_path(session: &AuthSession) -> &'static str {
    if session.role == Role::SuperAdmin && !session.impersonated { ADMIN_HOME } else { CLIENT_HOME }
}

/// Where to send the user instead of rendering a route guarded by `access`,
/// or `None` when they may stay. Nothing redirects while auth is loading.
#[must_use]
pub fn guard_redirect(state: &AuthState, access: Access) -> Option<&'static str> {
    if state.loading {
        return None;
    }
    let Some(session) = state.session.as_ref() else {
        return Some(LOGIN_PATH);
    };
    match access {
        Access::SignedIn => None,
        Access::SuperAdmin if state.is_super_admin() && !state.is_impersonating() => None,
        Access::SuperAdmin => Some(home_path(session)),
    }
}

/// Redirect whenever [`guard_redirect`] says the current session may not see
/// this route.
pub fn install_guard<F>(auth: RwSignal<AuthState>, access: Access, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(target) = guard_redirect(&auth.get(), access) {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

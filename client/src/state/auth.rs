//! Auth-session state for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and role-dependent rendering. An admin session is persisted in
//! `localStorage`; a session obtained through impersonation hand-off lives in
//! `sessionStorage` only and shadows the admin session inside its tab.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};

use crate::net::identity::{AccountInfo, TokenGrant};
use crate::util::storage::{KeyValueStore, load_json, save_json};

pub const SESSION_KEY: &str = "propdesk.session";
pub const TAB_SESSION_KEY: &str = "propdesk.session.tab";

/// Refresh this long before the id token actually expires.
pub const REFRESH_MARGIN_MS: i64 = 60_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Client,
    #[default]
    #[serde(other)]
    Other,
}

impl Role {
    #[must_use]
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim.map(str::to_ascii_lowercase).as_deref() {
            Some("superadmin" | "super_admin") => Self::SuperAdmin,
            Some("client") => Self::Client,
            _ => Self::Other,
        }
    }
}

/// Where a session is persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionScope {
    /// `localStorage`, shared across tabs.
    #[default]
    Persistent,
    /// `sessionStorage`, this tab only.
    Tab,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at_ms: i64,
    #[serde(default)]
    pub scope: SessionScope,
    /// Issued through impersonation hand-off.
    #[serde(default)]
    pub impersonated: bool,
}

impl AuthSession {
    #[must_use]
    pub fn new(grant: TokenGrant, account: AccountInfo, scope: SessionScope, impersonated: bool, now_ms: i64) -> Self {
        Self {
            uid: account.uid,
            email: account.email,
            display_name: account.display_name,
            role: Role::from_claim(account.role.as_deref()),
            expires_at_ms: grant.expires_at_ms(now_ms),
            id_token: grant.id_token,
            refresh_token: grant.refresh_token,
            scope,
            impersonated,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.email)
    }

    #[must_use]
    pub fn needs_refresh(&self, now_ms: i64) -> bool {
        now_ms + REFRESH_MARGIN_MS >= self.expires_at_ms
    }

    /// Swap in refreshed tokens, keeping identity and scope.
    pub fn apply_refresh(&mut self, grant: TokenGrant, now_ms: i64) {
        self.expires_at_ms = grant.expires_at_ms(now_ms);
        self.id_token = grant.id_token;
        self.refresh_token = grant.refresh_token;
    }
}

/// Authentication state tracking the current session and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub session: Option<AuthSession>,
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.role == Role::SuperAdmin)
    }

    #[must_use]
    pub fn is_impersonating(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.impersonated && s.scope == SessionScope::Tab)
    }
}

/// Restore the active session. A tab-scoped session wins over the shared one.
pub fn load_session(local: &impl KeyValueStore, tab: &impl KeyValueStore) -> Option<AuthSession> {
    load_json::<AuthSession>(tab, TAB_SESSION_KEY)
        .map(|s| AuthSession { scope: SessionScope::Tab, ..s })
        .or_else(|| load_json::<AuthSession>(local, SESSION_KEY).map(|s| AuthSession { scope: SessionScope::Persistent, ..s }))
}

/// Persist `session` in the store matching its scope. Tab-scoped sessions are
/// never written to the shared store.
pub fn store_session(local: &impl KeyValueStore, tab: &impl KeyValueStore, session: &AuthSession) {
    match session.scope {
        SessionScope::Persistent => save_json(local, SESSION_KEY, session),
        SessionScope::Tab => save_json(tab, TAB_SESSION_KEY, session),
    }
}

/// Forget the session of `scope`.
pub fn clear_session(local: &impl KeyValueStore, tab: &impl KeyValueStore, scope: SessionScope) {
    match scope {
        SessionScope::Persistent => local.remove(SESSION_KEY),
        SessionScope::Tab => tab.remove(TAB_SESSION_KEY),
    }
}

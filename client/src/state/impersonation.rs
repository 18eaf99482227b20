//! Impersonation hand-off between the admin tab and a fresh client tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! A super-admin asks the backend for a short-lived custom token for a client
//! account. The token travels to a new tab through `sessionStorage`: a tab
//! opened with `window.open` starts with a copy of its opener's session
//! storage, so staging the token just before opening and removing it just
//! after leaves it readable only by the new tab.
//!
//! DESIGN
//! ======
//! Both halves take their side effects as closures (`fetch_token`,
//! `open_tab`, `sign_in`) and storage as a [`KeyValueStore`], so the storage
//! discipline is exercised without a browser:
//!
//! - `begin` always removes the staged token from the opener, even when the
//!   tab could not be opened.
//! - `consume` removes the token right after the sign-in attempt, whether it
//!   succeeded or not. A token is never tried twice.

#[cfg(test)]
#[path = "impersonation_test.rs"]
mod impersonation_test;

use std::future::Future;

use crate::net::error::ApiError;
use crate::util::storage::KeyValueStore;

pub const HANDOFF_TOKEN_KEY: &str = "impersonationToken";
pub const HANDOFF_PATH: &str = "/impersonate";

/// Shown when the hand-off page is opened without a staged token.
pub const MISSING_TOKEN_MESSAGE: &str =
    "No impersonation token found. Start impersonation again from the client's page.";

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum HandoffError {
    #[error("could not create impersonation token: {0}")]
    Token(#[from] ApiError),
    #[error("the browser blocked the impersonation tab; allow pop-ups for this site")]
    PopupBlocked,
}

/// Result of the consumer side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandoffOutcome<T> {
    /// Signed in; the caller persists the session with tab scope.
    Established(T),
    /// No token was staged for this tab.
    MissingToken,
    /// The sign-in attempt was rejected.
    Failed(String),
}

pub fn stage_token(tab: &impl KeyValueStore, token: &str) {
    tab.set(HANDOFF_TOKEN_KEY, token);
}

pub fn release_staged_token(tab: &impl KeyValueStore) {
    tab.remove(HANDOFF_TOKEN_KEY);
}

/// Admin side: mint a token for `uid`, stage it, open the hand-off tab and
/// release the token from this tab.
///
/// # Errors
///
/// [`HandoffError::Token`] when the backend refuses, [`HandoffError::PopupBlocked`]
/// when `open_tab` reports the window could not be opened.
pub async fn begin<F, Fut, O>(tab: &impl KeyValueStore, uid: &str, fetch_token: F, open_tab: O) -> Result<(), HandoffError>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<String, ApiError>>,
    O: FnOnce(&str) -> bool,
{
    let token = fetch_token(uid.to_owned()).await?;
    stage_token(tab, &token);
    let opened = open_tab(HANDOFF_PATH);
    release_staged_token(tab);
    if opened {
        log::info!("impersonation: opened hand-off tab for {uid}");
        Ok(())
    } else {
        Err(HandoffError::PopupBlocked)
    }
}

/// Consumer side: sign in with the staged token exactly once.
pub async fn consume<T, F, Fut>(tab: &impl KeyValueStore, sign_in: F) -> HandoffOutcome<T>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let Some(token) = tab.get(HANDOFF_TOKEN_KEY).filter(|t| !t.is_empty()) else {
        release_staged_token(tab);
        return HandoffOutcome::MissingToken;
    };
    let attempt = sign_in(token).await;
    release_staged_token(tab);
    match attempt {
        Ok(session) => HandoffOutcome::Established(session),
        Err(e) => {
            log::warn!("impersonation: sign-in failed: {e}");
            HandoffOutcome::Failed(e.to_string())
        }
    }
}

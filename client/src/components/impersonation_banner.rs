//! Banner shown across the top of an impersonated tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! Impersonated sessions live only in this tab's `sessionStorage`. Ending one
//! clears that session and closes the tab; browsers refuse to close tabs they
//! did not script-open in some cases, so the fallback is a hard navigation to
//! `/login` with the tab session already gone.

use leptos::prelude::*;

use crate::state::auth::{AuthState, SessionScope, clear_session};
use crate::util::auth::LOGIN_PATH;
use crate::util::storage::BrowserStore;

/// Drop the tab-scoped session and leave the tab.
pub fn end_impersonation(auth: RwSignal<AuthState>) {
    clear_session(&BrowserStore::Local, &BrowserStore::Tab, SessionScope::Tab);
    auth.update(|a| a.session = None);
    log::info!("impersonation: session ended");
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.close();
            if !window.closed().unwrap_or(false) {
                let _ = window.location().set_href(LOGIN_PATH);
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = LOGIN_PATH;
    }
}

#[component]
pub fn ImpersonationBanner() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let who = move || auth.get().session.map(|s| s.label().to_owned()).unwrap_or_default();

    view! {
        <Show when=move || auth.get().is_impersonating()>
            <div class="impersonation-banner" role="alert">
                <span class="impersonation-banner__text">
                    "Impersonating "
                    <strong>{who}</strong>
                    ". Actions in this tab are performed as this client."
                </span>
                <button class="btn btn--small impersonation-banner__end" on:click=move |_| end_impersonation(auth)>
                    "End session"
                </button>
            </div>
        </Show>
    }
}

//! Top navigation for the super-admin console and the client task views.

use leptos::prelude::*;

use crate::state::auth::{AuthState, SessionScope, clear_session};
use crate::state::ui::{AdminSection, UiState};
use crate::util::auth::LOGIN_PATH;
use crate::util::storage::BrowserStore;

/// Sign out of the session visible in this tab.
pub fn sign_out(auth: RwSignal<AuthState>) {
    let scope = auth.get_untracked().session.map_or(SessionScope::Persistent, |s| s.scope);
    clear_session(&BrowserStore::Local, &BrowserStore::Tab, scope);
    auth.update(|a| a.session = None);
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(LOGIN_PATH);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = LOGIN_PATH;
    }
}

/// Console header. Section links only show for a super-admin in their own tab.
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let location = leptos_router::hooks::use_location();
    let active = move || AdminSection::for_path(&location.pathname.get());
    let who = move || auth.get().session.map(|s| s.label().to_owned()).unwrap_or_default();

    let links = move || {
        if !auth.with(|a| a.is_super_admin() && !a.is_impersonating()) {
            return Vec::new();
        }
        AdminSection::ALL
            .into_iter()
            .map(|section| {
                view! {
                    <a
                        class="nav-bar__link"
                        class:nav-bar__link--active=move || active() == section
                        href=section.path()
                    >
                        {section.label()}
                    </a>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <header class="nav-bar toolbar">
            <span class="nav-bar__brand">"PropDesk"</span>
            <span class="toolbar__divider" aria-hidden="true"></span>
            <nav class="nav-bar__links">{links}</nav>
            <span class="toolbar__spacer"></span>
            <button
                class="btn toolbar__dark-toggle"
                on:click=move |_| {
                    let next = crate::util::dark_mode::toggle(ui.get().dark_mode);
                    ui.update(|u| u.dark_mode = next);
                }
                title="Toggle dark mode"
            >
                {move || if ui.get().dark_mode { "☀" } else { "☾" }}
            </button>
            <span class="toolbar__self">{who}</span>
            <Show when=move || !auth.get().is_impersonating()>
                <button class="btn toolbar__logout" on:click=move |_| sign_out(auth) title="Sign out">
                    "Sign out"
                </button>
            </Show>
        </header>
    }
}

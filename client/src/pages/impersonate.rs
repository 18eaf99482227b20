//! Consumer side of the impersonation hand-off, opened in a fresh tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! The opener staged a custom token in this tab's `sessionStorage`. This page
//! signs in with it exactly once, removes it whatever the outcome, and stores
//! the resulting session with tab scope so the admin's own session in
//! `localStorage` is never touched.

use leptos::prelude::*;

use crate::state::impersonation::MISSING_TOKEN_MESSAGE;

/// What the page is showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandoffView {
    Working,
    Missing,
    Failed(String),
}

#[component]
pub fn ImpersonatePage() -> impl IntoView {
    let phase = RwSignal::new(HandoffView::Working);

    #[cfg(feature = "hydrate")]
    {
        use leptos_router::NavigateOptions;
        use leptos_router::hooks::use_navigate;

        use crate::net::error::ApiError;
        use crate::net::identity::{lookup_account, sign_in_with_custom_token};
        use crate::state::auth::{AuthSession, SessionScope, store_session};
        use crate::state::impersonation::{HandoffOutcome, consume};
        use crate::util::auth::CLIENT_HOME;
        use crate::util::remote::{RemoteCtx, ensure_config};
        use crate::util::storage::BrowserStore;

        let ctx = RemoteCtx::from_context();
        let navigate = use_navigate();
        let started = StoredValue::new(false);
        Effect::new(move || {
            if started.get_value() {
                return;
            }
            started.set_value(true);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let outcome = consume(&BrowserStore::Tab, |token| async move {
                    let cfg = ensure_config(ctx.config).await?;
                    let grant = sign_in_with_custom_token(&cfg, &token).await?;
                    let account = lookup_account(&cfg, &grant.id_token).await?;
                    Ok::<_, ApiError>(AuthSession::new(
                        grant,
                        account,
                        SessionScope::Tab,
                        true,
                        crate::util::time::now_ms(),
                    ))
                })
                .await;
                match outcome {
                    HandoffOutcome::Established(session) => {
                        log::info!("impersonation: session established for {}", session.email);
                        store_session(&BrowserStore::Local, &BrowserStore::Tab, &session);
                        ctx.auth.update(|a| {
                            a.session = Some(session);
                            a.loading = false;
                        });
                        navigate(CLIENT_HOME, NavigateOptions { replace: true, ..NavigateOptions::default() });
                    }
                    HandoffOutcome::MissingToken => phase.set(HandoffView::Missing),
                    HandoffOutcome::Failed(message) => phase.set(HandoffView::Failed(message)),
                }
            });
        });
    }

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Impersonation"</h1>
                {move || match phase.get() {
                    HandoffView::Working => view! { <p class="login-message">"Signing in as the client..."</p> }.into_any(),
                    HandoffView::Missing => {
                        view! {
                            <p class="login-message">{MISSING_TOKEN_MESSAGE}</p>
                            <a class="login-button" href="/admin/clients">"Back to clients"</a>
                        }
                            .into_any()
                    }
                    HandoffView::Failed(message) => {
                        view! {
                            <p class="login-message">"Could not start the impersonated session: " {message}</p>
                            <a class="login-button" href="/admin/clients">"Back to clients"</a>
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}

//! Email + password sign-in.
//!
//! A successful sign-in resolves the account's role claim, persists the
//! session in the shared store and lands on the role's home route.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::error::ApiError;
use crate::state::auth::AuthState;
use crate::util::auth::home_path;

/// Local checks before contacting the identity provider.
///
/// # Errors
///
/// A message for the form when either field is blank.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(())
}

/// Identity-provider error codes mapped to something a person can act on.
#[must_use]
pub fn sign_in_message(err: &ApiError) -> String {
    let ApiError::Http { message, .. } = err else {
        return format!("Sign-in failed: {err}");
    };
    let code = message.split([' ', ':']).next().unwrap_or_default();
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Incorrect email or password.".to_owned()
        }
        "USER_DISABLED" => "This account has been disabled.".to_owned(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Try again later.".to_owned(),
        _ => format!("Sign-in failed: {message}"),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Already signed in: go home.
    {
        let navigate = navigate.clone();
        Effect::new(move || {
            let state = auth.get();
            if let Some(session) = state.session.as_ref()
                && !state.loading
            {
                navigate(home_path(session), NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let password_value = password.get();
        if let Err(msg) = validate_credentials(&email_value, &password_value) {
            info.set(msg.to_owned());
            return;
        }
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            let config = expect_context::<RwSignal<Option<crate::config::BackendConfig>>>();
            leptos::task::spawn_local(async move {
                use crate::net::identity::{lookup_account, sign_in_with_password};
                use crate::state::auth::{AuthSession, SessionScope, store_session};
                use crate::util::storage::BrowserStore;

                let attempt = async {
                    let cfg = crate::util::remote::ensure_config(config).await?;
                    let grant = sign_in_with_password(&cfg, &email_value, &password_value).await?;
                    let account = lookup_account(&cfg, &grant.id_token).await?;
                    Ok::<_, ApiError>(AuthSession::new(
                        grant,
                        account,
                        SessionScope::Persistent,
                        false,
                        crate::util::time::now_ms(),
                    ))
                };
                match attempt.await {
                    Ok(session) => {
                        log::info!("signed in as {}", session.email);
                        store_session(&BrowserStore::Local, &BrowserStore::Tab, &session);
                        let home = home_path(&session);
                        auth.update(|a| {
                            a.session = Some(session);
                            a.loading = false;
                        });
                        navigate(home, NavigateOptions { replace: true, ..NavigateOptions::default() });
                    }
                    Err(e) => {
                        info.set(sign_in_message(&e));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&navigate, email_value, password_value);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"PropDesk"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="username"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}

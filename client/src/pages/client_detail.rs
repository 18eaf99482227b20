//! One client's account, properties and subscriptions, plus the
//! super-admin actions on that account.
//!
//! SYSTEM CONTEXT
//! ==============
//! "Impersonate" runs the admin side of the session hand-off: a custom token
//! is minted by the backend, staged in this tab's `sessionStorage`, and a new
//! tab is opened on `/impersonate` (it inherits a copy of that storage). The
//! token is released from this tab right after the new tab opens.

#[cfg(test)]
#[path = "client_detail_test.rs"]
mod client_detail_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::nav_bar::NavBar;
use crate::components::subscription_table::SubscriptionTable;
use crate::components::widgets::status_badge_class;
use crate::net::types::{ClientAccount, Property, Subscription};
use crate::util::auth::{Access, install_guard};
use crate::util::remote::{RemoteCtx, notify};
use crate::util::time::display_date;

/// Wording of the enable/disable confirmation for the account's current state.
#[must_use]
pub fn toggle_copy(currently_disabled: bool) -> (&'static str, &'static str) {
    if currently_disabled {
        ("Enable account", "The client will be able to sign in again.")
    } else {
        ("Disable account", "The client will be signed out and unable to sign in until re-enabled.")
    }
}

#[cfg(feature = "hydrate")]
fn open_handoff_tab(path: &str) -> bool {
    web_sys::window().and_then(|w| w.open_with_url_and_target(path, "_blank").ok().flatten()).is_some()
}

#[component]
pub fn ClientDetailPage() -> impl IntoView {
    let ctx = RemoteCtx::from_context();
    install_guard(ctx.auth, Access::SuperAdmin, use_navigate());
    let params = use_params_map();
    let client_id = Memo::new(move |_| params.with(|p| p.get("id").unwrap_or_default()));

    let client = RwSignal::new(None::<ClientAccount>);
    let properties = RwSignal::new(Vec::<Property>::new());
    let subscriptions = RwSignal::new(Vec::<Subscription>::new());
    let confirm_open = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let allowed = Memo::new(move |_| ctx.auth.with(|a| a.is_super_admin()));
    Effect::new(move || {
        let id = client_id.get();
        if !allowed.get() || id.is_empty() {
            return;
        }
        let (a, b, c) = (id.clone(), id.clone(), id);
        ctx.spawn(
            "Loading client failed",
            move |remote| async move { crate::net::db::get_client(&remote, &a).await },
            move |row| client.set(Some(row)),
        );
        ctx.spawn(
            "Loading properties failed",
            move |remote| async move { crate::net::db::list_properties(&remote, &b).await },
            move |rows| properties.set(rows),
        );
        ctx.spawn(
            "Loading subscriptions failed",
            move |remote| async move { crate::net::db::subscriptions_for_user(&remote, &c).await },
            move |rows| subscriptions.set(rows),
        );
    });

    let on_impersonate = move |_| {
        if busy.get() {
            return;
        }
        let uid = client_id.get_untracked();
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::state::impersonation::{HandoffError, begin};
            use crate::util::remote::{fresh_remote, notify_error};
            use crate::util::storage::BrowserStore;

            let result = match fresh_remote(ctx.config, ctx.auth).await {
                Ok(remote) => {
                    begin(
                        &BrowserStore::Tab,
                        &uid,
                        |uid| async move { crate::net::functions::create_impersonation_token(&remote, &uid).await },
                        open_handoff_tab,
                    )
                    .await
                }
                Err(e) => Err(HandoffError::Token(e)),
            };
            busy.set(false);
            if let Err(e) = result {
                log::warn!("impersonation: {e}");
                notify_error(ctx.toasts, &e.to_string());
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = uid;
        }
    };

    let on_confirm_toggle = Callback::new(move |()| {
        let Some(current) = client.get_untracked() else {
            return;
        };
        let next = !current.disabled;
        busy.set(true);
        ctx.spawn_or_else(
            "Updating account failed",
            move |remote| async move {
                crate::net::functions::set_client_disabled(&remote, &current.id, next).await
            },
            move |()| {
                client.update(|c| {
                    if let Some(c) = c.as_mut() {
                        c.disabled = next;
                    }
                });
                busy.set(false);
                confirm_open.set(false);
                notify(ctx.toasts, if next { "Account disabled." } else { "Account enabled." });
            },
            move |_| busy.set(false),
        );
    });
    let on_cancel = Callback::new(move |()| confirm_open.set(false));

    let disabled_now = move || client.with(|c| c.as_ref().is_some_and(|c| c.disabled));

    let details = move || {
        client.get().map(|c| {
            let status = c.subscription_status;
            view! {
                <dl class="detail-list">
                    <dt>"Email"</dt>
                    <dd>{c.email.clone()}</dd>
                    <dt>"Company"</dt>
                    <dd>{c.company_name.clone().unwrap_or_else(|| "-".to_owned())}</dd>
                    <dt>"Phone"</dt>
                    <dd>{c.phone.clone().unwrap_or_else(|| "-".to_owned())}</dd>
                    <dt>"Signed up"</dt>
                    <dd>{display_date(c.created_at.as_deref())}</dd>
                    <dt>"Subscription"</dt>
                    <dd>
                        {status.map(|s| view! { <span class=status_badge_class(s)>{s.label()}</span> })}
                    </dd>
                    <dt>"Account"</dt>
                    <dd>{if c.disabled { "Disabled" } else { "Enabled" }}</dd>
                </dl>
            }
        })
    };

    let property_rows = move || {
        properties
            .get()
            .into_iter()
            .map(|p| {
                let place = match p.city.as_deref() {
                    Some(city) if !city.is_empty() => format!("{}, {city}", p.address),
                    _ => p.address.clone(),
                };
                view! {
                    <tr>
                        <td>{p.name}</td>
                        <td>{place}</td>
                        <td class="data-table__num">{p.units}</td>
                    </tr>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="admin-page">
            <NavBar />
            <header class="admin-page__header">
                <a class="btn btn--small" href="/admin/clients">"Back"</a>
                <h1>{move || client.with(|c| c.as_ref().map(|c| c.label().to_owned()).unwrap_or_else(|| "Client".to_owned()))}</h1>
                <span class="toolbar__spacer"></span>
                <button class="btn btn--primary" disabled=move || busy.get() || client.with(Option::is_none) on:click=on_impersonate>
                    "Impersonate"
                </button>
                <button
                    class="btn"
                    class:btn--danger=move || !disabled_now()
                    disabled=move || busy.get() || client.with(Option::is_none)
                    on:click=move |_| confirm_open.set(true)
                >
                    {move || toggle_copy(disabled_now()).0}
                </button>
            </header>
            <section class="admin-page__section">
                <Show when=move || client.with(Option::is_some) fallback=|| view! { <p>"Loading client..."</p> }>
                    {details}
                </Show>
            </section>
            <section class="admin-page__section">
                <h2>"Properties"</h2>
                <Show
                    when=move || properties.with(|p| !p.is_empty())
                    fallback=|| view! { <p class="data-table__empty">"No properties."</p> }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Address"</th>
                                <th>"Units"</th>
                            </tr>
                        </thead>
                        <tbody>{property_rows}</tbody>
                    </table>
                </Show>
            </section>
            <section class="admin-page__section">
                <h2>"Subscriptions"</h2>
                <SubscriptionTable subscriptions=subscriptions />
            </section>
            <Show when=move || confirm_open.get()>
                {move || {
                    let (title, message) = toggle_copy(disabled_now());
                    view! {
                        <ConfirmDialog
                            title=title
                            message=message
                            confirm_label=title
                            danger=!disabled_now()
                            busy=busy
                            on_confirm=on_confirm_toggle
                            on_cancel=on_cancel
                        />
                    }
                }}
            </Show>
        </div>
    }
}

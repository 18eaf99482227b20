//! Super-admin client list with search, status filter and sort.

#[cfg(test)]
#[path = "clients_test.rs"]
mod clients_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::client_table::ClientTable;
use crate::components::nav_bar::NavBar;
use crate::components::select_field::{SelectField, SelectOption};
use crate::net::types::{ClientAccount, SubscriptionStatus};
use crate::state::clients::{ClientFilter, ClientSort, only_clients};
use crate::util::auth::{Access, install_guard};
use crate::util::remote::RemoteCtx;

/// Status filter choices; the empty value means "any status".
#[must_use]
pub fn status_options() -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", "All statuses"))
        .chain(SubscriptionStatus::ALL.into_iter().map(|s| SelectOption::new(s.as_str(), s.label())))
        .collect()
}

#[must_use]
pub fn sort_options() -> Vec<SelectOption> {
    ClientSort::ALL.into_iter().map(|s| SelectOption::new(s.as_str(), s.label())).collect()
}

#[component]
pub fn ClientsPage() -> impl IntoView {
    let ctx = RemoteCtx::from_context();
    install_guard(ctx.auth, Access::SuperAdmin, use_navigate());

    let clients = RwSignal::new(Vec::<ClientAccount>::new());
    let loaded = RwSignal::new(false);
    let filter = RwSignal::new(ClientFilter::default());

    let allowed = Memo::new(move |_| ctx.auth.with(|a| a.is_super_admin()));
    Effect::new(move || {
        if !allowed.get() {
            return;
        }
        ctx.spawn(
            "Loading clients failed",
            |remote| async move { crate::net::db::list_clients(&remote).await },
            move |rows| {
                clients.set(only_clients(rows));
                loaded.set(true);
            },
        );
    });

    let shown = Signal::derive(move || filter.with(|f| clients.with(|c| f.apply(c))));
    let status_value = Signal::derive(move || filter.with(|f| f.status.map(|s| s.as_str().to_owned()).unwrap_or_default()));
    let sort_value = Signal::derive(move || filter.with(|f| f.sort.as_str().to_owned()));

    view! {
        <div class="admin-page">
            <NavBar />
            <header class="admin-page__header">
                <h1>"Clients"</h1>
                <span class="admin-page__count">
                    {move || format!("{} of {}", shown.with(Vec::len), clients.with(Vec::len))}
                </span>
            </header>
            <div class="filter-bar">
                <input
                    class="filter-bar__search"
                    type="search"
                    placeholder="Search name, email or company"
                    prop:value=move || filter.with(|f| f.query.clone())
                    on:input=move |ev| filter.update(|f| f.query = event_target_value(&ev))
                />
                <SelectField
                    label="Status"
                    options=Signal::derive(status_options)
                    selected=status_value
                    on_change=Callback::new(move |raw: String| filter.update(|f| f.status = SubscriptionStatus::parse(&raw)))
                />
                <SelectField
                    label="Sort"
                    options=Signal::derive(sort_options)
                    selected=sort_value
                    on_change=Callback::new(move |raw: String| filter.update(|f| f.sort = ClientSort::parse(&raw)))
                />
            </div>
            <Show when=move || loaded.get() fallback=|| view! { <p>"Loading clients..."</p> }>
                <ClientTable clients=shown />
            </Show>
        </div>
    }
}

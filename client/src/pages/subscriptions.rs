//! Billing overview: summary cards over every subscription and a filterable
//! table.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::nav_bar::NavBar;
use crate::components::select_field::SelectField;
use crate::components::subscription_table::SubscriptionTable;
use crate::components::widgets::status_badge_class;
use crate::net::types::{Subscription, SubscriptionStatus};
use crate::pages::clients::status_options;
use crate::state::billing::{RENEWAL_WINDOW_DAYS, SubscriptionFilter, format_cents, summarize};
use crate::util::auth::{Access, install_guard};
use crate::util::remote::RemoteCtx;
use crate::util::time::now_ms;

#[component]
pub fn SubscriptionsPage() -> impl IntoView {
    let ctx = RemoteCtx::from_context();
    install_guard(ctx.auth, Access::SuperAdmin, use_navigate());

    let subscriptions = RwSignal::new(Vec::<Subscription>::new());
    let loaded = RwSignal::new(false);
    let filter = RwSignal::new(SubscriptionFilter::default());

    let allowed = Memo::new(move |_| ctx.auth.with(|a| a.is_super_admin()));
    Effect::new(move || {
        if !allowed.get() {
            return;
        }
        ctx.spawn(
            "Loading subscriptions failed",
            |remote| async move { crate::net::db::list_subscriptions(&remote).await },
            move |rows| {
                subscriptions.set(rows);
                loaded.set(true);
            },
        );
    });

    let summary = Memo::new(move |_| subscriptions.with(|s| summarize(s, now_ms(), RENEWAL_WINDOW_DAYS)));
    let shown = Signal::derive(move || filter.with(|f| subscriptions.with(|s| f.apply(s))));
    let status_value = Signal::derive(move || filter.with(|f| f.status.map(|s| s.as_str().to_owned()).unwrap_or_default()));

    let status_cards = move || {
        summary
            .get()
            .by_status
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(status, count)| {
                view! {
                    <div class="summary-card">
                        <span class=status_badge_class(status)>{status.label()}</span>
                        <span class="summary-card__value">{count}</span>
                    </div>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="admin-page">
            <NavBar />
            <header class="admin-page__header">
                <h1>"Subscriptions"</h1>
            </header>
            <Show when=move || loaded.get() fallback=|| view! { <p>"Loading subscriptions..."</p> }>
                <div class="summary-row">
                    <div class="summary-card">
                        <span class="summary-card__label">"Total"</span>
                        <span class="summary-card__value">{move || summary.with(|s| s.total)}</span>
                    </div>
                    <div class="summary-card">
                        <span class="summary-card__label">"MRR"</span>
                        <span class="summary-card__value">
                            {move || summary.with(|s| format_cents(s.mrr_cents, &s.currency))}
                        </span>
                    </div>
                    <div class="summary-card">
                        <span class="summary-card__label">"Renewing in 30 days"</span>
                        <span class="summary-card__value">{move || summary.with(|s| s.renewals.len())}</span>
                    </div>
                    {status_cards}
                </div>
                <div class="filter-bar">
                    <SelectField
                        label="Status"
                        options=Signal::derive(status_options)
                        selected=status_value
                        on_change=Callback::new(move |raw: String| filter.update(|f| f.status = SubscriptionStatus::parse(&raw)))
                    />
                    <label class="filter-bar__date">
                        <span>"Created from"</span>
                        <input
                            type="date"
                            prop:value=move || filter.with(|f| f.from_day.clone())
                            on:change=move |ev| filter.update(|f| f.from_day = event_target_value(&ev))
                        />
                    </label>
                    <label class="filter-bar__date">
                        <span>"to"</span>
                        <input
                            type="date"
                            prop:value=move || filter.with(|f| f.to_day.clone())
                            on:change=move |ev| filter.update(|f| f.to_day = event_target_value(&ev))
                        />
                    </label>
                    <button class="btn btn--small" on:click=move |_| filter.set(SubscriptionFilter::default())>
                        "Clear"
                    </button>
                </div>
                <SubscriptionTable subscriptions=shown link_clients=true />
            </Show>
        </div>
    }
}

//! Dashboard widget panels.
//!
//! Each panel reads the shared [`DashboardData`] signal and derives its own
//! view model, so one poll refreshes every panel. `widget_body` maps a
//! [`WidgetKey`] to its panel for the grid.

#[cfg(test)]
#[path = "widgets_test.rs"]
mod widgets_test;

use leptos::prelude::*;

use crate::net::types::SubscriptionStatus;
use crate::state::billing::format_cents;
use crate::state::dashboard::{DashboardData, RECENT_SIGNUPS_LIMIT};
use crate::state::widgets::WidgetKey;
use crate::util::time::{display_date, now_ms};

/// Panel body for `key`.
pub fn widget_body(key: WidgetKey, data: Signal<DashboardData>) -> AnyView {
    match key {
        WidgetKey::Kpis => view! { <KpiWidget data=data /> }.into_any(),
        WidgetKey::Revenue => view! { <RevenueWidget data=data /> }.into_any(),
        WidgetKey::RecentSignups => view! { <RecentSignupsWidget data=data /> }.into_any(),
        WidgetKey::SubscriptionStatus => view! { <SubscriptionStatusWidget data=data /> }.into_any(),
        WidgetKey::UpcomingRenewals => view! { <UpcomingRenewalsWidget data=data /> }.into_any(),
        WidgetKey::TaskOverview => view! { <TaskOverviewWidget data=data /> }.into_any(),
    }
}

/// CSS modifier for a subscription status badge.
#[must_use]
pub fn status_badge_class(status: SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Active => "badge badge--ok",
        SubscriptionStatus::Trialing => "badge badge--info",
        SubscriptionStatus::PastDue | SubscriptionStatus::Unpaid | SubscriptionStatus::Incomplete => {
            "badge badge--warn"
        }
        SubscriptionStatus::Canceled | SubscriptionStatus::Unknown => "badge badge--muted",
    }
}

/// KPI tile class, flagged while any task is overdue.
#[must_use]
pub fn overdue_kpi_class(overdue: usize) -> &'static str {
    if overdue > 0 { "kpi kpi--alert" } else { "kpi" }
}

#[component]
fn Loading() -> impl IntoView {
    view! { <p class="widget__empty">"Loading..."</p> }
}

#[component]
pub fn KpiWidget(#[prop(into)] data: Signal<DashboardData>) -> impl IntoView {
    let kpis = Memo::new(move |_| data.with(|d| d.kpis(now_ms())));

    view! {
        <Show when=move || data.with(|d| d.loaded) fallback=|| view! { <Loading /> }>
            <div class="kpi-strip">
                <div class="kpi">
                    <span class="kpi__value">{move || kpis.get().total_clients}</span>
                    <span class="kpi__label">"Clients"</span>
                </div>
                <div class="kpi">
                    <span class="kpi__value">{move || kpis.get().new_clients_30d}</span>
                    <span class="kpi__label">"New (30 days)"</span>
                </div>
                <div class="kpi">
                    <span class="kpi__value">{move || kpis.get().active_subscriptions}</span>
                    <span class="kpi__label">"Active subscriptions"</span>
                </div>
                <div class="kpi">
                    <span class="kpi__value">
                        {move || {
                            let k = kpis.get();
                            format_cents(k.mrr_cents, &k.currency)
                        }}
                    </span>
                    <span class="kpi__label">"MRR"</span>
                </div>
                <div class="kpi">
                    <span class="kpi__value">{move || kpis.get().open_tasks}</span>
                    <span class="kpi__label">"Open tasks"</span>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn RevenueWidget(#[prop(into)] data: Signal<DashboardData>) -> impl IntoView {
    let rows = Memo::new(move |_| data.with(DashboardData::revenue_by_plan));
    let currency = Memo::new(move |_| data.with(|d| d.billing(now_ms()).currency));
    let max = move || rows.with(|r| r.iter().map(|p| p.mrr_cents).max().unwrap_or(0));

    view! {
        <Show when=move || data.with(|d| d.loaded) fallback=|| view! { <Loading /> }>
            <Show
                when=move || rows.with(|r| !r.is_empty())
                fallback=|| view! { <p class="widget__empty">"No paying subscriptions yet."</p> }
            >
                <ul class="bar-list">
                    {move || {
                        let top = max().max(1);
                        let cur = currency.get();
                        rows.get()
                            .into_iter()
                            .map(|plan| {
                                let pct = plan.mrr_cents.max(0) * 100 / top;
                                view! {
                                    <li class="bar-list__row">
                                        <span class="bar-list__label">{plan.plan.clone()}</span>
                                        <span class="bar-list__bar" style=format!("width: {pct}%")></span>
                                        <span class="bar-list__value">
                                            {format_cents(plan.mrr_cents, &cur)}
                                            " ("
                                            {plan.subscribers}
                                            ")"
                                        </span>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>
        </Show>
    }
}

#[component]
pub fn RecentSignupsWidget(#[prop(into)] data: Signal<DashboardData>) -> impl IntoView {
    let rows = Memo::new(move |_| data.with(|d| d.recent_signups(RECENT_SIGNUPS_LIMIT)));

    view! {
        <Show when=move || data.with(|d| d.loaded) fallback=|| view! { <Loading /> }>
            <Show
                when=move || rows.with(|r| !r.is_empty())
                fallback=|| view! { <p class="widget__empty">"No clients yet."</p> }
            >
                <ul class="item-list">
                    {move || {
                        rows.get()
                            .into_iter()
                            .map(|client| {
                                let href = format!("/admin/clients/{}", client.id);
                                view! {
                                    <li class="item-list__row">
                                        <a href=href>{client.label().to_owned()}</a>
                                        <span class="item-list__meta">{display_date(client.created_at.as_deref())}</span>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>
        </Show>
    }
}

#[component]
pub fn SubscriptionStatusWidget(#[prop(into)] data: Signal<DashboardData>) -> impl IntoView {
    let summary = Memo::new(move |_| data.with(|d| d.billing(now_ms())));

    view! {
        <Show when=move || data.with(|d| d.loaded) fallback=|| view! { <Loading /> }>
            <p class="widget__total">{move || summary.with(|s| s.total)} " subscriptions"</p>
            <ul class="status-list">
                {move || {
                    summary
                        .get()
                        .by_status
                        .into_iter()
                        .map(|(status, count)| {
                            view! {
                                <li class="status-list__row">
                                    <span class=status_badge_class(status)>{status.label()}</span>
                                    <span class="status-list__count">{count}</span>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
        </Show>
    }
}

#[component]
pub fn UpcomingRenewalsWidget(#[prop(into)] data: Signal<DashboardData>) -> impl IntoView {
    let summary = Memo::new(move |_| data.with(|d| d.billing(now_ms())));

    view! {
        <Show when=move || data.with(|d| d.loaded) fallback=|| view! { <Loading /> }>
            <Show
                when=move || summary.with(|s| !s.renewals.is_empty())
                fallback=|| view! { <p class="widget__empty">"No renewals in the next 30 days."</p> }
            >
                <ul class="item-list">
                    {move || {
                        summary
                            .get()
                            .renewals
                            .into_iter()
                            .map(|sub| {
                                let who = sub.customer_email.clone().unwrap_or_else(|| sub.user_id.clone());
                                let href = format!("/admin/clients/{}", sub.user_id);
                                view! {
                                    <li class="item-list__row">
                                        <a href=href>{who}</a>
                                        <span class="item-list__meta">
                                            {sub.plan.clone()}
                                            " · "
                                            {format_cents(sub.amount_cents, &sub.currency)}
                                            " · "
                                            {display_date(sub.current_period_end.as_deref())}
                                        </span>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>
        </Show>
    }
}

#[component]
pub fn TaskOverviewWidget(#[prop(into)] data: Signal<DashboardData>) -> impl IntoView {
    let overview = Memo::new(move |_| data.with(|d| d.task_overview(now_ms())));

    view! {
        <Show when=move || data.with(|d| d.loaded) fallback=|| view! { <Loading /> }>
            <div class="kpi-strip">
                <div class="kpi">
                    <span class="kpi__value">{move || overview.get().pending}</span>
                    <span class="kpi__label">"Pending"</span>
                </div>
                <div class="kpi">
                    <span class="kpi__value">{move || overview.get().in_progress}</span>
                    <span class="kpi__label">"In progress"</span>
                </div>
                <div class="kpi">
                    <span class="kpi__value">{move || overview.get().completed}</span>
                    <span class="kpi__label">"Completed"</span>
                </div>
                <div class=move || overdue_kpi_class(overview.get().overdue)>
                    <span class="kpi__value">{move || overview.get().overdue}</span>
                    <span class="kpi__label">"Overdue"</span>
                </div>
            </div>
        </Show>
    }
}

//! Subscription table shared by the billing page and client detail.

use leptos::prelude::*;

use crate::components::widgets::status_badge_class;
use crate::net::types::{BillingInterval, Subscription};
use crate::state::billing::format_cents;
use crate::util::time::display_date;

fn interval_label(interval: BillingInterval) -> &'static str {
    match interval {
        BillingInterval::Month => "/ month",
        BillingInterval::Year => "/ year",
        BillingInterval::Unknown => "",
    }
}

#[component]
pub fn SubscriptionTable(
    #[prop(into)] subscriptions: Signal<Vec<Subscription>>,
    /// Link each row to its client; off when the table already sits on one.
    #[prop(optional)]
    link_clients: bool,
) -> impl IntoView {
    let rows = move || {
        subscriptions
            .get()
            .into_iter()
            .map(|sub| {
                let customer = sub.customer_email.clone().unwrap_or_else(|| sub.user_id.clone());
                let customer_cell = if link_clients {
                    let href = format!("/admin/clients/{}", sub.user_id);
                    view! { <a href=href>{customer}</a> }.into_any()
                } else {
                    view! { <span>{customer}</span> }.into_any()
                };
                view! {
                    <tr>
                        <td>{customer_cell}</td>
                        <td>{sub.plan.clone()}</td>
                        <td>
                            <span class=status_badge_class(sub.status)>{sub.status.label()}</span>
                            {sub.cancel_at_period_end.then(|| view! { <span class="badge badge--muted">"Cancels"</span> })}
                        </td>
                        <td class="data-table__num">
                            {format_cents(sub.amount_cents, &sub.currency)}
                            " "
                            {interval_label(sub.interval)}
                        </td>
                        <td>{display_date(sub.current_period_end.as_deref())}</td>
                        <td>{display_date(sub.created_at.as_deref())}</td>
                    </tr>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <Show
            when=move || subscriptions.with(|s| !s.is_empty())
            fallback=|| view! { <p class="data-table__empty">"No subscriptions."</p> }
        >
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Customer"</th>
                        <th>"Plan"</th>
                        <th>"Status"</th>
                        <th>"Amount"</th>
                        <th>"Renews"</th>
                        <th>"Created"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </Show>
    }
}

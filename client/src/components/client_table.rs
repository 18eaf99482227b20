//! Client list table for the super-admin console.

use leptos::prelude::*;

use crate::components::widgets::status_badge_class;
use crate::net::types::ClientAccount;
use crate::util::time::display_date;

#[component]
pub fn ClientTable(#[prop(into)] clients: Signal<Vec<ClientAccount>>) -> impl IntoView {
    let rows = move || {
        clients
            .get()
            .into_iter()
            .map(|client| {
                let href = format!("/admin/clients/{}", client.id);
                let status = client.subscription_status;
                view! {
                    <tr class:data-table__row--disabled=client.disabled>
                        <td>
                            <a href=href>{client.label().to_owned()}</a>
                        </td>
                        <td>{client.email.clone()}</td>
                        <td>{client.company_name.clone().unwrap_or_default()}</td>
                        <td>
                            {match status {
                                Some(s) => view! { <span class=status_badge_class(s)>{s.label()}</span> }.into_any(),
                                None => view! { <span class="badge badge--muted">"None"</span> }.into_any(),
                            }}
                        </td>
                        <td class="data-table__num">{client.property_count}</td>
                        <td>{display_date(client.created_at.as_deref())}</td>
                        <td>{if client.disabled { "Disabled" } else { "Enabled" }}</td>
                    </tr>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <Show
            when=move || clients.with(|c| !c.is_empty())
            fallback=|| view! { <p class="data-table__empty">"No clients match the current filters."</p> }
        >
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Company"</th>
                        <th>"Subscription"</th>
                        <th>"Properties"</th>
                        <th>"Signed up"</th>
                        <th>"Account"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </Show>
    }
}

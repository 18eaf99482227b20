//! Dropdown for showing, hiding and resetting dashboard widgets.

#[cfg(test)]
#[path = "widget_menu_test.rs"]
mod widget_menu_test;

use leptos::prelude::*;

use crate::state::widgets::{WidgetKey, WidgetVisibility};

/// Tooltip for the menu trigger naming the hidden widgets.
#[must_use]
pub fn hidden_summary(visibility: &WidgetVisibility) -> String {
    let hidden = visibility.hidden();
    if hidden.is_empty() {
        return "All widgets shown".to_owned();
    }
    let titles: Vec<&str> = hidden.into_iter().map(WidgetKey::title).collect();
    format!("Hidden: {}", titles.join(", "))
}

#[component]
pub fn WidgetMenu(
    #[prop(into)] visibility: Signal<WidgetVisibility>,
    #[prop(into)] open: Signal<bool>,
    on_toggle_open: Callback<()>,
    on_toggle: Callback<WidgetKey>,
    on_reset: Callback<()>,
) -> impl IntoView {
    let rows = move || {
        WidgetKey::ALL
            .into_iter()
            .map(|key| {
                view! {
                    <label class="widget-menu__item">
                        <input
                            type="checkbox"
                            prop:checked=move || visibility.with(|v| v.is_visible(key))
                            on:change=move |_| on_toggle.run(key)
                        />
                        <span>{key.title()}</span>
                    </label>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="widget-menu">
            <button
                class="btn widget-menu__trigger"
                aria-expanded=move || open.get().to_string()
                title=move || visibility.with(hidden_summary)
                on:click=move |_| on_toggle_open.run(())
            >
                "Widgets"
                <span class="widget-menu__count">
                    {move || visibility.with(|v| format!("{}/{}", v.visible().len(), WidgetKey::ALL.len()))}
                </span>
            </button>
            <Show when=move || open.get()>
                <div class="widget-menu__panel" role="menu">
                    {rows}
                    <hr class="widget-menu__divider" />
                    <button class="btn btn--small widget-menu__reset" on:click=move |_| on_reset.run(())>
                        "Reset to default"
                    </button>
                </div>
            </Show>
        </div>
    }
}

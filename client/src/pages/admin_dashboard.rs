//! Super-admin dashboard: customizable widget grid over live platform data.
//!
//! SYSTEM CONTEXT
//! ==============
//! Layout and widget visibility are per-browser preferences kept in
//! `localStorage`. They are read after mount so the server-rendered markup
//! (default arrangement) hydrates cleanly before the stored arrangement is
//! applied. Data is refreshed by polling every [`POLL_INTERVAL_MS`].

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::nav_bar::NavBar;
use crate::components::widget_grid::WidgetGrid;
use crate::components::widget_menu::WidgetMenu;
use crate::config::BackendConfig;
use crate::net::error::ApiError;
use crate::state::auth::AuthState;
use crate::state::clients::only_clients;
use crate::state::dashboard::{DashboardData, POLL_INTERVAL_MS};
use crate::state::layout::GridLayout;
use crate::state::toast::ToastQueue;
use crate::state::ui::UiState;
use crate::state::widgets::{WidgetKey, WidgetVisibility};
use crate::util::auth::{Access, install_guard};
use crate::util::poll::spawn_poll;
use crate::util::remote::{fresh_remote, report};
use crate::util::storage::BrowserStore;

/// Fetch everything the widgets read in one pass.
async fn load_dashboard(
    config: RwSignal<Option<BackendConfig>>,
    auth: RwSignal<AuthState>,
) -> Result<DashboardData, ApiError> {
    let remote = fresh_remote(config, auth).await?;
    let clients = only_clients(crate::net::db::list_clients(&remote).await?);
    let subscriptions = crate::net::db::list_subscriptions(&remote).await?;
    let tasks = crate::net::db::list_tasks(&remote, None).await?;
    Ok(DashboardData { clients, subscriptions, tasks, loaded: true })
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<RwSignal<Option<BackendConfig>>>();
    let toasts = expect_context::<RwSignal<ToastQueue>>();
    let ui = expect_context::<RwSignal<UiState>>();
    install_guard(auth, Access::SuperAdmin, use_navigate());

    let layout = RwSignal::new(GridLayout::default());
    let visibility = RwSignal::new(WidgetVisibility::default());
    let data = RwSignal::new(DashboardData::default());

    Effect::new(move || {
        layout.set(GridLayout::load(&BrowserStore::Local));
        visibility.set(WidgetVisibility::load(&BrowserStore::Local));
    });

    spawn_poll(POLL_INTERVAL_MS, move || async move {
        if !auth.get_untracked().is_super_admin() {
            return;
        }
        match load_dashboard(config, auth).await {
            Ok(next) => data.set(next),
            Err(e) => report(toasts, "Dashboard refresh failed", &e),
        }
    });

    let on_commit = Callback::new(move |next: GridLayout| next.save(&BrowserStore::Local));
    let on_toggle = Callback::new(move |key: WidgetKey| {
        visibility.update(|v| v.toggle(key));
        visibility.with_untracked(|v| v.save(&BrowserStore::Local));
    });
    let on_reset = Callback::new(move |()| {
        visibility.update(WidgetVisibility::reset);
        layout.set(GridLayout::default());
        visibility.with_untracked(|v| v.save(&BrowserStore::Local));
        layout.with_untracked(|l| l.save(&BrowserStore::Local));
    });
    let on_toggle_menu = Callback::new(move |()| ui.update(UiState::toggle_widget_menu));

    let editing = Signal::derive(move || ui.get().editing_layout);
    let menu_open = Signal::derive(move || ui.get().widget_menu_open);

    on_cleanup(move || {
        let _ = ui.try_update(|u| u.set_editing_layout(false));
    });

    view! {
        <div class="admin-page">
            <NavBar />
            <header class="admin-page__header">
                <h1>"Dashboard"</h1>
                <span class="toolbar__spacer"></span>
                <Show when=move || !data.with(|d| d.loaded)>
                    <span class="admin-page__status">"Loading..."</span>
                </Show>
                <WidgetMenu
                    visibility=visibility
                    open=menu_open
                    on_toggle_open=on_toggle_menu
                    on_toggle=on_toggle
                    on_reset=on_reset
                />
                <button
                    class="btn"
                    class:btn--primary=move || editing.get()
                    on:click=move |_| ui.update(|u| u.set_editing_layout(!u.editing_layout))
                >
                    {move || if editing.get() { "Done" } else { "Edit layout" }}
                </button>
            </header>
            <Show
                when=move || visibility.with(|v| !v.visible().is_empty())
                fallback=|| view! { <p class="admin-page__empty">"All widgets are hidden. Use the Widgets menu to show some."</p> }
            >
                <WidgetGrid
                    layout=layout
                    visibility=visibility
                    editing=editing
                    data=data
                    on_commit=on_commit
                    on_hide=on_toggle
                />
            </Show>
        </div>
    }
}

//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    NavigateOptions, ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_navigate,
};

use crate::components::impersonation_banner::ImpersonationBanner;
use crate::components::toast_host::ToastHost;
use crate::config::BackendConfig;
use crate::pages::{
    admin_dashboard::AdminDashboardPage, client_detail::ClientDetailPage, clients::ClientsPage,
    guest_info::GuestInfoPage, impersonate::ImpersonatePage, login::LoginPage, subscriptions::SubscriptionsPage,
    task_checklist::TaskChecklistPage, tasks::TasksPage,
};
use crate::state::{auth::AuthState, toast::ToastQueue, ui::UiState};
use crate::util::auth::{Access, home_path, install_guard};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared auth, backend config, toast and UI contexts, restores
/// any stored session once hydrated, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Auth stays "loading" until the stored session has been read in the
    // browser, so guards never redirect during SSR or hydration.
    let auth = RwSignal::new(AuthState { session: None, loading: true });
    let config = RwSignal::new(None::<BackendConfig>);
    let toasts = RwSignal::new(ToastQueue::default());
    let ui = RwSignal::new(UiState::default());

    provide_context(auth);
    provide_context(config);
    provide_context(toasts);
    provide_context(ui);

    Effect::new(move || {
        #[cfg(feature = "hydrate")]
        {
            use crate::state::auth::load_session;
            use crate::util::storage::BrowserStore;

            let session = load_session(&BrowserStore::Local, &BrowserStore::Tab);
            if let Some(s) = session.as_ref() {
                log::info!("auth: restored {:?} session for {}", s.scope, s.email);
            }
            auth.set(AuthState { session, loading: false });

            let dark = crate::util::dark_mode::read_preference();
            crate::util::dark_mode::apply(dark);
            ui.update(|u| u.dark_mode = dark);

            leptos::task::spawn_local(async move {
                if let Err(e) = crate::util::remote::ensure_config(config).await {
                    log::warn!("config: fetch failed: {e}");
                }
            });
        }
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/propdesk.css"/>
        <Title text="PropDesk"/>

        <Router>
            <ImpersonationBanner/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomeRedirect/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("impersonate") view=ImpersonatePage/>
                <Route path=StaticSegment("admin") view=AdminDashboardPage/>
                <Route path=(StaticSegment("admin"), StaticSegment("clients")) view=ClientsPage/>
                <Route path=(StaticSegment("admin"), StaticSegment("clients"), ParamSegment("id")) view=ClientDetailPage/>
                <Route path=(StaticSegment("admin"), StaticSegment("subscriptions")) view=SubscriptionsPage/>
                <Route path=StaticSegment("tasks") view=TasksPage/>
                <Route path=(StaticSegment("tasks"), ParamSegment("id")) view=TaskChecklistPage/>
                <Route path=(StaticSegment("bookings"), ParamSegment("id"), StaticSegment("guest")) view=GuestInfoPage/>
            </Routes>
        </Router>
        <ToastHost/>
    }
}

/// `/` sends each user to their own landing view.
#[component]
fn HomeRedirect() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    install_guard(auth, Access::SignedIn, navigate.clone());
    Effect::new(move || {
        let target = auth.with(|a| if a.loading { None } else { a.session.as_ref().map(home_path) });
        if let Some(target) = target {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
    view! { <p class="page-loading">"Loading..."</p> }
}

//! Fixed-position stack rendering the shared toast queue.

use leptos::prelude::*;

use crate::state::toast::ToastQueue;

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastQueue>>();

    view! {
        <div class="toast-host" role="status" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .items()
                    .iter()
                    .cloned()
                    .map(|toast| {
                        let id = toast.id;
                        view! {
                            <div class=toast.kind.class()>
                                <span class="toast__message">{toast.message}</span>
                                <button
                                    class="toast__close"
                                    title="Dismiss"
                                    on:click=move |_| toasts.update(|q| q.dismiss(id))
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

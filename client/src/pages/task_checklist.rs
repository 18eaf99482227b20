//! One task's checklist with photo-proof completion.
//!
//! ERROR HANDLING
//! ==============
//! Every change is applied to a copy of the task first. A rule violation
//! (photo required) or a failed save leaves the rendered task as it was and
//! shows a toast; only a persisted change replaces the task signal.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::checklist_row::ChecklistRow;
use crate::components::nav_bar::NavBar;
use crate::net::types::Task;
use crate::pages::tasks::task_status_label;
use crate::state::checklist::{apply_toggle, progress};
use crate::util::auth::{Access, install_guard};
use crate::util::remote::{RemoteCtx, notify_error};
use crate::util::time::{display_date, now_rfc3339};

#[component]
pub fn TaskChecklistPage() -> impl IntoView {
    let ctx = RemoteCtx::from_context();
    install_guard(ctx.auth, Access::SignedIn, use_navigate());
    let params = use_params_map();
    let task_id = Memo::new(move |_| params.with(|p| p.get("id").unwrap_or_default()));

    let task = RwSignal::new(None::<Task>);
    let saving = RwSignal::new(false);
    let signed_in = Memo::new(move |_| ctx.auth.with(|a| a.session.is_some()));

    Effect::new(move || {
        let id = task_id.get();
        if !signed_in.get() || id.is_empty() {
            return;
        }
        ctx.spawn(
            "Loading task failed",
            move |remote| async move { crate::net::db::get_task(&remote, &id).await },
            move |row| task.set(Some(row)),
        );
    });

    // Apply one change to a copy, persist it, then swap it in.
    let commit = move |item_id: String, done: bool, proof: Option<String>| {
        let Some(mut next) = task.get_untracked() else {
            return;
        };
        let by = ctx.auth.with_untracked(|a| a.session.as_ref().map(|s| s.label().to_owned())).unwrap_or_default();
        if let Err(e) = apply_toggle(&mut next, &item_id, done, proof.as_deref(), &by, &now_rfc3339()) {
            notify_error(ctx.toasts, &e.to_string());
            // Re-render so the checkbox snaps back to the stored state.
            task.update(|_| {});
            return;
        }
        saving.set(true);
        let saved = next.clone();
        ctx.spawn_or_else(
            "Saving checklist failed",
            move |remote| async move { crate::net::db::save_checklist(&remote, &next).await },
            move |()| {
                task.set(Some(saved));
                saving.set(false);
            },
            move |_| {
                task.update(|_| {});
                saving.set(false);
            },
        );
    };

    let on_toggle = Callback::new(move |(item_id, done): (String, bool)| commit(item_id, done, None));
    let on_proof = Callback::new(move |(item_id, url): (String, String)| commit(item_id, true, Some(url)));

    let rows = move || {
        task.get()
            .map(|t| {
                let id = t.id.clone();
                t.checklist
                    .into_iter()
                    .map(|item| {
                        view! {
                            <ChecklistRow
                                item=item
                                task_id=id.clone()
                                busy=saving
                                on_toggle=on_toggle
                                on_proof=on_proof
                            />
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    };

    let header = move || {
        task.get().map(|t| {
            let p = progress(&t.checklist);
            view! {
                <h1>{t.title.clone()}</h1>
                <p class="task-page__meta">
                    {t.property_name.clone().unwrap_or_default()}
                    " · Due "
                    {display_date(t.due_date.as_deref())}
                    " · "
                    <span class="badge">{task_status_label(t.status)}</span>
                </p>
                <div class="task-page__progress">
                    <progress max=p.total.max(1) value=p.done></progress>
                    <span>{format!("{}/{} done ({}%)", p.done, p.total, p.percent())}</span>
                </div>
            }
        })
    };

    view! {
        <div class="task-page">
            <NavBar />
            <a class="btn btn--small" href="/tasks">"Back to tasks"</a>
            <Show when=move || task.with(Option::is_some) fallback=|| view! { <p>"Loading task..."</p> }>
                {header}
                <Show
                    when=move || task.with(|t| t.as_ref().is_some_and(|t| !t.checklist.is_empty()))
                    fallback=|| view! { <p class="data-table__empty">"This task has no checklist."</p> }
                >
                    <ul class="checklist">{rows}</ul>
                </Show>
            </Show>
        </div>
    }
}

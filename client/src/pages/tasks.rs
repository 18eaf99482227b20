//! Client task view: the signed-in (or impersonated) client's tasks and the
//! bookings on their properties.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::nav_bar::NavBar;
use crate::net::error::ApiError;
use crate::net::types::{Booking, Task, TaskStatus};
use crate::state::checklist::progress;
use crate::util::auth::{Access, install_guard};
use crate::util::remote::RemoteCtx;
use crate::util::time::display_date;

#[must_use]
pub fn task_status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "Pending",
        TaskStatus::InProgress => "In progress",
        TaskStatus::Completed => "Completed",
        TaskStatus::Unknown => "Unknown",
    }
}

/// Distinct property ids referenced by `tasks`, in first-seen order.
#[must_use]
pub fn property_ids(tasks: &[Task]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for task in tasks {
        if !task.property_id.is_empty() && !ids.contains(&task.property_id) {
            ids.push(task.property_id.clone());
        }
    }
    ids
}

/// Open work first (earliest due date first), completed tasks last.
#[must_use]
pub fn sorted_tasks(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| {
        let done = |t: &Task| t.status == TaskStatus::Completed;
        done(a)
            .cmp(&done(b))
            .then_with(|| a.due_date.is_none().cmp(&b.due_date.is_none()))
            .then_with(|| a.due_date.cmp(&b.due_date))
    });
    tasks
}

#[component]
pub fn TasksPage() -> impl IntoView {
    let ctx = RemoteCtx::from_context();
    install_guard(ctx.auth, Access::SignedIn, use_navigate());

    let tasks = RwSignal::new(Vec::<Task>::new());
    let bookings = RwSignal::new(Vec::<Booking>::new());
    let loaded = RwSignal::new(false);

    // A super-admin in their own tab sees every task; anyone else only theirs.
    let owner = Memo::new(move |_| {
        ctx.auth.with(|a| {
            let session = a.session.as_ref()?;
            let all = a.is_super_admin() && !a.is_impersonating();
            Some(if all { None } else { Some(session.uid.clone()) })
        })
    });

    Effect::new(move || {
        let Some(owner) = owner.get() else {
            return;
        };
        ctx.spawn(
            "Loading tasks failed",
            move |remote| async move {
                let rows = crate::net::db::list_tasks(&remote, owner.as_deref()).await?;
                let ids = property_ids(&rows);
                let booked = crate::net::db::bookings_for_properties(&remote, &ids).await?;
                Ok::<_, ApiError>((rows, booked))
            },
            move |(rows, booked)| {
                tasks.set(sorted_tasks(rows));
                bookings.set(booked);
                loaded.set(true);
            },
        );
    });

    let task_rows = move || {
        tasks
            .get()
            .into_iter()
            .map(|task| {
                let p = progress(&task.checklist);
                let href = format!("/tasks/{}", task.id);
                view! {
                    <li class="task-card">
                        <a class="task-card__title" href=href>{task.title.clone()}</a>
                        <span class="task-card__property">{task.property_name.clone().unwrap_or_default()}</span>
                        <span class="badge">{task_status_label(task.status)}</span>
                        <span class="task-card__due">"Due " {display_date(task.due_date.as_deref())}</span>
                        <progress class="task-card__progress" max=p.total.max(1) value=p.done></progress>
                        <span class="task-card__count">{format!("{}/{}", p.done, p.total)}</span>
                    </li>
                }
            })
            .collect::<Vec<_>>()
    };

    let booking_rows = move || {
        bookings
            .get()
            .into_iter()
            .map(|b| {
                let href = format!("/bookings/{}/guest", b.id);
                let guest = if b.guest_name.trim().is_empty() { "Unnamed guest".to_owned() } else { b.guest_name.clone() };
                view! {
                    <tr>
                        <td>
                            <a href=href>{guest}</a>
                        </td>
                        <td>{b.property_name.clone().unwrap_or_default()}</td>
                        <td>{b.check_in.clone().unwrap_or_else(|| "-".to_owned())}</td>
                        <td>{b.check_out.clone().unwrap_or_else(|| "-".to_owned())}</td>
                        <td class="data-table__num">{b.guest_count}</td>
                    </tr>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="task-page">
            <NavBar />
            <header class="admin-page__header">
                <h1>"Tasks"</h1>
            </header>
            <Show when=move || loaded.get() fallback=|| view! { <p>"Loading tasks..."</p> }>
                <Show
                    when=move || tasks.with(|t| !t.is_empty())
                    fallback=|| view! { <p class="data-table__empty">"No tasks assigned."</p> }
                >
                    <ul class="task-list">{task_rows}</ul>
                </Show>
                <section class="admin-page__section">
                    <h2>"Bookings"</h2>
                    <Show
                        when=move || bookings.with(|b| !b.is_empty())
                        fallback=|| view! { <p class="data-table__empty">"No bookings."</p> }
                    >
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Guest"</th>
                                    <th>"Property"</th>
                                    <th>"Check-in"</th>
                                    <th>"Check-out"</th>
                                    <th>"Guests"</th>
                                </tr>
                            </thead>
                            <tbody>{booking_rows}</tbody>
                        </table>
                    </Show>
                </section>
            </Show>
        </div>
    }
}

//! Guest-info editor for one booking.
//!
//! Errors are shown inline once the user has tried to save; only fields that
//! differ from the loaded booking are written.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::nav_bar::NavBar;
use crate::net::types::Booking;
use crate::state::guest_info::{FieldError, GuestField, GuestInfoForm};
use crate::util::auth::{Access, install_guard};
use crate::util::remote::{RemoteCtx, notify};

fn input_type(field: GuestField) -> &'static str {
    match field {
        GuestField::Email => "email",
        GuestField::Phone => "tel",
        GuestField::Count => "number",
        GuestField::CheckIn | GuestField::CheckOut => "date",
        GuestField::Name | GuestField::Notes => "text",
    }
}

#[component]
pub fn GuestInfoPage() -> impl IntoView {
    let ctx = RemoteCtx::from_context();
    install_guard(ctx.auth, Access::SignedIn, use_navigate());
    let params = use_params_map();
    let booking_id = Memo::new(move |_| params.with(|p| p.get("id").unwrap_or_default()));

    let booking = RwSignal::new(None::<Booking>);
    let form = RwSignal::new(GuestInfoForm::default());
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let attempted = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let signed_in = Memo::new(move |_| ctx.auth.with(|a| a.session.is_some()));

    Effect::new(move || {
        let id = booking_id.get();
        if !signed_in.get() || id.is_empty() {
            return;
        }
        ctx.spawn(
            "Loading booking failed",
            move |remote| async move { crate::net::db::get_booking(&remote, &id).await },
            move |row| {
                form.set(GuestInfoForm::from_booking(&row));
                booking.set(Some(row));
                errors.set(Vec::new());
                attempted.set(false);
            },
        );
    });

    // Live re-validation after the first save attempt.
    Effect::new(move || {
        let next = form.with(GuestInfoForm::validate);
        if attempted.get() {
            errors.set(next);
        }
    });

    let dirty = move || booking.with(|b| b.as_ref().is_some_and(|b| form.with(|f| !f.changed_fields(b).is_empty())));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get() {
            return;
        }
        attempted.set(true);
        let current = form.get();
        let problems = current.validate();
        if !problems.is_empty() {
            errors.set(problems);
            return;
        }
        let Some(original) = booking.get() else {
            return;
        };
        let changed = current.changed_fields(&original);
        if changed.is_empty() {
            notify(ctx.toasts, "Nothing to save.");
            return;
        }
        saving.set(true);
        let id = original.id.clone();
        ctx.spawn_or_else(
            "Saving guest info failed",
            move |remote| async move { crate::net::db::save_booking_fields(&remote, &id, &changed).await },
            move |()| {
                booking.update(|b| {
                    if let Some(b) = b.as_mut() {
                        current.apply_to(b);
                    }
                });
                saving.set(false);
                notify(ctx.toasts, "Guest info saved.");
            },
            move |_| saving.set(false),
        );
    };

    let fields = move || {
        GuestField::ALL
            .into_iter()
            .map(|field| {
                let error = move || errors.with(|e| GuestInfoForm::error_for(e, field).map(str::to_owned));
                let control = if field == GuestField::Notes {
                    view! {
                        <textarea
                            class="form-field__control"
                            rows="4"
                            prop:value=move || form.with(|f| f.get(field).to_owned())
                            on:input=move |ev| form.update(|f| f.set(field, event_target_value(&ev)))
                        ></textarea>
                    }
                        .into_any()
                } else {
                    view! {
                        <input
                            class="form-field__control"
                            type=input_type(field)
                            min=(field == GuestField::Count).then_some("1")
                            prop:value=move || form.with(|f| f.get(field).to_owned())
                            on:input=move |ev| form.update(|f| f.set(field, event_target_value(&ev)))
                        />
                    }
                        .into_any()
                };
                view! {
                    <label class="form-field" class:form-field--invalid=move || error().is_some()>
                        <span class="form-field__label">{field.label()}</span>
                        {control}
                        {move || error().map(|msg| view! { <span class="form-field__error">{msg}</span> })}
                    </label>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="task-page">
            <NavBar />
            <a class="btn btn--small" href="/tasks">"Back to tasks"</a>
            <Show when=move || booking.with(Option::is_some) fallback=|| view! { <p>"Loading booking..."</p> }>
                <h1>"Guest info"</h1>
                <p class="task-page__meta">
                    {move || booking.with(|b| b.as_ref().and_then(|b| b.property_name.clone()).unwrap_or_default())}
                </p>
                <form class="guest-form" on:submit=on_submit novalidate=true>
                    {fields}
                    <div class="guest-form__actions">
                        <button
                            class="btn"
                            type="button"
                            disabled=move || saving.get() || !dirty()
                            on:click=move |_| {
                                if let Some(b) = booking.get() {
                                    form.set(GuestInfoForm::from_booking(&b));
                                    errors.set(Vec::new());
                                    attempted.set(false);
                                }
                            }
                        >
                            "Discard changes"
                        </button>
                        <button class="btn btn--primary" type="submit" disabled=move || saving.get() || !dirty()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}

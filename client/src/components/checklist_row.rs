//! One checklist line: completion checkbox plus optional proof photo.
//!
//! ERROR HANDLING
//! ==============
//! A picked file is validated locally before any upload; rejections and
//! upload failures surface as toasts and leave the item unchanged. The URL of
//! a successful upload is handed to `on_proof`, which completes the item.

use leptos::prelude::*;

use crate::net::types::ChecklistItem;
#[cfg(feature = "hydrate")]
use crate::state::checklist::validate_proof_file;
#[cfg(feature = "hydrate")]
use crate::util::remote::{RemoteCtx, notify_error};
use crate::util::time::display_date;

#[component]
pub fn ChecklistRow(
    item: ChecklistItem,
    task_id: String,
    #[prop(into)] busy: Signal<bool>,
    on_toggle: Callback<(String, bool)>,
    on_proof: Callback<(String, String)>,
) -> impl IntoView {
    let uploading = RwSignal::new(false);
    let item_id = item.id.clone();
    let done = item.completed;

    let toggle_id = item_id.clone();
    let on_check = move |ev: leptos::ev::Event| {
        let checked = event_target_checked(&ev);
        on_toggle.run((toggle_id.clone(), checked));
    };

    let on_file = {
        #[cfg(feature = "hydrate")]
        {
            let ctx = RemoteCtx::from_context();
            let item_id = item_id.clone();
            let task_id = task_id.clone();
            move |ev: leptos::ev::Event| {
                use wasm_bindgen::JsCast;

                let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                    return;
                };
                let Some(file) = input.files().and_then(|files| files.get(0)) else {
                    return;
                };
                input.set_value("");
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let size = file.size() as u64;
                if let Err(e) = validate_proof_file(&file.type_(), size) {
                    notify_error(ctx.toasts, &e.to_string());
                    return;
                }
                let item_id = item_id.clone();
                let task_id = task_id.clone();
                let done_id = item_id.clone();
                uploading.set(true);
                ctx.spawn_or_else(
                    "Photo upload failed",
                    move |remote| async move {
                        crate::net::upload::upload_proof(&remote, &task_id, &item_id, &file).await
                    },
                    move |url| {
                        uploading.set(false);
                        on_proof.run((done_id, url));
                    },
                    move |_| uploading.set(false),
                );
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&task_id, uploading);
            move |_ev: leptos::ev::Event| {}
        }
    };

    let needs_photo = item.requires_photo && !item.has_proof();
    let input_id = format!("proof-{item_id}");

    view! {
        <li class="checklist-row" class:checklist-row--done=done>
            <label class="checklist-row__main">
                <input
                    type="checkbox"
                    prop:checked=done
                    disabled=move || busy.get() || uploading.get()
                    on:change=on_check
                />
                <span class="checklist-row__label">{item.label.clone()}</span>
                {item.requires_photo.then(|| view! { <span class="badge badge--info">"Photo required"</span> })}
            </label>
            <div class="checklist-row__proof">
                {item
                    .proof_url
                    .clone()
                    .filter(|u| !u.trim().is_empty())
                    .map(|url| {
                        let href = url.clone();
                        view! {
                            <a class="checklist-row__thumb" href=href target="_blank" rel="noopener">
                                <img src=url alt="Proof photo" loading="lazy" />
                            </a>
                        }
                    })}
                <label class="btn btn--small" class:btn--primary=needs_photo for=input_id.clone()>
                    {move || if uploading.get() { "Uploading..." } else { "Attach photo" }}
                </label>
                <input
                    id=input_id
                    class="visually-hidden"
                    type="file"
                    accept="image/*"
                    capture="environment"
                    disabled=move || busy.get() || uploading.get()
                    on:change=on_file
                />
            </div>
            {done
                .then(|| {
                    let by = item.completed_by.clone().unwrap_or_default();
                    view! {
                        <span class="checklist-row__meta">
                            "Done " {display_date(item.completed_at.as_deref())}
                            {(!by.is_empty()).then(|| format!(" by {by}"))}
                        </span>
                    }
                })}
        </li>
    }
}

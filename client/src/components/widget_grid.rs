//! Draggable, resizable dashboard grid.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the visible projection of the persisted [`GridLayout`] as a CSS
//! grid so the server markup already has the final arrangement. Pointer math
//! only runs while the layout is being edited.
//!
//! DESIGN
//! ======
//! A press on a widget header (move) or its corner handle (resize) records a
//! [`Gesture`]. Moves past the drag threshold compute a *preview* layout from
//! the untouched committed layout plus the gesture's grid delta, so the
//! preview never accumulates rounding drift. Release commits the preview and
//! hands it to `on_commit` for persistence; a press that never crossed the
//! threshold commits nothing.

#[cfg(test)]
#[path = "widget_grid_test.rs"]
mod widget_grid_test;

use leptos::prelude::*;

use crate::components::widgets::widget_body;
use crate::state::dashboard::DashboardData;
use crate::state::layout::{GridItem, GridLayout};
use crate::state::widgets::WidgetVisibility;
use crate::util::grid_gesture::{GRID_MARGIN_PX, Gesture, GestureKind, ROW_HEIGHT_PX};
#[cfg(feature = "hydrate")]
use crate::util::grid_gesture::GridMetrics;

/// Inline placement for one item.
#[must_use]
pub fn cell_style(item: &GridItem) -> String {
    format!("grid-column: {} / span {}; grid-row: {} / span {};", item.x + 1, item.w, item.y + 1, item.h)
}

/// Inline template for the grid container.
#[must_use]
pub fn container_style(cols: i32) -> String {
    format!(
        "display: grid; grid-template-columns: repeat({cols}, minmax(0, 1fr)); grid-auto-rows: {ROW_HEIGHT_PX}px; \
         gap: {GRID_MARGIN_PX}px; padding: {GRID_MARGIN_PX}px;"
    )
}

/// Apply a gesture target to a copy of `base`.
#[must_use]
pub fn preview_layout(
    base: &GridLayout,
    visibility: &WidgetVisibility,
    gesture: &Gesture,
    target: (i32, i32),
) -> GridLayout {
    let mut next = base.clone();
    let key = gesture.key();
    match gesture.kind {
        GestureKind::Move => {
            next.move_visible(visibility, key, target.0, target.1);
        }
        GestureKind::Resize => {
            next.resize_visible(visibility, key, target.0, target.1);
        }
    }
    next
}

#[component]
pub fn WidgetGrid(
    layout: RwSignal<GridLayout>,
    #[prop(into)] visibility: Signal<WidgetVisibility>,
    #[prop(into)] editing: Signal<bool>,
    #[prop(into)] data: Signal<DashboardData>,
    on_commit: Callback<GridLayout>,
    on_hide: Callback<crate::state::widgets::WidgetKey>,
) -> impl IntoView {
    let container_ref = NodeRef::<leptos::html::Div>::new();
    let gesture = RwSignal::new(None::<Gesture>);
    let preview = RwSignal::new(None::<GridLayout>);

    let shown = Memo::new(move |_| {
        let vis = visibility.get();
        match preview.get() {
            Some(p) => p.visible_items(&vis),
            None => layout.with(|l| l.visible_items(&vis)),
        }
    });
    let cols = move || layout.with(|l| l.cols);

    let begin = move |kind: GestureKind, item: GridItem, ev: &leptos::ev::PointerEvent| {
        #[cfg(feature = "hydrate")]
        {
            if !editing.get_untracked() || ev.button() != 0 {
                return;
            }
            ev.prevent_default();
            ev.stop_propagation();
            if let Some(container) = container_ref.get_untracked() {
                let _ = container.set_pointer_capture(ev.pointer_id());
            }
            gesture.set(Some(Gesture::new(kind, item, f64::from(ev.client_x()), f64::from(ev.client_y()))));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (kind, item, ev, editing, gesture);
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::PointerEvent| {
                let Some(mut current) = gesture.get_untracked() else {
                    return;
                };
                let Some(container) = container_ref.get_untracked() else {
                    return;
                };
                let metrics = GridMetrics::new(f64::from(container.client_width()), layout.with_untracked(|l| l.cols));
                let was_active = current.active;
                let target = current.update(&metrics, f64::from(ev.client_x()), f64::from(ev.client_y()));
                if current.active != was_active {
                    gesture.set(Some(current));
                }
                if let Some(target) = target {
                    let next = layout
                        .with_untracked(|base| preview_layout(base, &visibility.get_untracked(), &current, target));
                    if preview.with_untracked(|p| p.as_ref() != Some(&next)) {
                        preview.set(Some(next));
                    }
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let finish = move |commit: bool| {
        let Some(done) = gesture.get_untracked() else {
            return;
        };
        gesture.set(None);
        let Some(next) = preview.get_untracked() else {
            return;
        };
        preview.set(None);
        if commit && done.active {
            layout.set(next.clone());
            on_commit.run(next);
        }
    };

    let on_pointer_up = move |ev: leptos::ev::PointerEvent| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(container) = container_ref.get_untracked() {
                let _ = container.release_pointer_capture(ev.pointer_id());
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
        finish(true);
    };
    let on_pointer_cancel = move |_ev: leptos::ev::PointerEvent| finish(false);

    let cells = move || {
        let dragging = gesture.get().filter(|g| g.active).map(|g| g.key());
        shown
            .get()
            .into_iter()
            .map(|item| {
                let key = item.key;
                view! {
                    <section
                        class="widget"
                        class:widget--editing=move || editing.get()
                        class:widget--dragging=dragging == Some(key)
                        style=cell_style(&item)
                        data-widget=key.as_str()
                    >
                        <header
                            class="widget__header"
                            on:pointerdown=move |ev| begin(GestureKind::Move, item, &ev)
                        >
                            <h3 class="widget__title">{key.title()}</h3>
                            <Show when=move || editing.get()>
                                <button
                                    class="widget__hide"
                                    title="Hide widget"
                                    on:pointerdown=move |ev| ev.stop_propagation()
                                    on:click=move |_| on_hide.run(key)
                                >
                                    "×"
                                </button>
                            </Show>
                        </header>
                        <div class="widget__body">{widget_body(key, data)}</div>
                        <Show when=move || editing.get()>
                            <span
                                class="widget__resize"
                                title="Resize"
                                on:pointerdown=move |ev| begin(GestureKind::Resize, item, &ev)
                            ></span>
                        </Show>
                    </section>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div
            class="widget-grid"
            class:widget-grid--editing=move || editing.get()
            style=move || container_style(cols())
            node_ref=container_ref
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointercancel=on_pointer_cancel
        >
            {cells}
        </div>
    }
}

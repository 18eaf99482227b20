//! Labelled `<select>` bound to a string value.
//!
//! DESIGN
//! ======
//! Options are rendered with their *index* as the DOM value and mapped back on
//! change, so duplicate option values cannot confuse the browser and the
//! caller's callback only ever receives the chosen option's `value` string.
//! Exactly one option is marked selected: the first whose value matches, or
//! the first option when nothing matches (native `<select>` behavior).

#[cfg(test)]
#[path = "select_field_test.rs"]
mod select_field_test;

use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

/// Index of the option to mark selected, `None` only for an empty list.
#[must_use]
pub fn selected_index(options: &[SelectOption], selected: &str) -> Option<usize> {
    if options.is_empty() {
        return None;
    }
    Some(options.iter().position(|o| o.value == selected).unwrap_or(0))
}

/// Per-option selected flags; at most one is `true`.
#[must_use]
pub fn option_marks(options: &[SelectOption], selected: &str) -> Vec<bool> {
    let chosen = selected_index(options, selected);
    (0..options.len()).map(|i| Some(i) == chosen).collect()
}

/// Map the DOM value (an index) back to the option's value.
#[must_use]
pub fn value_for_dom(options: &[SelectOption], dom_value: &str) -> Option<String> {
    let index = dom_value.trim().parse::<usize>().ok()?;
    options.get(index).map(|o| o.value.clone())
}

#[component]
pub fn SelectField(
    #[prop(into)] options: Signal<Vec<SelectOption>>,
    #[prop(into)] selected: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    let on_select = move |ev: leptos::ev::Event| {
        let dom_value = event_target_value(&ev);
        if let Some(value) = options.with_untracked(|opts| value_for_dom(opts, &dom_value)) {
            on_change.run(value);
        }
    };

    let rendered = move || {
        let opts = options.get();
        let marks = option_marks(&opts, &selected.get());
        opts.into_iter()
            .zip(marks)
            .enumerate()
            .map(|(i, (opt, mark))| {
                view! {
                    <option value=i.to_string() selected=mark>
                        {opt.label}
                    </option>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <label class="select-field">
            {label.map(|text| view! { <span class="select-field__label">{text}</span> })}
            <select
                class="select-field__control"
                disabled=move || disabled.get().unwrap_or(false)
                prop:value=move || {
                    options.with(|opts| selected_index(opts, &selected.get())).map(|i| i.to_string()).unwrap_or_default()
                }
                on:change=on_select
            >
                {rendered}
            </select>
        </label>
    }
}

//! Dark mode initialization and toggle.
//!
//! The preference lives in `localStorage`; with nothing stored the system
//! color scheme decides. The choice is applied as a `data-theme` attribute on
//! the `<html>` element.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort browser-only behavior; SSR paths
//! no-op to keep server rendering deterministic.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use crate::util::storage::{BrowserStore, KeyValueStore};

pub const STORAGE_KEY: &str = "propdesk.dark";

/// Stored preference, falling back to `system_prefers_dark`.
pub fn stored_preference(store: &impl KeyValueStore, system_prefers_dark: bool) -> bool {
    match store.get(STORAGE_KEY).as_deref() {
        Some("true") => true,
        Some("false") => false,
        _ => system_prefers_dark,
    }
}

pub fn save_preference(store: &impl KeyValueStore, enabled: bool) {
    store.set(STORAGE_KEY, if enabled { "true" } else { "false" });
}

fn system_prefers_dark() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Read the browser's dark mode preference.
pub fn read_preference() -> bool {
    stored_preference(&BrowserStore::Local, system_prefers_dark())
}

/// Apply the `data-theme` attribute on the `<html>` element.
pub fn apply(enabled: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            let _ = el.set_attribute("data-theme", if enabled { "dark" } else { "light" });
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = enabled;
    }
}

/// Toggle dark mode and persist the new preference.
pub fn toggle(current: bool) -> bool {
    let next = !current;
    apply(next);
    save_preference(&BrowserStore::Local, next);
    next
}

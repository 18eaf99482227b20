//! # client
//!
//! Leptos + WASM frontend for the PropDesk property-management console.
//!
//! This crate contains pages, components, local UI state and the thin network
//! layer that talks to the remote document database, callable backend
//! functions and the identity provider. Business logic lives in those remote
//! services; everything here is view code, local state and the two pieces of
//! real client-side machinery: the dashboard widget grid and the
//! impersonation session hand-off.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs browser logging and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}

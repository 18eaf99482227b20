//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `layout`, `billing`, etc.) so individual
//! components can depend on small focused models. Every rule here is plain
//! Rust with no browser dependency; pages wrap these types in `RwSignal`s.

pub mod auth;
pub mod billing;
pub mod checklist;
pub mod clients;
pub mod dashboard;
pub mod guest_info;
pub mod impersonation;
pub mod layout;
pub mod toast;
pub mod ui;
pub mod widgets;

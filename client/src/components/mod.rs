//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render console chrome, tables and dashboard panels while
//! reading shared state from Leptos context providers. Route-level data
//! loading stays in `pages`.

pub mod checklist_row;
pub mod client_table;
pub mod confirm_dialog;
pub mod impersonation_banner;
pub mod nav_bar;
pub mod select_field;
pub mod subscription_table;
pub mod toast_host;
pub mod widget_grid;
pub mod widget_menu;
pub mod widgets;

//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (access guard, loading, saving)
//! and delegates rendering details to `components`.

pub mod admin_dashboard;
pub mod client_detail;
pub mod clients;
pub mod guest_info;
pub mod impersonate;
pub mod login;
pub mod subscriptions;
pub mod task_checklist;
pub mod tasks;

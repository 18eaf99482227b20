use super::*;

// =============================================================
// UiState defaults
// =============================================================

#[test]
fn ui_state_default_is_quiet() {
    let state = UiState::default();
    assert!(!state.dark_mode);
    assert!(!state.widget_menu_open);
    assert!(!state.editing_layout);
}

#[test]
fn leaving_edit_mode_closes_widget_menu() {
    let mut state = UiState::default();
    state.set_editing_layout(true);
    state.toggle_widget_menu();
    assert!(state.widget_menu_open);
    state.set_editing_layout(false);
    assert!(!state.widget_menu_open);
    assert!(!state.editing_layout);
}

// =============================================================
// AdminSection
// =============================================================

#[test]
fn section_for_path_prefers_longest_match() {
    assert_eq!(AdminSection::for_path("/admin"), AdminSection::Dashboard);
    assert_eq!(AdminSection::for_path("/admin/clients"), AdminSection::Clients);
    assert_eq!(AdminSection::for_path("/admin/clients/abc"), AdminSection::Clients);
    assert_eq!(AdminSection::for_path("/admin/subscriptions"), AdminSection::Subscriptions);
    assert_eq!(AdminSection::for_path("/admin/clientsx"), AdminSection::Dashboard);
    assert_eq!(AdminSection::for_path("/tasks"), AdminSection::Dashboard);
}

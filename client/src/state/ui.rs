//! Local UI chrome state (theme, dashboard menus, layout editing).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of domain state (`dashboard`,
//! `layout`) so rendering controls can evolve independently of remote data.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Top-level sections of the super-admin console.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdminSection {
    #[default]
    Dashboard,
    Clients,
    Subscriptions,
}

impl AdminSection {
    pub const ALL: [Self; 3] = [Self::Dashboard, Self::Clients, Self::Subscriptions];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/admin",
            Self::Clients => "/admin/clients",
            Self::Subscriptions => "/admin/subscriptions",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Clients => "Clients",
            Self::Subscriptions => "Subscriptions",
        }
    }

    /// Section owning `path`, matching the longest prefix.
    #[must_use]
    pub fn for_path(path: &str) -> Self {
        Self::ALL
            .into_iter()
            .filter(|s| path == s.path() || path.starts_with(&format!("{}/", s.path())))
            .max_by_key(|s| s.path().len())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub dark_mode: bool,
    /// The "Widgets" show/hide menu on the dashboard.
    pub widget_menu_open: bool,
    /// Drag and resize handles are only live while editing.
    pub editing_layout: bool,
}

impl UiState {
    pub fn toggle_widget_menu(&mut self) {
        self.widget_menu_open = !self.widget_menu_open;
    }

    /// Leaving edit mode also closes the widget menu.
    pub fn set_editing_layout(&mut self, editing: bool) {
        self.editing_layout = editing;
        if !editing {
            self.widget_menu_open = false;
        }
    }
}

//! Dashboard widget identity and show/hide state.
//!
//! DESIGN
//! ======
//! Visibility is kept as the set of *visible* keys in canonical widget order,
//! and only that set is persisted. A widget the user never saw (added in a
//! later release) therefore shows up hidden only if the stored blob predates
//! it and lists other keys; a missing blob means "everything visible".

#[cfg(test)]
#[path = "widgets_test.rs"]
mod widgets_test;

use serde::{Deserialize, Serialize};

use crate::util::storage::{KeyValueStore, load_json, save_json};

/// Storage key for the visible-widget list. The suffix is bumped whenever the
/// stored shape changes; old blobs are simply ignored.
pub const VISIBILITY_STORAGE_KEY: &str = "superAdminDashboardWidgets_v2";

/// Every panel the super-admin dashboard can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WidgetKey {
    #[serde(rename = "kpis")]
    Kpis,
    #[serde(rename = "revenue")]
    Revenue,
    #[serde(rename = "recentSignups")]
    RecentSignups,
    #[serde(rename = "subscriptionStatus")]
    SubscriptionStatus,
    #[serde(rename = "upcomingRenewals")]
    UpcomingRenewals,
    #[serde(rename = "taskOverview")]
    TaskOverview,
}

impl WidgetKey {
    pub const ALL: [Self; 6] = [
        Self::Kpis,
        Self::Revenue,
        Self::RecentSignups,
        Self::SubscriptionStatus,
        Self::UpcomingRenewals,
        Self::TaskOverview,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kpis => "kpis",
            Self::Revenue => "revenue",
            Self::RecentSignups => "recentSignups",
            Self::SubscriptionStatus => "subscriptionStatus",
            Self::UpcomingRenewals => "upcomingRenewals",
            Self::TaskOverview => "taskOverview",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw)
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Kpis => "Key metrics",
            Self::Revenue => "Revenue by plan",
            Self::RecentSignups => "Recent sign-ups",
            Self::SubscriptionStatus => "Subscription status",
            Self::UpcomingRenewals => "Upcoming renewals",
            Self::TaskOverview => "Task overview",
        }
    }

    fn rank(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(usize::MAX)
    }
}

/// Which widgets are shown, in canonical order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetVisibility {
    visible: Vec<WidgetKey>,
}

impl Default for WidgetVisibility {
    fn default() -> Self {
        Self { visible: WidgetKey::ALL.to_vec() }
    }
}

impl WidgetVisibility {
    /// Build from raw stored keys, ignoring unknown and duplicate entries.
    #[must_use]
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Self {
        let mut visible: Vec<WidgetKey> = keys.iter().filter_map(|k| WidgetKey::parse(k.as_ref())).collect();
        visible.sort_by_key(|k| k.rank());
        visible.dedup();
        Self { visible }
    }

    #[must_use]
    pub fn is_visible(&self, key: WidgetKey) -> bool {
        self.visible.contains(&key)
    }

    #[must_use]
    pub fn visible(&self) -> &[WidgetKey] {
        &self.visible
    }

    #[must_use]
    pub fn hidden(&self) -> Vec<WidgetKey> {
        WidgetKey::ALL.into_iter().filter(|k| !self.is_visible(*k)).collect()
    }

    /// Flip one widget. Toggling the same key twice restores the original set.
    pub fn toggle(&mut self, key: WidgetKey) {
        if let Some(pos) = self.visible.iter().position(|k| *k == key) {
            self.visible.remove(pos);
        } else {
            let at = self.visible.iter().position(|k| k.rank() > key.rank()).unwrap_or(self.visible.len());
            self.visible.insert(at, key);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The persisted form: visible keys only.
    #[must_use]
    pub fn to_stored(&self) -> Vec<&'static str> {
        self.visible.iter().map(|k| k.as_str()).collect()
    }

    /// Read from storage; a missing or unreadable entry yields the default.
    pub fn load(store: &impl KeyValueStore) -> Self {
        load_json::<Vec<String>>(store, VISIBILITY_STORAGE_KEY).map_or_else(Self::default, |keys| Self::from_keys(&keys))
    }

    pub fn save(&self, store: &impl KeyValueStore) {
        save_json(store, VISIBILITY_STORAGE_KEY, &self.to_stored());
    }
}

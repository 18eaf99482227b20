use super::*;
use crate::util::storage::MemoryStore;

// =============================================================
// WidgetKey
// =============================================================

#[test]
fn widget_key_parse_matches_serde_names() {
    for key in WidgetKey::ALL {
        assert_eq!(WidgetKey::parse(key.as_str()), Some(key));
        assert_eq!(serde_json::to_value(key).unwrap(), serde_json::json!(key.as_str()));
    }
    assert_eq!(WidgetKey::parse("weather"), None);
}

// =============================================================
// toggle
// =============================================================

#[test]
fn default_shows_every_widget() {
    let vis = WidgetVisibility::default();
    assert_eq!(vis.visible(), &WidgetKey::ALL);
    assert!(vis.hidden().is_empty());
}

#[test]
fn toggle_hides_then_shows() {
    let mut vis = WidgetVisibility::default();
    vis.toggle(WidgetKey::Revenue);
    assert!(!vis.is_visible(WidgetKey::Revenue));
    assert_eq!(vis.hidden(), vec![WidgetKey::Revenue]);
    vis.toggle(WidgetKey::Revenue);
    assert!(vis.is_visible(WidgetKey::Revenue));
}

#[test]
fn double_toggle_restores_original_set_for_every_key() {
    let start = WidgetVisibility::from_keys(&["kpis", "upcomingRenewals"]);
    for key in WidgetKey::ALL {
        let mut vis = start.clone();
        vis.toggle(key);
        assert_ne!(vis, start);
        vis.toggle(key);
        assert_eq!(vis, start, "double toggle of {key:?} changed the set");
    }
}

#[test]
fn toggle_reinserts_in_canonical_order() {
    let mut vis = WidgetVisibility::from_keys(&["kpis", "taskOverview"]);
    vis.toggle(WidgetKey::SubscriptionStatus);
    assert_eq!(
        vis.visible(),
        &[WidgetKey::Kpis, WidgetKey::SubscriptionStatus, WidgetKey::TaskOverview]
    );
}

// =============================================================
// persistence
// =============================================================

#[test]
fn save_persists_only_visible_keys() {
    let store = MemoryStore::new();
    let mut vis = WidgetVisibility::default();
    vis.toggle(WidgetKey::Revenue);
    vis.toggle(WidgetKey::TaskOverview);
    vis.save(&store);
    let raw = store.get(VISIBILITY_STORAGE_KEY).unwrap();
    let stored: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored, vec!["kpis", "recentSignups", "subscriptionStatus", "upcomingRenewals"]);
}

#[test]
fn load_round_trips_saved_state() {
    let store = MemoryStore::new();
    let mut vis = WidgetVisibility::default();
    vis.toggle(WidgetKey::Kpis);
    vis.save(&store);
    assert_eq!(WidgetVisibility::load(&store), vis);
}

#[test]
fn load_missing_or_corrupt_falls_back_to_default() {
    let store = MemoryStore::new();
    assert_eq!(WidgetVisibility::load(&store), WidgetVisibility::default());
    store.set(VISIBILITY_STORAGE_KEY, "{\"kpis\":true}");
    assert_eq!(WidgetVisibility::load(&store), WidgetVisibility::default());
}

#[test]
fn load_ignores_unknown_and_duplicate_keys() {
    let store = MemoryStore::new();
    store.set(VISIBILITY_STORAGE_KEY, r#"["taskOverview","weather","kpis","kpis"]"#);
    let vis = WidgetVisibility::load(&store);
    assert_eq!(vis.visible(), &[WidgetKey::Kpis, WidgetKey::TaskOverview]);
}

#[test]
fn empty_stored_list_means_all_hidden() {
    let store = MemoryStore::new();
    store.set(VISIBILITY_STORAGE_KEY, "[]");
    assert!(WidgetVisibility::load(&store).visible().is_empty());
}

#[test]
fn reset_restores_default() {
    let mut vis = WidgetVisibility::from_keys::<&str>(&[]);
    vis.reset();
    assert_eq!(vis, WidgetVisibility::default());
}

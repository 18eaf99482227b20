use super::*;
use crate::state::layout::default_layout;
use crate::state::widgets::WidgetKey;

fn grab(key: WidgetKey, kind: GestureKind) -> Gesture {
    let item = *default_layout().item(key).unwrap();
    let mut g = Gesture::new(kind, item, 0.0, 0.0);
    g.active = true;
    g
}

#[test]
fn cell_style_is_one_based() {
    let item = *default_layout().item(WidgetKey::SubscriptionStatus).unwrap();
    assert_eq!(cell_style(&item), "grid-column: 7 / span 6; grid-row: 3 / span 4;");
}

#[test]
fn container_style_uses_grid_constants() {
    let style = container_style(12);
    assert!(style.contains("repeat(12, minmax(0, 1fr))"));
    assert!(style.contains("grid-auto-rows: 40px"));
    assert!(style.contains("gap: 12px"));
}

#[test]
fn preview_move_leaves_base_untouched() {
    let base = default_layout();
    let vis = WidgetVisibility::default();
    let next = preview_layout(&base, &vis, &grab(WidgetKey::Revenue, GestureKind::Move), (6, 2));

    assert_eq!(base, default_layout());
    assert_eq!(next.item(WidgetKey::Revenue).unwrap().x, 6);
    assert!(!next.has_overlaps());
}

#[test]
fn preview_resize_respects_minimums() {
    let base = default_layout();
    let vis = WidgetVisibility::default();
    let next = preview_layout(&base, &vis, &grab(WidgetKey::Revenue, GestureKind::Resize), (1, 1));

    let revenue = next.item(WidgetKey::Revenue).unwrap();
    assert_eq!((revenue.w, revenue.h), (revenue.min_w, revenue.min_h));
}

// =============================================================================
// HIDDEN WIDGETS
// =============================================================================

#[test]
fn preview_keeps_hidden_widget_positions() {
    let base = default_layout();
    let mut vis = WidgetVisibility::default();
    vis.toggle(WidgetKey::SubscriptionStatus);
    let next = preview_layout(&base, &vis, &grab(WidgetKey::Revenue, GestureKind::Move), (6, 2));

    assert_eq!(next.item(WidgetKey::SubscriptionStatus), base.item(WidgetKey::SubscriptionStatus));
}

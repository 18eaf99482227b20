//! Dashboard grid layout: placement, collision push-down, vertical compaction
//! and reconciliation of the stored arrangement with the default one.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard renders widgets on a 12-column grid. Users drag widgets by
//! their header and resize them from the corner; every committed change is
//! written to `localStorage` and reconciled against [`default_layout`] at
//! mount so new widgets appear and removed ones are dropped.
//!
//! DESIGN
//! ======
//! The full layout keeps a position for every widget, hidden or not. What is
//! rendered is the *projection* onto the visible set: hidden widgets removed,
//! the rest compacted. Gestures operate on the projection and the result is
//! written back, so hidden widgets keep their last position for when they are
//! shown again.
//!
//! Invariants after every public operation on a projection: no two items
//! overlap, every item lies within `cols`, every item respects its minimum
//! size, and each key appears once.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::{Deserialize, Serialize};

use super::widgets::{WidgetKey, WidgetVisibility};
use crate::util::storage::{KeyValueStore, load_json, save_json};

pub const LAYOUT_STORAGE_KEY: &str = "superAdminDashboardLayout_v2";
pub const GRID_COLS: i32 = 12;
/// Tallest a single widget may be, in rows.
pub const MAX_ITEM_ROWS: i32 = 48;
/// Lowest row a stored or dragged widget may start at before compaction.
pub const MAX_ROW: i32 = 1_000;

/// One widget's cell rectangle in grid units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridItem {
    pub key: WidgetKey,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub min_w: i32,
    pub min_h: i32,
}

impl GridItem {
    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    #[must_use]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Column spans intersect.
    #[must_use]
    pub fn shares_columns(&self, other: &Self) -> bool {
        self.x < other.right() && other.x < self.right()
    }

    #[must_use]
    pub fn collides(&self, other: &Self) -> bool {
        self.key != other.key && self.shares_columns(other) && self.y < other.bottom() && other.y < self.bottom()
    }

    /// Enforce minimum size and column bounds.
    fn clamp(&mut self, cols: i32) {
        let min_w = self.min_w.clamp(1, cols);
        self.w = self.w.clamp(min_w, cols);
        let min_h = self.min_h.clamp(1, MAX_ITEM_ROWS);
        self.h = self.h.clamp(min_h, MAX_ITEM_ROWS);
        self.x = self.x.clamp(0, cols - self.w);
        self.y = self.y.clamp(0, MAX_ROW);
    }
}

/// Stored shape: position only. Minimum sizes always come from the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItem {
    pub i: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub cols: i32,
    pub items: Vec<GridItem>,
}

fn item(key: WidgetKey, x: i32, y: i32, w: i32, h: i32, min_w: i32, min_h: i32) -> GridItem {
    GridItem { key, x, y, w, h, min_w, min_h }
}

/// The canonical arrangement every stored layout is reconciled against.
#[must_use]
pub fn default_layout() -> GridLayout {
    GridLayout {
        cols: GRID_COLS,
        items: vec![
            item(WidgetKey::Kpis, 0, 0, 12, 2, 6, 2),
            item(WidgetKey::Revenue, 0, 2, 6, 4, 4, 3),
            item(WidgetKey::SubscriptionStatus, 6, 2, 6, 4, 3, 3),
            item(WidgetKey::RecentSignups, 0, 6, 6, 5, 4, 3),
            item(WidgetKey::UpcomingRenewals, 6, 6, 6, 5, 4, 3),
            item(WidgetKey::TaskOverview, 0, 11, 12, 4, 4, 3),
        ],
    }
}

/// Merge a stored arrangement with `defaults`.
///
/// Unknown and repeated keys are dropped, widgets missing from `stored` are
/// appended below everything else at their default column, sizes are clamped,
/// and the result is compacted so overlapping stored rectangles are resolved.
#[must_use]
pub fn reconcile(stored: &[StoredItem], defaults: &GridLayout) -> GridLayout {
    let cols = defaults.cols;
    let mut items: Vec<GridItem> = Vec::with_capacity(defaults.items.len());

    for entry in stored {
        let Some(key) = WidgetKey::parse(&entry.i) else {
            continue;
        };
        if items.iter().any(|it| it.key == key) {
            continue;
        }
        let Some(default) = defaults.items.iter().find(|d| d.key == key) else {
            continue;
        };
        let mut placed = GridItem { x: entry.x, y: entry.y, w: entry.w, h: entry.h, ..*default };
        placed.clamp(cols);
        items.push(placed);
    }

    let mut bottom = items.iter().map(GridItem::bottom).max().unwrap_or(0);
    for default in &defaults.items {
        if items.iter().any(|it| it.key == default.key) {
            continue;
        }
        let mut appended = GridItem { y: bottom, ..*default };
        appended.clamp(cols);
        bottom = appended.bottom();
        items.push(appended);
    }

    let mut layout = GridLayout { cols, items };
    layout.compact();
    layout
}

impl Default for GridLayout {
    fn default() -> Self {
        default_layout()
    }
}

impl GridLayout {
    #[must_use]
    pub fn item(&self, key: WidgetKey) -> Option<&GridItem> {
        self.items.iter().find(|it| it.key == key)
    }

    /// Lowest occupied row (exclusive).
    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.items.iter().map(GridItem::bottom).max().unwrap_or(0)
    }

    #[must_use]
    pub fn has_overlaps(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .any(|(i, a)| self.items.iter().skip(i + 1).any(|b| a.collides(b)))
    }

    /// Vertical compaction: in (row, column) order, each item moves to the
    /// row just below the lowest already-placed item sharing its columns (row
    /// 0 when there is none). Item order in `items` is kept.
    pub fn compact(&mut self) {
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        order.sort_by_key(|&i| (self.items[i].y, self.items[i].x));

        let mut placed: Vec<GridItem> = Vec::with_capacity(self.items.len());
        for idx in order {
            let mut current = self.items[idx];
            current.y = placed
                .iter()
                .filter(|p| p.shares_columns(&current))
                .map(GridItem::bottom)
                .max()
                .unwrap_or(0);
            self.items[idx] = current;
            placed.push(current);
        }
    }

    /// Push everything overlapping `anchor_idx` below it, cascading.
    fn push_collisions_down(&mut self, anchor_idx: usize) {
        let limit = self.items.len() * self.items.len() * 4 + 8;
        let mut queue = vec![anchor_idx];
        let mut steps = 0;
        while let Some(idx) = queue.pop() {
            steps += 1;
            if steps > limit {
                break;
            }
            let anchor = self.items[idx];
            for j in 0..self.items.len() {
                if j != idx && j != anchor_idx && anchor.collides(&self.items[j]) {
                    self.items[j].y = anchor.bottom();
                    queue.push(j);
                }
            }
        }
    }

    /// Place `key` at `(x, y)`, push colliding items down and compact.
    /// Returns `false` when the key is not in this layout.
    pub fn move_item(&mut self, key: WidgetKey, x: i32, y: i32) -> bool {
        let Some(idx) = self.items.iter().position(|it| it.key == key) else {
            return false;
        };
        self.items[idx].x = x;
        self.items[idx].y = y;
        self.items[idx].clamp(self.cols);
        self.push_collisions_down(idx);
        self.compact();
        true
    }

    /// Resize `key` to `(w, h)` within its minimums and the column count,
    /// push colliding items down and compact.
    pub fn resize_item(&mut self, key: WidgetKey, w: i32, h: i32) -> bool {
        let Some(idx) = self.items.iter().position(|it| it.key == key) else {
            return false;
        };
        self.items[idx].w = w;
        self.items[idx].h = h;
        self.items[idx].clamp(self.cols);
        self.push_collisions_down(idx);
        self.compact();
        true
    }

    /// The rendered layout: visible items only, compacted.
    #[must_use]
    pub fn projected(&self, visibility: &WidgetVisibility) -> GridLayout {
        let mut projected = GridLayout {
            cols: self.cols,
            items: self.items.iter().copied().filter(|it| visibility.is_visible(it.key)).collect(),
        };
        projected.compact();
        projected
    }

    /// The items to render for `visibility`, in placement order.
    #[must_use]
    pub fn visible_items(&self, visibility: &WidgetVisibility) -> Vec<GridItem> {
        self.projected(visibility).items
    }

    /// Copy positions from a projection back into the full layout.
    pub fn commit_projection(&mut self, projected: &GridLayout) {
        for placed in &projected.items {
            if let Some(slot) = self.items.iter_mut().find(|it| it.key == placed.key) {
                *slot = *placed;
            }
        }
    }

    /// Move within the visible projection and write the result back.
    pub fn move_visible(&mut self, visibility: &WidgetVisibility, key: WidgetKey, x: i32, y: i32) -> bool {
        let mut projected = self.projected(visibility);
        if !projected.move_item(key, x, y) {
            return false;
        }
        self.commit_projection(&projected);
        true
    }

    /// Resize within the visible projection and write the result back.
    pub fn resize_visible(&mut self, visibility: &WidgetVisibility, key: WidgetKey, w: i32, h: i32) -> bool {
        let mut projected = self.projected(visibility);
        if !projected.resize_item(key, w, h) {
            return false;
        }
        self.commit_projection(&projected);
        true
    }

    #[must_use]
    pub fn to_stored(&self) -> Vec<StoredItem> {
        self.items
            .iter()
            .map(|it| StoredItem { i: it.key.as_str().to_owned(), x: it.x, y: it.y, w: it.w, h: it.h })
            .collect()
    }

    /// Read and reconcile the stored layout; missing or unreadable entries
    /// yield [`default_layout`].
    pub fn load(store: &impl KeyValueStore) -> Self {
        let defaults = default_layout();
        match load_json::<Vec<StoredItem>>(store, LAYOUT_STORAGE_KEY) {
            Some(stored) => reconcile(&stored, &defaults),
            None => defaults,
        }
    }

    pub fn save(&self, store: &impl KeyValueStore) {
        save_json(store, LAYOUT_STORAGE_KEY, &self.to_stored());
    }
}

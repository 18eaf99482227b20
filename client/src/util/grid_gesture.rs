//! Pointer gesture math for the dashboard grid.
//!
//! Converts pixel movement into grid-unit moves and resizes. A press only
//! becomes a drag once the pointer travels past [`DRAG_THRESHOLD_PX`], so a
//! plain click on a widget header never reflows the layout.

#[cfg(test)]
#[path = "grid_gesture_test.rs"]
mod grid_gesture_test;

use crate::state::layout::GridItem;
use crate::state::widgets::WidgetKey;

pub const DRAG_THRESHOLD_PX: f64 = 5.0;
pub const ROW_HEIGHT_PX: f64 = 40.0;
pub const GRID_MARGIN_PX: f64 = 12.0;

/// Pixel geometry of the rendered grid container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMetrics {
    pub container_width: f64,
    pub cols: i32,
    pub row_height: f64,
    pub margin: f64,
}

impl GridMetrics {
    #[must_use]
    pub fn new(container_width: f64, cols: i32) -> Self {
        Self { container_width, cols, row_height: ROW_HEIGHT_PX, margin: GRID_MARGIN_PX }
    }

    /// Width of one column, never negative.
    #[must_use]
    pub fn col_width(&self) -> f64 {
        let cols = f64::from(self.cols.max(1));
        ((self.container_width - self.margin * (cols + 1.0)) / cols).max(0.0)
    }

    /// Pixel distance between the starts of adjacent columns / rows.
    fn col_step(&self) -> f64 {
        self.col_width() + self.margin
    }

    fn row_step(&self) -> f64 {
        self.row_height + self.margin
    }

    /// Round a pixel delta to whole grid cells.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn grid_delta(&self, dx_px: f64, dy_px: f64) -> (i32, i32) {
        let col_step = self.col_step();
        let dx = if col_step > 0.0 { (dx_px / col_step).round() as i32 } else { 0 };
        let dy = (dy_px / self.row_step()).round() as i32;
        (dx, dy)
    }
}

#[must_use]
pub fn exceeds_threshold(dx_px: f64, dy_px: f64) -> bool {
    dx_px.abs() > DRAG_THRESHOLD_PX || dy_px.abs() > DRAG_THRESHOLD_PX
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize,
}

/// An in-progress press on a widget header or resize handle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gesture {
    pub kind: GestureKind,
    pub origin: GridItem,
    pub start_x: f64,
    pub start_y: f64,
    pub active: bool,
}

impl Gesture {
    #[must_use]
    pub fn new(kind: GestureKind, origin: GridItem, start_x: f64, start_y: f64) -> Self {
        Self { kind, origin, start_x, start_y, active: false }
    }

    #[must_use]
    pub fn key(&self) -> WidgetKey {
        self.origin.key
    }

    /// Feed a pointer position. Returns the proposed grid target once the
    /// gesture has crossed the drag threshold, `None` while it is still a
    /// potential click. For [`GestureKind::Move`] the target is `(x, y)`, for
    /// [`GestureKind::Resize`] it is `(w, h)`.
    pub fn update(&mut self, metrics: &GridMetrics, x_px: f64, y_px: f64) -> Option<(i32, i32)> {
        let dx = x_px - self.start_x;
        let dy = y_px - self.start_y;
        if !self.active {
            if !exceeds_threshold(dx, dy) {
                return None;
            }
            self.active = true;
        }
        let (gx, gy) = metrics.grid_delta(dx, dy);
        Some(match self.kind {
            GestureKind::Move => (self.origin.x + gx, self.origin.y + gy),
            GestureKind::Resize => (self.origin.w + gx, self.origin.h + gy),
        })
    }
}

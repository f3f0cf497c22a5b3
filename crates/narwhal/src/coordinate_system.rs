//! Coordinate system helpers.
//!
//! The engine always works in a "rank axis is y" frame: `x` runs along a rank and `y` across
//! ranks. East/west layouts swap sizes on the way in and swap points on the way out; south/east
//! layouts walk the rank axis towards negative `y`.

use crate::config::Orientation;
use crate::geometry::{Point, Rect, Size};

impl Orientation {
    /// `true` when ranks are horizontal rows (`x` stays horizontal in model space).
    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::North | Orientation::South)
    }

    /// `true` when rank 0 is at the bottom (south) or on the right (east).
    pub fn is_reversed(self) -> bool {
        matches!(self, Orientation::South | Orientation::East)
    }

    /// Sign of the layout-space `y` step from one rank to the next.
    pub fn rank_step(self) -> f64 {
        if self.is_reversed() { -1.0 } else { 1.0 }
    }
}

/// Converts a model size into (along-rank, across-rank) extents.
pub fn adjust_size(orientation: Orientation, size: Size) -> (f64, f64) {
    if orientation.is_vertical() {
        (size.width, size.height)
    } else {
        (size.height, size.width)
    }
}

/// Maps a layout-space point into model space.
pub fn to_model(orientation: Orientation, p: Point) -> Point {
    if orientation.is_vertical() {
        p
    } else {
        Point::new(p.y, p.x)
    }
}

/// Maps a layout-space rectangle into model space.
pub fn rect_to_model(orientation: Orientation, r: Rect) -> Rect {
    if orientation.is_vertical() {
        r
    } else {
        Rect::new(r.y, r.x, r.height, r.width)
    }
}

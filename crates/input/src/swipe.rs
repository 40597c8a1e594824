//! Mouse-drag swipe tracking.
//!
//! A press pins the anchor (the cell under the pointer and its position
//! in board units); the release turns the displacement into an angle.
//! Displacements within the dead zone on both axes yield the 0-degree
//! sentinel, which consumers drop before quantizing into a direction.
//! Board units point up: positive `dy` means the drag went toward
//! higher rows.

use crate::types::{Cell, SWIPE_DEAD_ZONE};

/// Angle in degrees for a drag displacement, or `0.0` when both axes
/// stay within the dead zone. A perfectly horizontal rightward drag also
/// lands on `0.0` and is therefore dropped; that collision is inherited
/// behavior and kept.
pub fn swipe_angle(dx: f32, dy: f32) -> f32 {
    if dx.abs() > SWIPE_DEAD_ZONE || dy.abs() > SWIPE_DEAD_ZONE {
        dy.atan2(dx).to_degrees()
    } else {
        0.0
    }
}

/// One in-flight mouse gesture.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    anchor: Option<Anchor>,
}

#[derive(Debug, Clone, Copy)]
struct Anchor {
    cell: Cell,
    x: f32,
    y: f32,
}

impl SwipeTracker {
    pub fn new() -> SwipeTracker {
        SwipeTracker::default()
    }

    /// Start tracking from `cell`, pressed at `(x, y)` board units.
    pub fn press(&mut self, cell: Cell, x: f32, y: f32) {
        self.anchor = Some(Anchor { cell, x, y });
    }

    /// Finish the gesture at `(x, y)` board units. Yields the anchor
    /// cell and the swipe angle; `None` when no press was recorded.
    pub fn release(&mut self, x: f32, y: f32) -> Option<(Cell, f32)> {
        let anchor = self.anchor.take()?;
        Some((anchor.cell, swipe_angle(x - anchor.x, y - anchor.y)))
    }

    /// Drop any in-flight gesture (focus loss, reset).
    pub fn cancel(&mut self) {
        self.anchor = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.anchor.is_some()
    }
}

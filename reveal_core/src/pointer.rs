// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-gated pointer tracking for background-follow effects.
//!
//! A [`PointerTracker`] belongs to one component: it is created on mount,
//! fed from that component's own listener, and dropped on unmount. Moves are
//! coalesced so the effect updates at most once per frame.

use kurbo::{Point, Rect};

use crate::frame::{FrameGate, FrameTick};

/// Latest pointer position, released at most once per frame.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    samples: FrameGate<Point>,
    position: Option<Point>,
}

impl PointerTracker {
    /// Creates a tracker with no known position.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: FrameGate::new(),
            position: None,
        }
    }

    /// Records a pointer move. Non-finite coordinates are ignored.
    ///
    /// Returns `true` when the caller should request a frame.
    pub fn on_pointer_move(&mut self, at: Point) -> bool {
        if !at.is_finite() {
            return false;
        }
        self.samples.offer(at)
    }

    /// Applies the latest move for this frame and returns the new position.
    pub fn on_frame(&mut self, tick: &FrameTick) -> Option<Point> {
        let at = self.samples.take(tick)?;
        self.position = Some(at);
        Some(at)
    }

    /// Last applied position.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Last applied position relative to `bounds`, each axis in `[0, 1]`.
    ///
    /// Returns `None` before the first frame or for empty bounds.
    #[must_use]
    pub fn normalized(&self, bounds: Rect) -> Option<Point> {
        let at = self.position?;
        let (w, h) = (bounds.width(), bounds.height());
        if !(w > 0.0 && h > 0.0) {
            return None;
        }
        Some(Point::new(
            ((at.x - bounds.x0) / w).clamp(0.0, 1.0),
            ((at.y - bounds.y0) / h).clamp(0.0, 1.0),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::HostTime;

    fn tick(frame_index: u64) -> FrameTick {
        FrameTick {
            now: HostTime(frame_index * 16_667),
            frame_index,
        }
    }

    #[test]
    fn moves_coalesce_into_one_update_per_frame() {
        let mut tracker = PointerTracker::new();
        assert!(tracker.on_pointer_move(Point::new(1.0, 1.0)));
        assert!(!tracker.on_pointer_move(Point::new(2.0, 2.0)));
        assert!(!tracker.on_pointer_move(Point::new(3.0, 4.0)));
        assert_eq!(tracker.position(), None, "nothing applied before a frame");

        assert_eq!(tracker.on_frame(&tick(1)), Some(Point::new(3.0, 4.0)));
        assert_eq!(tracker.on_frame(&tick(1)), None);
        assert_eq!(tracker.position(), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn non_finite_moves_are_dropped() {
        let mut tracker = PointerTracker::new();
        assert!(!tracker.on_pointer_move(Point::new(f64::NAN, 0.0)));
        assert_eq!(tracker.on_frame(&tick(0)), None);
    }

    #[test]
    fn normalized_position_is_clamped_to_bounds() {
        let mut tracker = PointerTracker::new();
        let bounds = Rect::new(100.0, 0.0, 300.0, 100.0);
        assert_eq!(tracker.normalized(bounds), None);

        tracker.on_pointer_move(Point::new(150.0, 25.0));
        tracker.on_frame(&tick(0));
        assert_eq!(tracker.normalized(bounds), Some(Point::new(0.25, 0.25)));

        tracker.on_pointer_move(Point::new(500.0, -10.0));
        tracker.on_frame(&tick(1));
        assert_eq!(tracker.normalized(bounds), Some(Point::new(1.0, 0.0)));
        assert_eq!(tracker.normalized(Rect::ZERO), None);
    }
}

// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-linked values for parallax effects.
//!
//! Progress runs over the whole time an element crosses the viewport:
//!
//! ```text
//!   0.0  element top    == viewport bottom   (about to enter)
//!   1.0  element bottom == viewport top      (just left)
//! ```
//!
//! A [`ScrollProgress`] belongs to one component, like
//! [`PointerTracker`](crate::pointer::PointerTracker): it is fed from that
//! component's scroll listener, gated to one update per frame, and maps its
//! progress linearly onto an output range.

use kurbo::Rect;

use crate::frame::{FrameGate, FrameTick};

/// Progress of `element` through `viewport` along the vertical axis, in
/// `[0, 1]`.
///
/// Returns 0 when neither box has height or a coordinate is not finite.
#[must_use]
pub fn scroll_progress(element: Rect, viewport: Rect) -> f64 {
    let travel = viewport.height() + element.height();
    if !(travel.is_finite() && travel > 0.0) {
        return 0.0;
    }
    let progress = (viewport.y1 - element.y0) / travel;
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

/// Latest scroll progress of one element, released at most once per frame.
#[derive(Clone, Debug)]
pub struct ScrollProgress {
    samples: FrameGate<f64>,
    progress: f64,
    output: (f64, f64),
}

impl ScrollProgress {
    /// Creates a tracker mapping progress 0 to `from` and 1 to `to`.
    #[must_use]
    pub const fn new(from: f64, to: f64) -> Self {
        Self {
            samples: FrameGate::new(),
            progress: 0.0,
            output: (from, to),
        }
    }

    /// Records the element's and viewport's current boxes.
    ///
    /// Returns `true` when the caller should request a frame.
    pub fn on_scroll(&mut self, element: Rect, viewport: Rect) -> bool {
        self.samples.offer(scroll_progress(element, viewport))
    }

    /// Applies the latest sample for this frame and returns the mapped value.
    pub fn on_frame(&mut self, tick: &FrameTick) -> Option<f64> {
        self.progress = self.samples.take(tick)?;
        Some(self.value())
    }

    /// Last applied progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Last applied progress mapped onto the output range.
    #[must_use]
    pub fn value(&self) -> f64 {
        let (from, to) = self.output;
        from + (to - from) * self.progress
    }
}

// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport visibility tracking.
//!
//! [`VisibilityObserver`] turns raw intersection-ratio samples into boolean
//! visibility transitions for each tracked region. Samples arrive from an
//! [`IntersectionHost`] at whatever rate the platform delivers them; the
//! observer keeps only the latest sample per region and evaluates it at most
//! once per frame in [`flush`](VisibilityObserver::flush).
//!
//! A region is visible when its ratio is non-zero and at least its
//! threshold. Both directions are reported, so a region re-triggers every
//! time the user scrolls it back into view. A transition is only emitted
//! when the boolean actually changes.
//!
//! Regions are addressed by generational [`RegionId`] handles; a handle kept
//! past [`unobserve`](VisibilityObserver::unobserve) is ignored instead of
//! aliasing whichever region reuses the slot.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::frame::{FrameGate, FrameTick};
use crate::host::IntersectionHost;

/// A handle to a region tracked by a [`VisibilityObserver`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId {
    idx: u32,
    generation: u32,
}

impl RegionId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionId({}@gen{})", self.idx, self.generation)
    }
}

/// Observation parameters for a region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionOptions {
    /// Intersection ratio in `[0, 1]` at which the region flips.
    pub threshold: f64,
    /// Pixels added to every side of the viewport before testing.
    pub margin: f64,
}

impl RegionOptions {
    /// Content sections: visible once a tenth of the section is on screen.
    #[must_use]
    pub const fn section() -> Self {
        Self {
            threshold: 0.1,
            margin: 0.0,
        }
    }

    /// Triggers slightly before the region scrolls into view: a tenth of it
    /// inside a viewport grown by 100 px.
    #[must_use]
    pub const fn eager() -> Self {
        Self {
            threshold: 0.1,
            margin: 100.0,
        }
    }

    /// Returns a copy with the threshold clamped into `[0, 1]` (NaN becomes
    /// zero) and a non-finite margin replaced by zero.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let threshold = if self.threshold.is_nan() {
            0.0
        } else {
            self.threshold.clamp(0.0, 1.0)
        };
        let margin = if self.margin.is_finite() {
            self.margin
        } else {
            0.0
        };
        Self { threshold, margin }
    }
}

impl Default for RegionOptions {
    fn default() -> Self {
        Self::section()
    }
}

/// The tracked state of one region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityRegion {
    options: RegionOptions,
    is_visible: bool,
}

impl VisibilityRegion {
    /// Returns the observation options.
    #[must_use]
    pub fn options(&self) -> RegionOptions {
        self.options
    }

    /// Returns the last reported visibility.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    fn crosses(&self, ratio: f64) -> bool {
        ratio > 0.0 && ratio >= self.options.threshold
    }
}

/// A visibility transition for one region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisibilityChange {
    /// The region that changed.
    pub region: RegionId,
    /// Its new visibility.
    pub is_visible: bool,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    region: Option<VisibilityRegion>,
    samples: FrameGate<f64>,
}

/// Tracks visibility for a set of regions.
#[derive(Debug, Default)]
pub struct VisibilityObserver {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
}

impl VisibilityObserver {
    /// Creates an observer with no regions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `target` and returns its region handle.
    ///
    /// The region starts hidden.
    pub fn observe<H: IntersectionHost>(
        &mut self,
        host: &mut H,
        target: &H::Target,
        options: RegionOptions,
    ) -> RegionId {
        let options = options.sanitized();
        let region = VisibilityRegion {
            options,
            is_visible: false,
        };
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.region = Some(region);
            slot.samples.clear();
            RegionId {
                idx,
                generation: slot.generation,
            }
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "region count stays far below u32::MAX"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                region: Some(region),
                samples: FrameGate::new(),
            });
            RegionId { idx, generation: 0 }
        };
        host.observe(id, target, options);
        id
    }

    /// Stops tracking `region` and tells the host to unsubscribe.
    ///
    /// Returns `false` if the handle is stale.
    pub fn unobserve<H: IntersectionHost>(&mut self, host: &mut H, region: RegionId) -> bool {
        let Some(slot) = self.live_slot_mut(region) else {
            return false;
        };
        slot.region = None;
        slot.samples.clear();
        // Bump generation so old handles immediately fail validation.
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(region.idx);
        host.unobserve(region);
        true
    }

    /// Records an intersection-ratio sample for `region`.
    ///
    /// Returns `true` when the caller should request a frame. Samples for
    /// stale handles are ignored.
    pub fn report_ratio(&mut self, region: RegionId, ratio: f64) -> bool {
        let ratio = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        };
        match self.live_slot_mut(region) {
            Some(slot) => slot.samples.offer(ratio),
            None => false,
        }
    }

    /// Records a sample computed from the element and viewport rectangles.
    pub fn report_rects(&mut self, region: RegionId, element: Rect, viewport: Rect) -> bool {
        let Some(margin) = self.region(region).map(|r| r.options.margin) else {
            return false;
        };
        self.report_ratio(region, intersection_ratio(element, viewport, margin))
    }

    /// Evaluates pending samples for this frame and appends every visibility
    /// transition to `out`, in region slot order.
    pub fn flush(&mut self, tick: &FrameTick, out: &mut Vec<VisibilityChange>) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            let Some(region) = slot.region.as_mut() else {
                continue;
            };
            let Some(ratio) = slot.samples.take(tick) else {
                continue;
            };
            let visible = region.crosses(ratio);
            if visible != region.is_visible {
                region.is_visible = visible;
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "slot indices were created from u32"
                )]
                let idx = idx as u32;
                out.push(VisibilityChange {
                    region: RegionId {
                        idx,
                        generation: slot.generation,
                    },
                    is_visible: visible,
                });
            }
        }
    }

    /// Returns `true` if any region has a sample waiting for a frame.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.slots.iter().any(|s| s.samples.is_pending())
    }

    /// Returns the tracked state for `region`, if the handle is live.
    #[must_use]
    pub fn region(&self, region: RegionId) -> Option<&VisibilityRegion> {
        let slot = self.slots.get(region.idx as usize)?;
        if slot.generation != region.generation {
            return None;
        }
        slot.region.as_ref()
    }

    /// Returns the last reported visibility of `region` (`false` for stale
    /// handles).
    #[must_use]
    pub fn is_visible(&self, region: RegionId) -> bool {
        self.region(region).is_some_and(VisibilityRegion::is_visible)
    }

    /// Returns the number of live regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Returns `true` if no region is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live_slot_mut(&mut self, region: RegionId) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(region.idx as usize)?;
        if slot.generation != region.generation || slot.region.is_none() {
            return None;
        }
        Some(slot)
    }
}

/// Fraction of `element`'s area inside `viewport` expanded by `margin` on
/// every side.
///
/// A zero-area element counts as fully visible when it lies inside the
/// expanded viewport.
#[must_use]
pub fn intersection_ratio(element: Rect, viewport: Rect, margin: f64) -> f64 {
    let root = viewport.inflate(margin, margin);
    let element_area = element.area();
    if element_area <= 0.0 {
        let inside = element.x0 >= root.x0
            && element.x1 <= root.x1
            && element.y0 >= root.y0
            && element.y1 <= root.y1;
        return if inside { 1.0 } else { 0.0 };
    }
    let overlap = element.intersect(root);
    (overlap.area() / element_area).clamp(0.0, 1.0)
}

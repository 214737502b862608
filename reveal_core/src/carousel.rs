// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary-aware horizontal carousel navigation.
//!
//! [`CarouselGeometry::recompute`] derives the navigation flags from the
//! container's scroll geometry. [`CarouselController`] keeps the flags in
//! sync with a [`ScrollHost`] and pages the container one viewport at a
//! time.
//!
//! The geometry must be recomputed after every scroll event *and* after
//! every change to the item set (a category filter changes the scroll
//! extent without scrolling); skipping the latter leaves stale flags behind.

use crate::host::ScrollHost;

/// Slack at the far end so sub-pixel rounding at the physical scroll limit
/// does not flicker the "next" button.
pub const SCROLL_END_SLACK: f64 = 10.0;

/// Scroll geometry and derived navigation flags.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselGeometry {
    /// Current scroll offset.
    pub scroll_position: f64,
    /// Total scrollable extent.
    pub scroll_extent: f64,
    /// Visible extent.
    pub viewport_extent: f64,
    /// A previous page exists.
    pub can_scroll_prev: bool,
    /// A next page exists.
    pub can_scroll_next: bool,
}

impl CarouselGeometry {
    /// Geometry of a container with nothing to scroll.
    pub const EMPTY: Self = Self {
        scroll_position: 0.0,
        scroll_extent: 0.0,
        viewport_extent: 0.0,
        can_scroll_prev: false,
        can_scroll_next: false,
    };

    /// Derives the navigation flags. Non-finite inputs are treated as zero.
    #[must_use]
    pub fn recompute(scroll_position: f64, scroll_extent: f64, viewport_extent: f64) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        let scroll_position = finite(scroll_position);
        let scroll_extent = finite(scroll_extent);
        let viewport_extent = finite(viewport_extent);
        Self {
            scroll_position,
            scroll_extent,
            viewport_extent,
            can_scroll_prev: scroll_position > 0.0,
            can_scroll_next: scroll_position + viewport_extent < scroll_extent - SCROLL_END_SLACK,
        }
    }

    /// Returns `true` if navigation in `direction` is possible.
    #[must_use]
    pub fn can_scroll(&self, direction: Direction) -> bool {
        match direction {
            Direction::Prev => self.can_scroll_prev,
            Direction::Next => self.can_scroll_next,
        }
    }
}

impl Default for CarouselGeometry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Paging direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the start.
    Prev,
    /// Toward the end.
    Next,
}

/// What triggered a geometry recompute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecomputeCause {
    /// A container was attached.
    Attach,
    /// The container scrolled.
    Scroll,
    /// The item set changed.
    ItemsChanged,
    /// The container was resized.
    Resize,
}

/// A smooth-scroll command issued to the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageScroll {
    /// Requested direction.
    pub direction: Direction,
    /// Signed scroll delta.
    pub delta: f64,
}

/// Keeps a scroll container's navigation flags current and pages it.
///
/// The controller is the only writer of its container's scroll position.
/// Without an attached container every operation is a no-op.
#[derive(Debug)]
pub struct CarouselController<H> {
    host: Option<H>,
    geometry: CarouselGeometry,
}

impl<H> Default for CarouselController<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> CarouselController<H> {
    /// Creates a controller with no container.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            host: None,
            geometry: CarouselGeometry::EMPTY,
        }
    }

    /// The last computed geometry.
    #[must_use]
    pub fn geometry(&self) -> CarouselGeometry {
        self.geometry
    }

    /// Releases the container. Flags fall back to [`CarouselGeometry::EMPTY`].
    pub fn detach(&mut self) -> Option<H> {
        self.geometry = CarouselGeometry::EMPTY;
        self.host.take()
    }

    /// Returns `true` while a container is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }
}

impl<H: ScrollHost> CarouselController<H> {
    /// Binds the controller to `host` and computes the initial geometry.
    pub fn attach(&mut self, host: H) -> CarouselGeometry {
        self.host = Some(host);
        self.recompute().unwrap_or(CarouselGeometry::EMPTY)
    }

    /// Handles a native scroll event.
    pub fn on_scroll(&mut self) -> Option<CarouselGeometry> {
        self.recompute()
    }

    /// Handles a change to the item set (filtering, insertion, removal).
    pub fn on_items_changed(&mut self) -> Option<CarouselGeometry> {
        self.recompute()
    }

    /// Handles a container resize.
    pub fn on_resize(&mut self) -> Option<CarouselGeometry> {
        self.recompute()
    }

    /// Scrolls one full viewport in `direction`.
    ///
    /// Returns `None` (and issues nothing) when no container is attached or
    /// the matching flag is false.
    pub fn page_scroll(&mut self, direction: Direction) -> Option<PageScroll> {
        let geometry = self.recompute()?;
        if !geometry.can_scroll(direction) {
            return None;
        }
        let page = geometry.viewport_extent;
        let delta = match direction {
            Direction::Prev => -page,
            Direction::Next => page,
        };
        self.host.as_mut()?.scroll_by_smooth(delta);
        Some(PageScroll { direction, delta })
    }

    fn recompute(&mut self) -> Option<CarouselGeometry> {
        let host = self.host.as_ref()?;
        self.geometry = CarouselGeometry::recompute(
            host.scroll_offset(),
            host.scroll_extent(),
            host.viewport_extent(),
        );
        Some(self.geometry)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    /// A container whose smooth scroll lands immediately.
    #[derive(Debug)]
    struct FakeContainer {
        offset: f64,
        extent: f64,
        viewport: f64,
        commands: Vec<f64>,
    }

    impl FakeContainer {
        fn new(extent: f64, viewport: f64) -> Self {
            Self {
                offset: 0.0,
                extent,
                viewport,
                commands: Vec::new(),
            }
        }
    }

    impl ScrollHost for FakeContainer {
        fn scroll_offset(&self) -> f64 {
            self.offset
        }

        fn scroll_extent(&self) -> f64 {
            self.extent
        }

        fn viewport_extent(&self) -> f64 {
            self.viewport
        }

        fn scroll_by_smooth(&mut self, delta: f64) {
            self.commands.push(delta);
            let max = (self.extent - self.viewport).max(0.0);
            self.offset = (self.offset + delta).clamp(0.0, max);
        }
    }

    #[test]
    fn flags_at_start_middle_and_end() {
        let start = CarouselGeometry::recompute(0.0, 1200.0, 350.0);
        assert!(!start.can_scroll_prev);
        assert!(start.can_scroll_next);

        let middle = CarouselGeometry::recompute(350.0, 1200.0, 350.0);
        assert!(middle.can_scroll_prev);
        assert!(middle.can_scroll_next, "350 + 350 < 1190");

        let end = CarouselGeometry::recompute(850.0, 1200.0, 350.0);
        assert!(end.can_scroll_prev);
        assert!(!end.can_scroll_next, "850 + 350 >= 1190");
    }

    #[test]
    fn slack_absorbs_rounding_near_the_end() {
        let near_end = CarouselGeometry::recompute(841.0, 1200.0, 350.0);
        assert!(!near_end.can_scroll_next, "841 + 350 = 1191 is within slack");
        let before = CarouselGeometry::recompute(839.0, 1200.0, 350.0);
        assert!(before.can_scroll_next);
    }

    #[test]
    fn non_finite_geometry_is_inert() {
        let g = CarouselGeometry::recompute(f64::NAN, f64::INFINITY, 350.0);
        assert!(!g.can_scroll_prev);
        assert!(!g.can_scroll_next);
    }

    #[test]
    fn paging_moves_one_viewport_and_updates_flags() {
        let mut carousel = CarouselController::new();
        let g = carousel.attach(FakeContainer::new(1200.0, 350.0));
        assert!(!g.can_scroll_prev && g.can_scroll_next);

        assert_eq!(carousel.page_scroll(Direction::Prev), None, "nothing before start");

        let cmd = carousel.page_scroll(Direction::Next).unwrap();
        assert_eq!(cmd.delta, 350.0);
        let g = carousel.on_scroll().unwrap();
        assert_eq!(g.scroll_position, 350.0);
        assert!(g.can_scroll_prev && g.can_scroll_next);

        carousel.page_scroll(Direction::Next);
        let g = carousel.on_scroll().unwrap();
        assert_eq!(g.scroll_position, 700.0);
        assert!(g.can_scroll_next, "700 + 350 < 1190");

        carousel.page_scroll(Direction::Next);
        let g = carousel.on_scroll().unwrap();
        assert_eq!(g.scroll_position, 850.0, "clamped at the physical end");
        assert!(!g.can_scroll_next);
        assert_eq!(carousel.page_scroll(Direction::Next), None);

        let cmd = carousel.page_scroll(Direction::Prev).unwrap();
        assert_eq!(cmd.delta, -350.0);

        let host = carousel.detach().unwrap();
        assert_eq!(host.commands, vec![350.0, 350.0, 350.0, -350.0]);
    }

    #[test]
    fn filtering_recomputes_immediately() {
        let mut carousel = CarouselController::new();
        carousel.attach(FakeContainer::new(1200.0, 350.0));
        assert!(carousel.geometry().can_scroll_next);

        // A category filter shrinks the content below the viewport.
        if let Some(host) = carousel.host.as_mut() {
            host.extent = 300.0;
        }
        let g = carousel.on_items_changed().unwrap();
        assert!(!g.can_scroll_prev);
        assert!(!g.can_scroll_next);

        // And widening it again re-enables "next" without any scroll event.
        if let Some(host) = carousel.host.as_mut() {
            host.extent = 2000.0;
        }
        assert!(carousel.on_items_changed().unwrap().can_scroll_next);
    }

    #[test]
    fn detached_controller_is_a_no_op() {
        let mut carousel: CarouselController<FakeContainer> = CarouselController::new();
        assert_eq!(carousel.on_scroll(), None);
        assert_eq!(carousel.on_items_changed(), None);
        assert_eq!(carousel.page_scroll(Direction::Next), None);

        carousel.attach(FakeContainer::new(1200.0, 350.0));
        assert!(carousel.detach().is_some());
        assert_eq!(carousel.geometry(), CarouselGeometry::EMPTY);
        assert_eq!(carousel.page_scroll(Direction::Next), None);
    }
}

// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal scroll container host.

use web_sys::{Element, ScrollBehavior, ScrollToOptions};

use reveal_core::host::ScrollHost;

/// Browser [`ScrollHost`] for an element with `overflow-x: auto`.
#[derive(Debug, Clone)]
pub struct DomScrollHost {
    element: Element,
}

impl DomScrollHost {
    /// Wraps a scroll container.
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// The wrapped container.
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl ScrollHost for DomScrollHost {
    fn scroll_offset(&self) -> f64 {
        f64::from(self.element.scroll_left())
    }

    fn scroll_extent(&self) -> f64 {
        f64::from(self.element.scroll_width())
    }

    fn viewport_extent(&self) -> f64 {
        f64::from(self.element.client_width())
    }

    fn scroll_by_smooth(&mut self, delta: f64) {
        let options = ScrollToOptions::new();
        options.set_left(delta);
        options.set_behavior(ScrollBehavior::Smooth);
        self.element.scroll_by_with_scroll_to_options(&options);
    }
}

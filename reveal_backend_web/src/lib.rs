// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for reveal.
//!
//! This crate provides browser implementations of the core host traits:
//!
//! - [`DomIntersectionHost`]: `IntersectionObserver`-backed visibility
//! - [`DomScrollHost`]: scroll-container geometry and smooth paging
//! - [`DomMediaHost`]: `HTMLMediaElement` playback with promise-based start
//! - [`RafLoop`]: on-demand `requestAnimationFrame` frame source
//! - [`apply_style`]: writes sampled styles to elements
//! - [`Listener`]: event subscriptions removed on drop

#![no_std]

extern crate alloc;

mod intersection;
mod listener;
mod media;
mod raf;
mod scroll;
mod style;

pub use intersection::DomIntersectionHost;
pub use listener::Listener;
pub use media::{DomMediaHost, PlayOutcomes};
pub use raf::{FrameRequester, RafLoop};
pub use scroll::DomScrollHost;
pub use style::{apply_style, clear_style, css_transform};

use kurbo::Rect;
use reveal_core::time::HostTime;
use web_sys::Element;

/// Returns the current host time from `performance.now()`.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}

/// Returns `el`'s border box in viewport coordinates.
#[must_use]
pub fn client_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.right(), r.bottom())
}

// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-driven entrance animations, carousel navigation and media
//! scrubbing.
//!
//! `reveal_core` holds the state machines behind an interactive promotional
//! page: sections that animate in when scrolled into view, horizontally
//! scrolling carousels with boundary-aware navigation, and a custom media
//! scrubber. It is `no_std` compatible (with `alloc`) and owns no platform
//! resources; everything platform-specific sits behind the [`host`] traits.
//!
//! # Architecture
//!
//! All work is driven by host events, and high-frequency sources are folded
//! into the frame loop:
//!
//! ```text
//!   IntersectionHost ──ratio──► VisibilityObserver ─┐
//!                                                   │ flush(&FrameTick)
//!   FrameTick (rAF) ────────────────────────────────┤
//!                                                   ▼
//!                          VisibilityChange ──► AnimationController
//!                                                   │
//!                                        ScopeTransition (epoch)
//!                                                   ▼
//!                                   AnimationScope::child_style(i, now)
//!
//!   ScrollHost ◄──page_scroll── CarouselController ◄── scroll / items changed
//!   MediaHost  ◄──seek / play── ScrubberController ◄── pointer / timeupdate
//! ```
//!
//! **[`visibility`]**: Generational region handles, threshold/margin
//! options and the per-region boolean visibility signal.
//!
//! **[`animation`]**: `Hidden`/`Visible` scopes with an epoch counter and
//! stagger timing.
//!
//! **[`variant`]**: The closed registry of entrance variants
//! (`FadeInUp`, `ScaleIn`, `StaggerChildren`, custom springs).
//!
//! **[`easing`]**: Cubic-bezier curves and analytic spring physics.
//!
//! **[`carousel`]**: Navigation flags with end-of-scroll slack and paging.
//!
//! **[`scrubber`]**: Progress, pointer seeks, drag-seek and asynchronous
//! playback start.
//!
//! **[`pointer`]**: Component-scoped pointer tracking.
//!
//! **[`scroll_progress`]**: Scroll-linked progress for parallax layers.
//!
//! **[`frame`]**: Frame ticks and the at-most-once-per-frame
//! [`FrameGate`](frame::FrameGate).
//!
//! **[`time`]**: Microsecond time units.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! controller outcomes, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod carousel;
pub mod easing;
pub mod frame;
pub mod host;
pub mod pointer;
pub mod scroll_progress;
pub mod scrubber;
pub mod time;
pub mod trace;
pub mod variant;
pub mod visibility;

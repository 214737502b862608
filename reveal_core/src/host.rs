// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability contracts consumed from the host environment.
//!
//! Reveal splits platform work into *host* implementations. The core never
//! owns the nodes it observes: a host holds whatever handle the platform
//! uses (a DOM element reference, a widget id) and the view layer decides
//! when those nodes go away, signalling teardown with an explicit
//! unobserve/detach call.
//!
//! - **Viewport intersection**: [`IntersectionHost`] starts and stops
//!   observation of a target. Ratio samples flow back asynchronously through
//!   [`VisibilityObserver::report_ratio`].
//! - **Scrollable container**: [`ScrollHost`] exposes scroll geometry and a
//!   smooth relative scroll.
//! - **Playable media**: [`MediaHost`] exposes the play head and issues
//!   playback commands. Starting playback is asynchronous: the host reports
//!   the outcome later through [`ScrubberController::on_play_settled`] with
//!   the [`PlayTicket`] it was given.
//!
//! Host methods never fail. A host whose underlying resource has gone away
//! treats every command as a no-op.
//!
//! [`VisibilityObserver::report_ratio`]: crate::visibility::VisibilityObserver::report_ratio
//! [`ScrubberController::on_play_settled`]: crate::scrubber::ScrubberController::on_play_settled

use core::fmt;

use crate::visibility::{RegionId, RegionOptions};

/// Starts and stops viewport-intersection observation for targets.
pub trait IntersectionHost {
    /// Platform handle for an observed node.
    type Target;

    /// Begins reporting intersection ratios for `target` under `region`.
    ///
    /// The host must report a sample whenever the ratio crosses
    /// `options.threshold` in either direction, and may report more often.
    fn observe(&mut self, region: RegionId, target: &Self::Target, options: RegionOptions);

    /// Stops reporting for `region`. Unknown regions are ignored.
    fn unobserve(&mut self, region: RegionId);
}

/// A horizontally scrollable container.
pub trait ScrollHost {
    /// Current scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Total scrollable extent (content width).
    fn scroll_extent(&self) -> f64;

    /// Visible extent (container width).
    fn viewport_extent(&self) -> f64;

    /// Scrolls smoothly by `delta` relative to the current offset.
    fn scroll_by_smooth(&mut self, delta: f64);
}

/// A playable media resource.
pub trait MediaHost {
    /// Current play position in seconds.
    fn current_time(&self) -> f64;

    /// Total duration in seconds, or `None` while unknown.
    ///
    /// Implementations may return non-finite values; callers normalize them.
    fn duration(&self) -> Option<f64>;

    /// Returns `true` if the resource is paused.
    fn is_paused(&self) -> bool;

    /// Returns `true` if the resource is muted.
    fn is_muted(&self) -> bool;

    /// Requests playback start. The outcome is reported asynchronously with
    /// `ticket`.
    fn request_play(&mut self, ticket: PlayTicket);

    /// Pauses playback.
    fn pause(&mut self);

    /// Sets the play position in seconds.
    fn set_current_time(&mut self, secs: f64);

    /// Sets the muted flag.
    fn set_muted(&mut self, muted: bool);
}

/// Identifies one playback-start request.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayTicket(pub u64);

impl fmt::Debug for PlayTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayTicket({})", self.0)
    }
}

/// The host refused to start playback (for example an autoplay policy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayRejected;

impl fmt::Display for PlayRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("playback start was rejected by the host")
    }
}

impl core::error::Error for PlayRejected {}

// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame ticks and at-most-once-per-frame gating.
//!
//! High-frequency sources (intersection callbacks under fast scrolling,
//! pointer moves during a drag-seek, mouse moves for background-following
//! effects) can fire many times between two rendered frames. Each of them
//! goes through a [`FrameGate`]:
//!
//! ```text
//!   event ──► FrameGate::offer(sample)   (latest sample wins)
//!                  │
//!   FrameTick ──► FrameGate::take(&tick) (at most one sample per frame)
//! ```
//!
//! Intermediate samples are dropped. The most recent sample before a frame
//! boundary is always delivered at that frame.

use crate::time::HostTime;

/// A frame opportunity delivered by the host's frame source (for example
/// `requestAnimationFrame`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time when the frame callback fired.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}

/// A latest-sample-wins slot that releases at most one sample per frame.
#[derive(Clone, Debug)]
pub struct FrameGate<T> {
    pending: Option<T>,
    last_frame: Option<u64>,
}

impl<T> Default for FrameGate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameGate<T> {
    /// Creates an empty gate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            last_frame: None,
        }
    }

    /// Stores `sample`, replacing any sample not yet released.
    ///
    /// Returns `true` when the gate went from empty to pending, i.e. when the
    /// caller should request a frame.
    pub fn offer(&mut self, sample: T) -> bool {
        self.pending.replace(sample).is_none()
    }

    /// Releases the pending sample for `tick`.
    ///
    /// Returns `None` if nothing is pending or a sample was already released
    /// for this frame; in the latter case the sample stays pending for the
    /// next frame.
    pub fn take(&mut self, tick: &FrameTick) -> Option<T> {
        if self.last_frame == Some(tick.frame_index) {
            return None;
        }
        let sample = self.pending.take()?;
        self.last_frame = Some(tick.frame_index);
        Some(sample)
    }

    /// Releases the pending sample immediately, bypassing the per-frame
    /// limit.
    ///
    /// Used when an interaction ends and its final sample must not wait for
    /// the next frame.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drops any pending sample.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Returns `true` if a sample is waiting for the next frame.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

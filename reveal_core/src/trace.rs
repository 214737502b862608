// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for controller outcomes.
//!
//! Controllers never log. Each state-changing operation returns an outcome
//! value; the frame-loop caller stamps it with the current [`HostTime`] and
//! forwards it through a [`Tracer`] to a [`TraceSink`]. All sink methods
//! default to no-ops, so implementing only the events you care about is
//! fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::animation::{ScopeState, ScopeTransition};
use crate::carousel::{CarouselGeometry, Direction, PageScroll, RecomputeCause};
use crate::frame::FrameTick;
use crate::scrubber::{PlaybackChange, Seek, SeekSource};
use crate::time::HostTime;
use crate::visibility::{RegionId, VisibilityChange};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the frame source delivers a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Host time when the tick fired.
    pub now: HostTime,
}

impl From<&FrameTick> for FrameEvent {
    fn from(tick: &FrameTick) -> Self {
        Self {
            frame_index: tick.frame_index,
            now: tick.now,
        }
    }
}

/// Emitted when a region's visibility flips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityEvent {
    /// When the change was applied.
    pub at: HostTime,
    /// Which region.
    pub region: RegionId,
    /// New visibility.
    pub is_visible: bool,
}

impl VisibilityEvent {
    /// Stamps a [`VisibilityChange`] with `at`.
    #[must_use]
    pub fn new(change: &VisibilityChange, at: HostTime) -> Self {
        Self {
            at,
            region: change.region,
            is_visible: change.is_visible,
        }
    }
}

/// Emitted when an animation scope changes state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScopeTransitionEvent {
    /// When the transition was applied.
    pub at: HostTime,
    /// Region the scope is mounted on.
    pub region: RegionId,
    /// New state.
    pub state: ScopeState,
    /// Epoch after the transition.
    pub epoch: u64,
}

impl ScopeTransitionEvent {
    /// Stamps a [`ScopeTransition`] of the scope on `region` with `at`.
    #[must_use]
    pub fn new(region: RegionId, transition: &ScopeTransition, at: HostTime) -> Self {
        Self {
            at,
            region,
            state: transition.state,
            epoch: transition.epoch,
        }
    }
}

/// Emitted after carousel flags are recomputed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselEvent {
    /// When the recompute ran.
    pub at: HostTime,
    /// What triggered it.
    pub cause: RecomputeCause,
    /// Resulting geometry.
    pub geometry: CarouselGeometry,
}

/// Emitted when the carousel pages its container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageScrollEvent {
    /// When the command was issued.
    pub at: HostTime,
    /// Paging direction.
    pub direction: Direction,
    /// Signed delta.
    pub delta: f64,
}

impl PageScrollEvent {
    /// Stamps a [`PageScroll`] with `at`.
    #[must_use]
    pub fn new(scroll: &PageScroll, at: HostTime) -> Self {
        Self {
            at,
            direction: scroll.direction,
            delta: scroll.delta,
        }
    }
}

/// Emitted when the scrubber seeks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeekEvent {
    /// When the seek was applied.
    pub at: HostTime,
    /// Target position in seconds.
    pub target_secs: f64,
    /// Click or drag.
    pub source: SeekSource,
}

impl SeekEvent {
    /// Stamps a [`Seek`] with `at`.
    #[must_use]
    pub fn new(seek: &Seek, at: HostTime) -> Self {
        Self {
            at,
            target_secs: seek.target_secs,
            source: seek.source,
        }
    }
}

/// Emitted on playback state changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackEvent {
    /// When the change was applied.
    pub at: HostTime,
    /// What changed.
    pub change: PlaybackChange,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from controller callers.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a frame tick is received.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called when a region's visibility flips.
    fn on_visibility(&mut self, e: &VisibilityEvent) {
        _ = e;
    }

    /// Called when an animation scope changes state.
    fn on_scope_transition(&mut self, e: &ScopeTransitionEvent) {
        _ = e;
    }

    /// Called after carousel flags are recomputed.
    fn on_carousel(&mut self, e: &CarouselEvent) {
        _ = e;
    }

    /// Called when the carousel pages its container.
    fn on_page_scroll(&mut self, e: &PageScrollEvent) {
        _ = e;
    }

    /// Called when the scrubber seeks.
    fn on_seek(&mut self, e: &SeekEvent) {
        _ = e;
    }

    /// Called on playback state changes.
    fn on_playback(&mut self, e: &PlaybackEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident, $e:ident) => {{
        #[cfg(feature = "trace")]
        if let Some(s) = &mut $self.sink {
            s.$method($e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = $e;
        }
    }};
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        dispatch!(self, on_frame, e);
    }

    /// Emits a [`VisibilityEvent`].
    #[inline]
    pub fn visibility(&mut self, e: &VisibilityEvent) {
        dispatch!(self, on_visibility, e);
    }

    /// Emits a [`ScopeTransitionEvent`].
    #[inline]
    pub fn scope_transition(&mut self, e: &ScopeTransitionEvent) {
        dispatch!(self, on_scope_transition, e);
    }

    /// Emits a [`CarouselEvent`].
    #[inline]
    pub fn carousel(&mut self, e: &CarouselEvent) {
        dispatch!(self, on_carousel, e);
    }

    /// Emits a [`PageScrollEvent`].
    #[inline]
    pub fn page_scroll(&mut self, e: &PageScrollEvent) {
        dispatch!(self, on_page_scroll, e);
    }

    /// Emits a [`SeekEvent`].
    #[inline]
    pub fn seek(&mut self, e: &SeekEvent) {
        dispatch!(self, on_seek, e);
    }

    /// Emits a [`PlaybackEvent`].
    #[inline]
    pub fn playback(&mut self, e: &PlaybackEvent) {
        dispatch!(self, on_playback, e);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PlayTicket;

    fn sample_tick() -> FrameTick {
        FrameTick {
            now: HostTime(1_000_000),
            frame_index: 42,
        }
    }

    #[test]
    fn frame_event_from_frame_tick() {
        let evt = FrameEvent::from(&sample_tick());
        assert_eq!(evt.frame_index, 42);
        assert_eq!(evt.now, HostTime(1_000_000));
    }

    #[test]
    fn outcome_events_carry_their_stamp() {
        let seek = Seek {
            target_secs: 60.0,
            source: SeekSource::Drag,
        };
        let evt = SeekEvent::new(&seek, HostTime(5));
        assert_eq!(evt.at, HostTime(5));
        assert_eq!(evt.target_secs, 60.0);
        assert_eq!(evt.source, SeekSource::Drag);

        let scroll = PageScroll {
            direction: Direction::Prev,
            delta: -350.0,
        };
        let evt = PageScrollEvent::new(&scroll, HostTime(9));
        assert_eq!(evt.direction, Direction::Prev);
        assert_eq!(evt.delta, -350.0);
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_frame(&FrameEvent::from(&sample_tick()));
        sink.on_playback(&PlaybackEvent {
            at: HostTime(0),
            change: PlaybackChange::PlayRequested(PlayTicket(0)),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.frame(&FrameEvent::from(&sample_tick()));
        tracer.playback(&PlaybackEvent {
            at: HostTime(0),
            change: PlaybackChange::Paused,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            frames: Vec<u64>,
            playback: Vec<PlaybackChange>,
        }
        impl TraceSink for RecordingSink {
            fn on_frame(&mut self, e: &FrameEvent) {
                self.frames.push(e.frame_index);
            }

            fn on_playback(&mut self, e: &PlaybackEvent) {
                self.playback.push(e.change);
            }
        }

        let mut sink = RecordingSink {
            frames: Vec::new(),
            playback: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame(&FrameEvent::from(&sample_tick()));
        tracer.playback(&PlaybackEvent {
            at: HostTime(1),
            change: PlaybackChange::Muted(true),
        });
        tracer.seek(&SeekEvent {
            at: HostTime(2),
            target_secs: 1.0,
            source: SeekSource::Click,
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.frames, &[42]);
        assert_eq!(sink.playback, &[PlaybackChange::Muted(true)]);
    }
}

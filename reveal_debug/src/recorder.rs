// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event, in
//! arrival order, as a [`RecordedEvent`].

use reveal_core::time::HostTime;
use reveal_core::trace::{
    CarouselEvent, FrameEvent, PageScrollEvent, PlaybackEvent, ScopeTransitionEvent, SeekEvent,
    TraceSink, VisibilityEvent,
};

/// One recorded trace event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A frame tick.
    Frame(FrameEvent),
    /// A visibility flip.
    Visibility(VisibilityEvent),
    /// An animation scope transition.
    ScopeTransition(ScopeTransitionEvent),
    /// A carousel geometry recompute.
    Carousel(CarouselEvent),
    /// A carousel page scroll.
    PageScroll(PageScrollEvent),
    /// A scrubber seek.
    Seek(SeekEvent),
    /// A playback change.
    Playback(PlaybackEvent),
}

impl RecordedEvent {
    /// Host time the event was stamped with.
    #[must_use]
    pub fn at(&self) -> HostTime {
        match self {
            Self::Frame(e) => e.now,
            Self::Visibility(e) => e.at,
            Self::ScopeTransition(e) => e.at,
            Self::Carousel(e) => e.at,
            Self::PageScroll(e) => e.at,
            Self::Seek(e) => e.at,
            Self::Playback(e) => e.at,
        }
    }
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drops all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecorderSink {
    fn on_frame(&mut self, e: &FrameEvent) {
        self.events.push(RecordedEvent::Frame(*e));
    }

    fn on_visibility(&mut self, e: &VisibilityEvent) {
        self.events.push(RecordedEvent::Visibility(*e));
    }

    fn on_scope_transition(&mut self, e: &ScopeTransitionEvent) {
        self.events.push(RecordedEvent::ScopeTransition(*e));
    }

    fn on_carousel(&mut self, e: &CarouselEvent) {
        self.events.push(RecordedEvent::Carousel(*e));
    }

    fn on_page_scroll(&mut self, e: &PageScrollEvent) {
        self.events.push(RecordedEvent::PageScroll(*e));
    }

    fn on_seek(&mut self, e: &SeekEvent) {
        self.events.push(RecordedEvent::Seek(*e));
    }

    fn on_playback(&mut self, e: &PlaybackEvent) {
        self.events.push(RecordedEvent::Playback(*e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reveal_core::carousel::{CarouselGeometry, Direction, RecomputeCause};
    use reveal_core::host::PlayTicket;
    use reveal_core::scrubber::{PlaybackChange, SeekSource};

    #[test]
    fn events_are_kept_in_arrival_order() {
        let mut rec = RecorderSink::new();
        rec.on_frame(&FrameEvent {
            frame_index: 0,
            now: HostTime(100),
        });
        rec.on_carousel(&CarouselEvent {
            at: HostTime(200),
            cause: RecomputeCause::Attach,
            geometry: CarouselGeometry::recompute(0.0, 1200.0, 350.0),
        });
        rec.on_page_scroll(&PageScrollEvent {
            at: HostTime(300),
            direction: Direction::Next,
            delta: 350.0,
        });
        rec.on_seek(&SeekEvent {
            at: HostTime(400),
            target_secs: 12.0,
            source: SeekSource::Click,
        });
        rec.on_playback(&PlaybackEvent {
            at: HostTime(500),
            change: PlaybackChange::Rejected(PlayTicket(3)),
        });

        assert_eq!(rec.len(), 5);
        let stamps: Vec<u64> = rec.events().iter().map(|e| e.at().ticks()).collect();
        assert_eq!(stamps, [100, 200, 300, 400, 500]);
        assert!(matches!(
            rec.events()[4],
            RecordedEvent::Playback(PlaybackEvent {
                change: PlaybackChange::Rejected(PlayTicket(3)),
                ..
            })
        ));
    }

    #[test]
    fn clear_empties_the_recording() {
        let mut rec = RecorderSink::new();
        rec.on_frame(&FrameEvent {
            frame_index: 7,
            now: HostTime(0),
        });
        assert!(!rec.is_empty());
        rec.clear();
        assert!(rec.is_empty());
        assert!(rec.into_events().is_empty());
    }
}

// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds.

use std::io::Write;

use reveal_core::animation::ScopeState;
use reveal_core::carousel::{Direction, RecomputeCause};
use reveal_core::scrubber::{PlaybackChange, SeekSource, format_timestamp};
use reveal_core::time::HostTime;
use reveal_core::trace::{
    CarouselEvent, FrameEvent, PageScrollEvent, PlaybackEvent, ScopeTransitionEvent, SeekEvent,
    TraceSink, VisibilityEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.ticks() as f64 / 1000.0
}

fn state_name(state: ScopeState) -> &'static str {
    match state {
        ScopeState::Hidden => "hidden",
        ScopeState::Visible => "visible",
    }
}

fn cause_name(cause: RecomputeCause) -> &'static str {
    match cause {
        RecomputeCause::Attach => "attach",
        RecomputeCause::Scroll => "scroll",
        RecomputeCause::ItemsChanged => "items",
        RecomputeCause::Resize => "resize",
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Prev => "prev",
        Direction::Next => "next",
    }
}

fn flag(on: bool) -> char {
    if on { '+' } else { '-' }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame(&mut self, e: &FrameEvent) {
        let _ = writeln!(
            self.writer,
            "[frame] #{} at {:.3}ms",
            e.frame_index,
            ms(e.now),
        );
    }

    fn on_visibility(&mut self, e: &VisibilityEvent) {
        let _ = writeln!(
            self.writer,
            "[visibility] {:?} {} at {:.3}ms",
            e.region,
            if e.is_visible { "in" } else { "out" },
            ms(e.at),
        );
    }

    fn on_scope_transition(&mut self, e: &ScopeTransitionEvent) {
        let _ = writeln!(
            self.writer,
            "[scope] {:?} -> {} epoch={} at {:.3}ms",
            e.region,
            state_name(e.state),
            e.epoch,
            ms(e.at),
        );
    }

    fn on_carousel(&mut self, e: &CarouselEvent) {
        let g = &e.geometry;
        let _ = writeln!(
            self.writer,
            "[carousel:{}] pos={:.1} extent={:.1} view={:.1} prev{} next{}",
            cause_name(e.cause),
            g.scroll_position,
            g.scroll_extent,
            g.viewport_extent,
            flag(g.can_scroll_prev),
            flag(g.can_scroll_next),
        );
    }

    fn on_page_scroll(&mut self, e: &PageScrollEvent) {
        let _ = writeln!(
            self.writer,
            "[carousel:page] {} by {:+.1} at {:.3}ms",
            direction_name(e.direction),
            e.delta,
            ms(e.at),
        );
    }

    fn on_seek(&mut self, e: &SeekEvent) {
        let source = match e.source {
            SeekSource::Click => "click",
            SeekSource::Drag => "drag",
        };
        let _ = writeln!(
            self.writer,
            "[seek:{source}] to {} ({:.3}s) at {:.3}ms",
            format_timestamp(e.target_secs),
            e.target_secs,
            ms(e.at),
        );
    }

    fn on_playback(&mut self, e: &PlaybackEvent) {
        let what = match e.change {
            PlaybackChange::PlayRequested(t) => format!("play requested {t:?}"),
            PlaybackChange::Started(t) => format!("started {t:?}"),
            PlaybackChange::Rejected(t) => format!("REJECTED {t:?}"),
            PlaybackChange::Paused => "paused".to_owned(),
            PlaybackChange::Resumed => "resumed by the media".to_owned(),
            PlaybackChange::Muted(m) => format!("muted={m}"),
        };
        let _ = writeln!(self.writer, "[playback] {what} at {:.3}ms", ms(e.at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reveal_core::carousel::CarouselGeometry;
    use reveal_core::host::PlayTicket;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_writer()).unwrap()
    }

    #[test]
    fn pretty_print_frame() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_frame(&FrameEvent {
            frame_index: 1,
            now: HostTime(16_667),
        });
        let out = output(sink);
        assert!(out.contains("[frame] #1"), "got: {out}");
        assert!(out.contains("16.667ms"), "got: {out}");
    }

    #[test]
    fn pretty_print_carousel_flags() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_carousel(&CarouselEvent {
            at: HostTime(0),
            cause: RecomputeCause::ItemsChanged,
            geometry: CarouselGeometry::recompute(0.0, 1200.0, 350.0),
        });
        let out = output(sink);
        assert!(out.starts_with("[carousel:items]"), "got: {out}");
        assert!(out.contains("prev- next+"), "got: {out}");
    }

    #[test]
    fn pretty_print_seek_and_rejection() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_seek(&SeekEvent {
            at: HostTime(0),
            target_secs: 60.0,
            source: SeekSource::Drag,
        });
        sink.on_playback(&PlaybackEvent {
            at: HostTime(0),
            change: PlaybackChange::Rejected(PlayTicket(2)),
        });
        let out = output(sink);
        assert!(out.contains("[seek:drag] to 1:00"), "got: {out}");
        assert!(out.contains("REJECTED PlayTicket(2)"), "got: {out}");
    }
}

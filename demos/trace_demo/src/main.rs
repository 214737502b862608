// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated page session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Scrolls a synthetic page down past three animated sections and back up,
//! pages a carousel, filters its items, and drives a media scrubber through
//! a rejected start, a successful start, click and drag seeks, and mute.
//! Every outcome goes to both a
//! [`PrettyPrintSink`](reveal_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](reveal_debug::recorder::RecorderSink), and the recording
//! is exported as a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use kurbo::Rect;

use reveal_core::animation::{AnimationController, AnimationScope, Replay, ScopeTransition};
use reveal_core::carousel::{CarouselController, Direction, RecomputeCause};
use reveal_core::frame::FrameTick;
use reveal_core::host::{IntersectionHost, MediaHost, PlayRejected, PlayTicket, ScrollHost};
use reveal_core::scrubber::{PlaybackChange, ScrubberController, Track, format_timestamp};
use reveal_core::time::HostTime;
use reveal_core::trace::{
    CarouselEvent, FrameEvent, PageScrollEvent, PlaybackEvent, ScopeTransitionEvent, SeekEvent,
    TraceSink, Tracer, VisibilityEvent,
};
use reveal_core::variant::{VariantName, VariantRegistry};
use reveal_core::visibility::{RegionId, RegionOptions, VisibilityChange, VisibilityObserver};

use reveal_debug::pretty::PrettyPrintSink;
use reveal_debug::recorder::RecorderSink;

const FRAME_COUNT: u64 = 90;
/// ≈60 Hz in microsecond ticks.
const FRAME_INTERVAL_US: u64 = 16_667;
const VIEWPORT_HEIGHT: f64 = 800.0;
const TRACK: Track = Track {
    left: 40.0,
    width: 800.0,
};

// -- simulated hosts -------------------------------------------------------

/// Sections are laid out statically; the page reports ratios itself.
#[derive(Debug, Default)]
struct SimIntersection {
    observed: Vec<RegionId>,
}

impl IntersectionHost for SimIntersection {
    type Target = Rect;

    fn observe(&mut self, region: RegionId, _: &Rect, _: RegionOptions) {
        self.observed.push(region);
    }

    fn unobserve(&mut self, region: RegionId) {
        self.observed.retain(|r| *r != region);
    }
}

/// A carousel whose smooth scroll lands instantly.
#[derive(Debug)]
struct SimScroller {
    offset: f64,
    extent: f64,
    viewport: f64,
}

impl ScrollHost for SimScroller {
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
        let max = (self.extent - self.viewport).max(0.0);
        self.offset = (self.offset + delta).clamp(0.0, max);
    }
}

/// A video whose start requests are answered later by the script.
#[derive(Debug, Default)]
struct SimVideo {
    current: f64,
    muted: bool,
}

impl MediaHost for SimVideo {
    fn current_time(&self) -> f64 {
        self.current
    }

    fn duration(&self) -> Option<f64> {
        Some(120.0)
    }

    fn is_paused(&self) -> bool {
        true
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn request_play(&mut self, _: PlayTicket) {}

    fn pause(&mut self) {}

    fn set_current_time(&mut self, secs: f64) {
        self.current = secs;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

// -- fan-out sink ----------------------------------------------------------

struct Tee<'a> {
    pretty: &'a mut PrettyPrintSink,
    recorder: &'a mut RecorderSink,
}

impl TraceSink for Tee<'_> {
    fn on_frame(&mut self, e: &FrameEvent) {
        self.pretty.on_frame(e);
        self.recorder.on_frame(e);
    }

    fn on_visibility(&mut self, e: &VisibilityEvent) {
        self.pretty.on_visibility(e);
        self.recorder.on_visibility(e);
    }

    fn on_scope_transition(&mut self, e: &ScopeTransitionEvent) {
        self.pretty.on_scope_transition(e);
        self.recorder.on_scope_transition(e);
    }

    fn on_carousel(&mut self, e: &CarouselEvent) {
        self.pretty.on_carousel(e);
        self.recorder.on_carousel(e);
    }

    fn on_page_scroll(&mut self, e: &PageScrollEvent) {
        self.pretty.on_page_scroll(e);
        self.recorder.on_page_scroll(e);
    }

    fn on_seek(&mut self, e: &SeekEvent) {
        self.pretty.on_seek(e);
        self.recorder.on_seek(e);
    }

    fn on_playback(&mut self, e: &PlaybackEvent) {
        self.pretty.on_playback(e);
        self.recorder.on_playback(e);
    }
}

/// Page scroll offset: down at 30 px/frame for 60 frames, then back up.
fn page_offset(frame_index: u64) -> f64 {
    let f = frame_index as f64;
    if frame_index <= 60 { f * 30.0 } else { 1800.0 - (f - 60.0) * 60.0 }
}

fn main() {
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    let registry = VariantRegistry::standard();
    registry.validate().expect("standard catalog is valid");

    // -- page sections ------------------------------------------------------
    let mut intersection = SimIntersection::default();
    let mut observer = VisibilityObserver::new();
    let mut animations = AnimationController::new();
    let sections = [
        ("hero", Rect::new(0.0, 0.0, 1280.0, 700.0), VariantName::FadeInUp, 1, Replay::Once),
        (
            "features",
            Rect::new(0.0, 1200.0, 1280.0, 1800.0),
            VariantName::StaggerChildren,
            3,
            Replay::Always,
        ),
        (
            "gallery",
            Rect::new(0.0, 2200.0, 1280.0, 2600.0),
            VariantName::ScaleIn,
            1,
            Replay::Always,
        ),
    ];
    let mut regions = Vec::new();
    for (name, rect, variant, children, replay) in sections {
        let region = observer.observe(&mut intersection, &rect, RegionOptions::section());
        animations.mount(
            region,
            AnimationScope::new(registry.resolve(variant), children, replay),
        );
        regions.push((name, region, rect));
    }

    // -- carousel and scrubber ----------------------------------------------
    let mut carousel = CarouselController::new();
    let mut scrubber = ScrubberController::new();
    let mut pending_play: Option<(PlayTicket, u64)> = None;
    let mut rejections_left = 1;

    let mut changes: Vec<VisibilityChange> = Vec::new();
    let mut transitions: Vec<(RegionId, ScopeTransition)> = Vec::new();

    for frame_index in 0..FRAME_COUNT {
        let now = HostTime(1_000_000 + frame_index * FRAME_INTERVAL_US);
        let tick = FrameTick { now, frame_index };
        let mut tee = Tee {
            pretty: &mut pretty,
            recorder: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut tee);
        tracer.frame(&FrameEvent::from(&tick));

        // 1. Visibility: report every section against the scrolled viewport.
        let top = page_offset(frame_index);
        let viewport = Rect::new(0.0, top, 1280.0, top + VIEWPORT_HEIGHT);
        for (_, region, rect) in &regions {
            observer.report_rects(*region, *rect, viewport);
        }
        changes.clear();
        observer.flush(&tick, &mut changes);
        for change in &changes {
            tracer.visibility(&VisibilityEvent::new(change, now));
        }
        transitions.clear();
        animations.apply(&changes, now, &mut transitions);
        for (region, transition) in &transitions {
            tracer.scope_transition(&ScopeTransitionEvent::new(*region, transition, now));
        }

        // 2. Carousel script.
        let recompute = match frame_index {
            2 => Some((
                RecomputeCause::Attach,
                carousel.attach(SimScroller {
                    offset: 0.0,
                    extent: 1200.0,
                    viewport: 350.0,
                }),
            )),
            10 | 14 | 18 => {
                if let Some(cmd) = carousel.page_scroll(Direction::Next) {
                    tracer.page_scroll(&PageScrollEvent::new(&cmd, now));
                }
                carousel.on_scroll().map(|g| (RecomputeCause::Scroll, g))
            }
            22 => {
                // A category filter leaves a single page of items.
                carousel.detach();
                carousel.attach(SimScroller {
                    offset: 0.0,
                    extent: 340.0,
                    viewport: 350.0,
                });
                carousel
                    .on_items_changed()
                    .map(|g| (RecomputeCause::ItemsChanged, g))
            }
            _ => None,
        };
        if let Some((cause, geometry)) = recompute {
            tracer.carousel(&CarouselEvent {
                at: now,
                cause,
                geometry,
            });
        }

        // 3. Scrubber script.
        match frame_index {
            3 => scrubber.attach(SimVideo::default()),
            30 | 40 | 75 => {
                if let Some(change) = scrubber.toggle_playback() {
                    if let PlaybackChange::PlayRequested(ticket) = change {
                        pending_play = Some((ticket, frame_index + 2));
                    }
                    tracer.playback(&PlaybackEvent { at: now, change });
                }
            }
            45 => {
                if let Some(seek) = scrubber.seek_to_pointer(TRACK.left + 0.5 * TRACK.width, TRACK)
                {
                    tracer.seek(&SeekEvent::new(&seek, now));
                }
            }
            50 => {
                if let Some(seek) = scrubber.begin_drag(TRACK.left + 0.5 * TRACK.width, TRACK) {
                    tracer.seek(&SeekEvent::new(&seek, now));
                }
            }
            51..=55 => {
                // Several pointer moves per frame; only the last one seeks.
                let step = (frame_index - 50) as f64;
                for sub in 1..=3 {
                    let x = TRACK.left + (0.5 + 0.02 * step + 0.005 * f64::from(sub)) * TRACK.width;
                    scrubber.drag_to(x);
                }
            }
            56 => {
                if let Some(seek) = scrubber.end_drag(TRACK.left + 0.75 * TRACK.width) {
                    tracer.seek(&SeekEvent::new(&seek, now));
                }
            }
            60 => {
                if let Some(change) = scrubber.toggle_mute() {
                    tracer.playback(&PlaybackEvent { at: now, change });
                }
            }
            _ => {}
        }
        if let Some(seek) = scrubber.on_frame(&tick) {
            tracer.seek(&SeekEvent::new(&seek, now));
        }

        // Start requests settle two frames after they were issued; the first
        // one hits an autoplay policy.
        if let Some((ticket, due)) = pending_play
            && due == frame_index
        {
            pending_play = None;
            let outcome = if rejections_left > 0 {
                rejections_left -= 1;
                Err(PlayRejected)
            } else {
                Ok(())
            };
            if let Some(change) = scrubber.on_play_settled(ticket, outcome) {
                tracer.playback(&PlaybackEvent { at: now, change });
            }
        }
    }

    // -- summary -----------------------------------------------------------
    let end = HostTime(1_000_000 + FRAME_COUNT * FRAME_INTERVAL_US);
    for (name, region, _) in &regions {
        if let Some(scope) = animations.scope(*region) {
            let first = scope.child_style(0, end);
            println!(
                "{name}: {:?} epoch={} child0 opacity={:.2}",
                scope.state(),
                scope.epoch(),
                first.opacity,
            );
        }
    }
    println!("regions observed: {}", intersection.observed.len());
    let playback = scrubber.state();
    println!(
        "media: {} / {} playing={} muted={} progress={:.0}%",
        format_timestamp(playback.current_secs),
        format_timestamp(playback.duration_secs.unwrap_or(f64::NAN)),
        playback.is_playing,
        playback.is_muted,
        playback.progress_percent(),
    );

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    reveal_debug::chrome::export(recorder.events(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({FRAME_COUNT} frames, {} events)", recorder.len());
}

// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads events recorded by a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes
//! [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Frames and controller outcomes are instant events on separate threads
//! (`tid`) so each controller gets its own track. Animation scopes are
//! additionally drawn as `B`/`E` slices spanning each visible phase.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use reveal_core::animation::ScopeState;
use reveal_core::time::HostTime;

use crate::recorder::RecordedEvent;

const TID_FRAME: u32 = 0;
const TID_VISIBILITY: u32 = 1;
const TID_SCOPES: u32 = 2;
const TID_CAROUSEL: u32 = 3;
const TID_SCRUBBER: u32 = 4;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::new();

    for recorded in events {
        match recorded {
            RecordedEvent::Frame(e) => {
                out.push(instant("Frame", "Frame", e.now, TID_FRAME, json!({
                    "frame_index": e.frame_index,
                })));
            }
            RecordedEvent::Visibility(e) => {
                out.push(instant(
                    if e.is_visible { "Enter" } else { "Exit" },
                    "Visibility",
                    e.at,
                    TID_VISIBILITY,
                    json!({
                        "region": e.region.index(),
                        "generation": e.region.generation(),
                    }),
                ));
            }
            RecordedEvent::ScopeTransition(e) => {
                let ph = match e.state {
                    ScopeState::Visible => "B",
                    ScopeState::Hidden => "E",
                };
                out.push(json!({
                    "ph": ph,
                    "name": format!("scope {}", e.region.index()),
                    "cat": "Animation",
                    "ts": us(e.at),
                    "pid": 0,
                    "tid": TID_SCOPES,
                    "args": {
                        "epoch": e.epoch,
                    }
                }));
            }
            RecordedEvent::Carousel(e) => {
                let g = &e.geometry;
                out.push(instant(
                    "Recompute",
                    "Carousel",
                    e.at,
                    TID_CAROUSEL,
                    json!({
                        "cause": format!("{:?}", e.cause),
                        "scroll_position": g.scroll_position,
                        "scroll_extent": g.scroll_extent,
                        "viewport_extent": g.viewport_extent,
                        "can_scroll_prev": g.can_scroll_prev,
                        "can_scroll_next": g.can_scroll_next,
                    }),
                ));
            }
            RecordedEvent::PageScroll(e) => {
                out.push(instant(
                    "PageScroll",
                    "Carousel",
                    e.at,
                    TID_CAROUSEL,
                    json!({
                        "direction": format!("{:?}", e.direction),
                        "delta": e.delta,
                    }),
                ));
            }
            RecordedEvent::Seek(e) => {
                out.push(instant("Seek", "Scrubber", e.at, TID_SCRUBBER, json!({
                    "target_secs": e.target_secs,
                    "source": format!("{:?}", e.source),
                })));
            }
            RecordedEvent::Playback(e) => {
                out.push(instant("Playback", "Scrubber", e.at, TID_SCRUBBER, json!({
                    "change": format!("{:?}", e.change),
                })));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

fn instant(name: &str, cat: &str, at: HostTime, tid: u32, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": us(at),
        "pid": 0,
        "tid": tid,
        "s": "t",
        "args": args,
    })
}

fn us(t: HostTime) -> u64 {
    t.ticks()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use reveal_core::animation::ScopeTransition;
    use reveal_core::frame::FrameTick;
    use reveal_core::host::IntersectionHost;
    use reveal_core::scrubber::{Seek, SeekSource};
    use reveal_core::trace::{FrameEvent, ScopeTransitionEvent, SeekEvent, TraceSink};
    use reveal_core::visibility::{RegionId, RegionOptions, VisibilityObserver};

    struct NullHost;

    impl IntersectionHost for NullHost {
        type Target = ();

        fn observe(&mut self, _: RegionId, _: &(), _: RegionOptions) {}

        fn unobserve(&mut self, _: RegionId) {}
    }

    #[test]
    fn export_produces_valid_json() {
        let mut observer = VisibilityObserver::new();
        let region = observer.observe(&mut NullHost, &(), RegionOptions::section());

        let mut rec = RecorderSink::new();
        rec.on_frame(&FrameEvent::from(&FrameTick {
            now: HostTime(1_000),
            frame_index: 0,
        }));
        let entered = ScopeTransition {
            state: ScopeState::Visible,
            epoch: 1,
        };
        rec.on_scope_transition(&ScopeTransitionEvent::new(region, &entered, HostTime(1_000)));
        let seek = Seek {
            target_secs: 60.0,
            source: SeekSource::Click,
        };
        rec.on_seek(&SeekEvent::new(&seek, HostTime(2_500)));
        let left = ScopeTransition {
            state: ScopeState::Hidden,
            epoch: 1,
        };
        rec.on_scope_transition(&ScopeTransitionEvent::new(region, &left, HostTime(3_000)));

        let mut out = Vec::new();
        export(rec.events(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        // Should parse as a JSON array.
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 4);

        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "Frame");

        // Scope phases become a begin/end slice on their own track.
        assert_eq!(parsed[1]["ph"], "B");
        assert_eq!(parsed[1]["args"]["epoch"], 1);
        assert_eq!(parsed[3]["ph"], "E");
        assert_eq!(parsed[1]["name"], parsed[3]["name"]);
        assert_eq!(parsed[1]["tid"], TID_SCOPES);

        assert_eq!(parsed[2]["name"], "Seek");
        assert_eq!(parsed[2]["ts"], 2_500);
        assert_eq!(parsed[2]["args"]["source"], "Click");
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}

// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Custom media scrubber.
//!
//! [`ScrubberController`] binds a [`MediaHost`] play head to a 0–100
//! progress value and turns pointer input on the track into seeks.
//!
//! # Degenerate states
//!
//! - Unknown, zero or non-finite duration: progress reads 0 and seeks are
//!   ignored.
//! - No media attached (e.g. during teardown): every operation is a no-op.
//! - Playback start rejected by the host: the controller stays paused; the
//!   rejection is consumed here and never reaches the caller as an error.
//!
//! # Playback start
//!
//! ```text
//!   Paused ──toggle──► Starting(ticket) ──settled Ok──► Playing
//!     ▲                   │      │                        │
//!     │                   │      └──settled Err──► Paused │
//!     └────toggle─────────┘                               │
//!     └──────────────────────toggle / ended───────────────┘
//! ```
//!
//! Outcomes for a ticket that is no longer current are stale. A stale
//! success means the media started after the user asked it to stop, so the
//! controller pauses it again.
//!
//! The media can also change state on its own (system media keys, native
//! controls, the browser suspending playback). Hosts forward those through
//! [`on_host_paused`](ScrubberController::on_host_paused) and
//! [`on_host_played`](ScrubberController::on_host_played), and
//! [`toggle_playback`](ScrubberController::toggle_playback) checks the live
//! paused flag before deciding what a click means.

use crate::frame::{FrameGate, FrameTick};
use crate::host::{MediaHost, PlayRejected, PlayTicket};

/// Returns `Some(duration)` only for a finite, strictly positive duration.
#[must_use]
pub fn known_duration(duration: Option<f64>) -> Option<f64> {
    duration.filter(|d| d.is_finite() && *d > 0.0)
}

/// Play-head progress in `[0, 100]`; 0 whenever the duration is unknown.
#[must_use]
pub fn progress_percent(current_secs: f64, duration: Option<f64>) -> f64 {
    match known_duration(duration) {
        Some(d) if current_secs.is_finite() => (current_secs / d * 100.0).clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// Target play position for a pointer at `pointer_x` over a track.
///
/// Returns `None` if the duration is unknown or the track has no width.
#[must_use]
pub fn seek_target(
    pointer_x: f64,
    track_left: f64,
    track_width: f64,
    duration: Option<f64>,
) -> Option<f64> {
    let duration = known_duration(duration)?;
    if !(track_width.is_finite() && track_width > 0.0) {
        return None;
    }
    let fraction = (pointer_x - track_left) / track_width;
    if fraction.is_nan() {
        return None;
    }
    Some(fraction.clamp(0.0, 1.0) * duration)
}

/// Formats seconds as `m:ss`, or `h:mm:ss` from one hour up. Unknown and
/// negative values render as `--:--`.
#[must_use]
pub fn format_timestamp(secs: f64) -> alloc::string::String {
    if !secs.is_finite() || secs < 0.0 {
        return alloc::string::String::from("--:--");
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is finite and non-negative; whole seconds fit in u64"
    )]
    let total = secs as u64;
    let (h, m, s) = (total / 3600, (total / 60) % 60, total % 60);
    if h > 0 {
        alloc::format!("{h}:{m:02}:{s:02}")
    } else {
        alloc::format!("{m}:{s:02}")
    }
}

/// Observable playback state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MediaPlaybackState {
    /// Play position in seconds.
    pub current_secs: f64,
    /// Duration in seconds, if known.
    pub duration_secs: Option<f64>,
    /// Playback is running.
    pub is_playing: bool,
    /// Audio is muted.
    pub is_muted: bool,
}

impl MediaPlaybackState {
    const INITIAL: Self = Self {
        current_secs: 0.0,
        duration_secs: None,
        is_playing: false,
        is_muted: false,
    };

    /// Progress derived from position and duration.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.current_secs, self.duration_secs)
    }
}

impl Default for MediaPlaybackState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Where a seek came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeekSource {
    /// Single click on the track (or the start of a drag).
    Click,
    /// Pointer moved while held over the track.
    Drag,
}

/// A seek applied to the media.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Seek {
    /// Target position in seconds.
    pub target_secs: f64,
    /// Input that caused it.
    pub source: SeekSource,
}

/// A playback state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackChange {
    /// A start request was issued.
    PlayRequested(PlayTicket),
    /// The host confirmed playback.
    Started(PlayTicket),
    /// The host refused playback; the controller stays paused.
    Rejected(PlayTicket),
    /// Playback paused (by the user, the media itself, or because it ended).
    Paused,
    /// Playback started outside the controller.
    Resumed,
    /// Muted flag changed.
    Muted(bool),
}

/// Horizontal placement of the scrubber track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    /// Left edge in pointer coordinates.
    pub left: f64,
    /// Width in pointer coordinates.
    pub width: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Paused,
    Starting(PlayTicket),
    Playing,
}

/// Drives a media element from scrubber input.
#[derive(Debug)]
pub struct ScrubberController<H> {
    host: Option<H>,
    state: MediaPlaybackState,
    phase: Phase,
    next_ticket: u64,
    drag: Option<Track>,
    drag_samples: FrameGate<f64>,
}

impl<H> Default for ScrubberController<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ScrubberController<H> {
    /// Creates a controller with no media.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            host: None,
            state: MediaPlaybackState::INITIAL,
            phase: Phase::Paused,
            next_ticket: 0,
            drag: None,
            drag_samples: FrameGate::new(),
        }
    }

    /// Current playback state.
    #[must_use]
    pub fn state(&self) -> MediaPlaybackState {
        self.state
    }

    /// Progress in `[0, 100]`.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.state.progress_percent()
    }

    /// Returns `true` while a start request is waiting for the host.
    #[must_use]
    pub fn is_starting(&self) -> bool {
        matches!(self.phase, Phase::Starting(_))
    }

    /// Returns `true` while a drag-seek is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Releases the media. Pending start requests become stale.
    pub fn detach(&mut self) -> Option<H> {
        self.phase = Phase::Paused;
        self.state.is_playing = false;
        self.drag = None;
        self.drag_samples.clear();
        self.host.take()
    }
}

impl<H: MediaHost> ScrubberController<H> {
    /// Binds the controller to `host` and reads its current state.
    pub fn attach(&mut self, host: H) {
        let paused = host.is_paused();
        self.state = MediaPlaybackState {
            current_secs: host.current_time(),
            duration_secs: known_duration(host.duration()),
            is_playing: !paused,
            is_muted: host.is_muted(),
        };
        self.phase = if paused { Phase::Paused } else { Phase::Playing };
        self.host = Some(host);
    }

    /// Handles a play-head update (the media's `timeupdate`).
    ///
    /// Returns the new progress.
    pub fn on_playhead_update(&mut self, current_secs: f64, duration_secs: Option<f64>) -> f64 {
        self.state.current_secs = if current_secs.is_finite() {
            current_secs
        } else {
            0.0
        };
        self.state.duration_secs = known_duration(duration_secs);
        self.state.progress_percent()
    }

    /// Seeks to the position under the pointer (a click on the track).
    pub fn seek_to_pointer(&mut self, pointer_x: f64, track: Track) -> Option<Seek> {
        self.seek(pointer_x, track, SeekSource::Click)
    }

    /// Starts a drag-seek: seeks immediately, then follows
    /// [`drag_to`](Self::drag_to) once per frame.
    pub fn begin_drag(&mut self, pointer_x: f64, track: Track) -> Option<Seek> {
        self.host.as_ref()?;
        self.drag = Some(track);
        self.drag_samples.clear();
        self.seek(pointer_x, track, SeekSource::Click)
    }

    /// Records a pointer move while dragging.
    ///
    /// Returns `true` when the caller should request a frame.
    pub fn drag_to(&mut self, pointer_x: f64) -> bool {
        if self.drag.is_none() {
            return false;
        }
        self.drag_samples.offer(pointer_x)
    }

    /// Applies the latest drag sample for this frame.
    pub fn on_frame(&mut self, tick: &FrameTick) -> Option<Seek> {
        let track = self.drag?;
        let pointer_x = self.drag_samples.take(tick)?;
        self.seek(pointer_x, track, SeekSource::Drag)
    }

    /// Ends a drag-seek, applying the final pointer position immediately.
    pub fn end_drag(&mut self, pointer_x: f64) -> Option<Seek> {
        let track = self.drag.take()?;
        self.drag_samples.clear();
        self.seek(pointer_x, track, SeekSource::Drag)
    }

    /// Abandons a drag-seek without a final seek (pointer left the page).
    pub fn cancel_drag(&mut self) {
        self.drag = None;
        self.drag_samples.clear();
    }

    /// Pauses when playing or starting; requests playback when paused.
    ///
    /// Media that paused without telling the controller counts as paused.
    pub fn toggle_playback(&mut self) -> Option<PlaybackChange> {
        let host = self.host.as_mut()?;
        if self.phase == Phase::Playing && host.is_paused() {
            self.phase = Phase::Paused;
            self.state.is_playing = false;
        }
        match self.phase {
            Phase::Paused => {
                let ticket = PlayTicket(self.next_ticket);
                self.next_ticket += 1;
                self.phase = Phase::Starting(ticket);
                host.request_play(ticket);
                Some(PlaybackChange::PlayRequested(ticket))
            }
            Phase::Starting(_) | Phase::Playing => {
                host.pause();
                self.phase = Phase::Paused;
                self.state.is_playing = false;
                Some(PlaybackChange::Paused)
            }
        }
    }

    /// Handles the host's answer to a start request.
    ///
    /// Rejections leave the controller paused. Returns `None` for stale
    /// tickets.
    pub fn on_play_settled(
        &mut self,
        ticket: PlayTicket,
        outcome: Result<(), PlayRejected>,
    ) -> Option<PlaybackChange> {
        let host = self.host.as_mut()?;
        if self.phase != Phase::Starting(ticket) {
            if outcome.is_ok() && self.phase == Phase::Paused {
                host.pause();
            }
            return None;
        }
        match outcome {
            Ok(()) => {
                self.phase = Phase::Playing;
                self.state.is_playing = true;
                Some(PlaybackChange::Started(ticket))
            }
            Err(PlayRejected) => {
                self.phase = Phase::Paused;
                self.state.is_playing = false;
                Some(PlaybackChange::Rejected(ticket))
            }
        }
    }

    /// Handles the media pausing (its `pause` event).
    ///
    /// Ignored while a start request is pending or if the host still reports
    /// playback.
    pub fn on_host_paused(&mut self) -> Option<PlaybackChange> {
        let host = self.host.as_ref()?;
        if self.phase != Phase::Playing || !host.is_paused() {
            return None;
        }
        self.phase = Phase::Paused;
        self.state.is_playing = false;
        Some(PlaybackChange::Paused)
    }

    /// Handles the media starting (its `play` event).
    ///
    /// Start requests issued by the controller settle through
    /// [`on_play_settled`](Self::on_play_settled) instead, so this only acts
    /// when the controller believes the media is paused.
    pub fn on_host_played(&mut self) -> Option<PlaybackChange> {
        let host = self.host.as_ref()?;
        if self.phase != Phase::Paused || host.is_paused() {
            return None;
        }
        self.phase = Phase::Playing;
        self.state.is_playing = true;
        Some(PlaybackChange::Resumed)
    }

    /// Handles the media reaching its end.
    pub fn on_ended(&mut self) -> Option<PlaybackChange> {
        self.host.as_ref()?;
        if self.phase == Phase::Paused {
            return None;
        }
        self.phase = Phase::Paused;
        self.state.is_playing = false;
        Some(PlaybackChange::Paused)
    }

    /// Flips the muted flag and applies it to the media.
    pub fn toggle_mute(&mut self) -> Option<PlaybackChange> {
        let host = self.host.as_mut()?;
        let muted = !self.state.is_muted;
        host.set_muted(muted);
        self.state.is_muted = muted;
        Some(PlaybackChange::Muted(muted))
    }

    fn seek(&mut self, pointer_x: f64, track: Track, source: SeekSource) -> Option<Seek> {
        let host = self.host.as_mut()?;
        let target_secs = seek_target(pointer_x, track.left, track.width, self.state.duration_secs)?;
        host.set_current_time(target_secs);
        self.state.current_secs = target_secs;
        Some(Seek {
            target_secs,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::time::HostTime;

    #[derive(Debug, Clone, PartialEq)]
    enum Command {
        Play(PlayTicket),
        Pause,
        Seek(f64),
        Mute(bool),
    }

    #[derive(Debug, Default)]
    struct FakeMedia {
        current: f64,
        duration: Option<f64>,
        paused: bool,
        muted: bool,
        commands: Vec<Command>,
    }

    impl FakeMedia {
        fn with_duration(duration: Option<f64>) -> Self {
            Self {
                duration,
                paused: true,
                ..Self::default()
            }
        }
    }

    impl MediaHost for FakeMedia {
        fn current_time(&self) -> f64 {
            self.current
        }

        fn duration(&self) -> Option<f64> {
            self.duration
        }

        fn is_paused(&self) -> bool {
            self.paused
        }

        fn is_muted(&self) -> bool {
            self.muted
        }

        fn request_play(&mut self, ticket: PlayTicket) {
            self.paused = false;
            self.commands.push(Command::Play(ticket));
        }

        fn pause(&mut self) {
            self.paused = true;
            self.commands.push(Command::Pause);
        }

        fn set_current_time(&mut self, secs: f64) {
            self.current = secs;
            self.commands.push(Command::Seek(secs));
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            self.commands.push(Command::Mute(muted));
        }
    }

    const TRACK: Track = Track {
        left: 100.0,
        width: 400.0,
    };

    fn tick(frame_index: u64) -> FrameTick {
        FrameTick {
            now: HostTime(frame_index * 16_667),
            frame_index,
        }
    }

    fn attached(duration: Option<f64>) -> ScrubberController<FakeMedia> {
        let mut scrubber = ScrubberController::new();
        scrubber.attach(FakeMedia::with_duration(duration));
        scrubber
    }

    #[test]
    fn progress_is_bounded_for_any_input() {
        let durations = [
            None,
            Some(0.0),
            Some(f64::NAN),
            Some(f64::INFINITY),
            Some(-5.0),
            Some(120.0),
        ];
        let positions = [-10.0, 0.0, 30.0, 120.0, 500.0, f64::NAN, f64::INFINITY];
        for d in durations {
            for c in positions {
                let p = progress_percent(c, d);
                assert!((0.0..=100.0).contains(&p), "progress({c}, {d:?}) = {p}");
                if known_duration(d).is_none() {
                    assert_eq!(p, 0.0, "unknown duration {d:?} must read 0");
                }
            }
        }
        assert_eq!(progress_percent(30.0, Some(120.0)), 25.0);
    }

    #[test]
    fn click_at_half_track_seeks_to_half_duration() {
        let mut scrubber = attached(Some(120.0));
        let seek = scrubber.seek_to_pointer(300.0, TRACK).unwrap();
        assert_eq!(seek.target_secs, 60.0);
        assert_eq!(seek.source, SeekSource::Click);
        assert_eq!(scrubber.progress_percent(), 50.0);
    }

    #[test]
    fn pointer_outside_track_clamps() {
        let mut scrubber = attached(Some(120.0));
        assert_eq!(scrubber.seek_to_pointer(0.0, TRACK).unwrap().target_secs, 0.0);
        assert_eq!(
            scrubber.seek_to_pointer(900.0, TRACK).unwrap().target_secs,
            120.0
        );
    }

    #[test]
    fn seek_without_duration_is_ignored() {
        let mut scrubber = attached(None);
        assert_eq!(scrubber.seek_to_pointer(300.0, TRACK), None);
        scrubber.on_playhead_update(3.0, Some(f64::NAN));
        assert_eq!(scrubber.seek_to_pointer(300.0, TRACK), None);
        assert_eq!(scrubber.progress_percent(), 0.0);
        let zero_width = Track {
            left: 0.0,
            width: 0.0,
        };
        scrubber.on_playhead_update(3.0, Some(10.0));
        assert_eq!(scrubber.seek_to_pointer(0.0, zero_width), None);
    }

    #[test]
    fn drag_seeks_once_per_frame_and_keeps_final_sample() {
        let mut scrubber = attached(Some(100.0));
        let first = scrubber.begin_drag(100.0, TRACK).unwrap();
        assert_eq!(first.target_secs, 0.0);

        assert!(scrubber.drag_to(140.0));
        assert!(!scrubber.drag_to(180.0));
        let seek = scrubber.on_frame(&tick(1)).unwrap();
        assert_eq!(seek.target_secs, 20.0, "latest sample before the frame wins");
        assert_eq!(seek.source, SeekSource::Drag);

        scrubber.drag_to(220.0);
        assert_eq!(scrubber.on_frame(&tick(1)), None, "one seek per frame");

        let last = scrubber.end_drag(300.0).unwrap();
        assert_eq!(last.target_secs, 50.0);
        assert!(!scrubber.is_dragging());
        assert_eq!(scrubber.on_frame(&tick(2)), None);

        let host = scrubber.detach().unwrap();
        assert_eq!(
            host.commands,
            vec![Command::Seek(0.0), Command::Seek(20.0), Command::Seek(50.0)]
        );
    }

    #[test]
    fn rejected_start_stays_paused() {
        let mut scrubber = attached(Some(10.0));
        let Some(PlaybackChange::PlayRequested(ticket)) = scrubber.toggle_playback() else {
            panic!("paused controller should request playback");
        };
        assert!(scrubber.is_starting());
        assert!(!scrubber.state().is_playing);

        assert_eq!(
            scrubber.on_play_settled(ticket, Err(PlayRejected)),
            Some(PlaybackChange::Rejected(ticket))
        );
        assert!(!scrubber.state().is_playing);
        assert!(!scrubber.is_starting());

        // The next toggle asks again with a fresh ticket.
        let Some(PlaybackChange::PlayRequested(next)) = scrubber.toggle_playback() else {
            panic!("paused controller should request playback");
        };
        assert_ne!(ticket, next);
    }

    #[test]
    fn resolved_start_plays_then_toggle_pauses() {
        let mut scrubber = attached(Some(10.0));
        let Some(PlaybackChange::PlayRequested(ticket)) = scrubber.toggle_playback() else {
            panic!("paused controller should request playback");
        };
        assert_eq!(
            scrubber.on_play_settled(ticket, Ok(())),
            Some(PlaybackChange::Started(ticket))
        );
        assert!(scrubber.state().is_playing);

        assert_eq!(scrubber.toggle_playback(), Some(PlaybackChange::Paused));
        assert!(!scrubber.state().is_playing);
        let host = scrubber.detach().unwrap();
        assert_eq!(host.commands, vec![Command::Play(ticket), Command::Pause]);
    }

    #[test]
    fn late_success_after_user_pause_is_reverted() {
        let mut scrubber = attached(Some(10.0));
        let Some(PlaybackChange::PlayRequested(ticket)) = scrubber.toggle_playback() else {
            panic!("paused controller should request playback");
        };
        assert_eq!(scrubber.toggle_playback(), Some(PlaybackChange::Paused));

        assert_eq!(scrubber.on_play_settled(ticket, Ok(())), None);
        assert!(!scrubber.state().is_playing);
        let host = scrubber.detach().unwrap();
        assert_eq!(
            host.commands,
            vec![Command::Play(ticket), Command::Pause, Command::Pause]
        );
    }

    #[test]
    fn toggle_after_media_paused_itself_requests_playback() {
        let mut scrubber = ScrubberController::new();
        scrubber.attach(FakeMedia {
            duration: Some(10.0),
            ..FakeMedia::default()
        });
        assert!(scrubber.state().is_playing);

        // Paused by the system, with no event delivered.
        scrubber.host.as_mut().unwrap().paused = true;
        let Some(PlaybackChange::PlayRequested(ticket)) = scrubber.toggle_playback() else {
            panic!("externally paused media should be asked to play");
        };
        assert!(scrubber.is_starting());
        let host = scrubber.detach().unwrap();
        assert_eq!(host.commands, vec![Command::Play(ticket)]);
    }

    #[test]
    fn host_pause_and_play_events_sync_state() {
        let mut scrubber = ScrubberController::new();
        scrubber.attach(FakeMedia {
            duration: Some(10.0),
            ..FakeMedia::default()
        });

        scrubber.host.as_mut().unwrap().paused = true;
        assert_eq!(scrubber.on_host_paused(), Some(PlaybackChange::Paused));
        assert!(!scrubber.state().is_playing);
        assert_eq!(scrubber.on_host_paused(), None, "already paused");

        scrubber.host.as_mut().unwrap().paused = false;
        assert_eq!(scrubber.on_host_played(), Some(PlaybackChange::Resumed));
        assert!(scrubber.state().is_playing);
        assert_eq!(scrubber.toggle_playback(), Some(PlaybackChange::Paused));
        let host = scrubber.detach().unwrap();
        assert_eq!(host.commands, vec![Command::Pause]);
    }

    #[test]
    fn play_event_for_own_request_waits_for_settlement() {
        let mut scrubber = attached(Some(10.0));
        let Some(PlaybackChange::PlayRequested(ticket)) = scrubber.toggle_playback() else {
            panic!("paused controller should request playback");
        };
        assert_eq!(scrubber.on_host_played(), None);
        assert!(scrubber.is_starting());
        assert_eq!(
            scrubber.on_play_settled(ticket, Ok(())),
            Some(PlaybackChange::Started(ticket))
        );

        // A pause event queued behind a user pause is already accounted for.
        assert_eq!(scrubber.toggle_playback(), Some(PlaybackChange::Paused));
        assert_eq!(scrubber.on_host_paused(), None);
        assert_eq!(scrubber.on_host_played(), None, "host still reports paused");
    }

    #[test]
    fn mute_toggles_and_applies() {
        let mut scrubber = attached(Some(10.0));
        assert_eq!(scrubber.toggle_mute(), Some(PlaybackChange::Muted(true)));
        assert!(scrubber.state().is_muted);
        assert_eq!(scrubber.toggle_mute(), Some(PlaybackChange::Muted(false)));
        let host = scrubber.detach().unwrap();
        assert_eq!(host.commands, vec![Command::Mute(true), Command::Mute(false)]);
    }

    #[test]
    fn ended_media_returns_to_paused() {
        let mut scrubber = attached(Some(10.0));
        let Some(PlaybackChange::PlayRequested(ticket)) = scrubber.toggle_playback() else {
            panic!("paused controller should request playback");
        };
        scrubber.on_play_settled(ticket, Ok(()));
        assert_eq!(scrubber.on_ended(), Some(PlaybackChange::Paused));
        assert_eq!(scrubber.on_ended(), None);
    }

    #[test]
    fn detached_controller_is_a_no_op() {
        let mut scrubber: ScrubberController<FakeMedia> = ScrubberController::new();
        assert_eq!(scrubber.toggle_playback(), None);
        assert_eq!(scrubber.toggle_mute(), None);
        assert_eq!(scrubber.on_host_paused(), None);
        assert_eq!(scrubber.on_host_played(), None);
        assert_eq!(scrubber.seek_to_pointer(1.0, TRACK), None);
        assert_eq!(scrubber.begin_drag(1.0, TRACK), None);
        assert!(!scrubber.drag_to(1.0));
        assert_eq!(scrubber.on_play_settled(PlayTicket(0), Ok(())), None);

        // Teardown while a start request is in flight.
        let mut scrubber = attached(Some(10.0));
        let Some(PlaybackChange::PlayRequested(ticket)) = scrubber.toggle_playback() else {
            panic!("paused controller should request playback");
        };
        assert!(scrubber.detach().is_some());
        assert_eq!(scrubber.on_play_settled(ticket, Ok(())), None);
    }

    #[test]
    fn attach_reads_host_state() {
        let mut scrubber = ScrubberController::new();
        scrubber.attach(FakeMedia {
            current: 30.0,
            duration: Some(120.0),
            paused: false,
            muted: true,
            commands: Vec::new(),
        });
        let state = scrubber.state();
        assert!(state.is_playing);
        assert!(state.is_muted);
        assert_eq!(scrubber.progress_percent(), 25.0);
    }

    #[test]
    fn timestamps_format_like_a_player() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(65.9), "1:05");
        assert_eq!(format_timestamp(3600.0 + 62.0), "1:01:02");
        assert_eq!(format_timestamp(f64::NAN), "--:--");
        assert_eq!(format_timestamp(-1.0), "--:--");
    }
}

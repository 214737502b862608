// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `HTMLMediaElement` host.
//!
//! `play()` returns a promise that the browser may reject (autoplay policy,
//! missing source). [`DomMediaHost`] awaits it on the local executor and
//! queues the outcome with its [`PlayTicket`]; the page drains
//! [`PlayOutcomes`] and feeds each one to
//! [`ScrubberController::on_play_settled`].
//!
//! [`ScrubberController::on_play_settled`]: reveal_core::scrubber::ScrubberController::on_play_settled

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlMediaElement;

use reveal_core::host::{MediaHost, PlayRejected, PlayTicket};

use crate::FrameRequester;

/// Settled playback-start requests, shared between a [`DomMediaHost`] and
/// the page.
#[derive(Clone, Debug, Default)]
pub struct PlayOutcomes {
    queue: Rc<RefCell<Vec<(PlayTicket, Result<(), PlayRejected>)>>>,
}

impl PlayOutcomes {
    /// Takes every queued outcome, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<(PlayTicket, Result<(), PlayRejected>)> {
        core::mem::take(&mut *self.queue.borrow_mut())
    }

    fn push(&self, ticket: PlayTicket, outcome: Result<(), PlayRejected>) {
        self.queue.borrow_mut().push((ticket, outcome));
    }
}

/// Browser [`MediaHost`] for a `<video>` or `<audio>` element.
#[derive(Debug)]
pub struct DomMediaHost {
    element: HtmlMediaElement,
    outcomes: PlayOutcomes,
    wake: Option<FrameRequester>,
}

impl DomMediaHost {
    /// Wraps a media element. `wake` is asked for a frame whenever a start
    /// request settles.
    #[must_use]
    pub fn new(element: HtmlMediaElement, wake: Option<FrameRequester>) -> Self {
        Self {
            element,
            outcomes: PlayOutcomes::default(),
            wake,
        }
    }

    /// The wrapped element.
    #[must_use]
    pub fn element(&self) -> &HtmlMediaElement {
        &self.element
    }

    /// Handle to this host's settled start requests.
    #[must_use]
    pub fn outcomes(&self) -> PlayOutcomes {
        self.outcomes.clone()
    }

    fn settle(&self, ticket: PlayTicket, outcome: Result<(), PlayRejected>) {
        self.outcomes.push(ticket, outcome);
        if let Some(wake) = &self.wake {
            wake.request();
        }
    }
}

impl MediaHost for DomMediaHost {
    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> Option<f64> {
        // NaN until metadata loads, +inf for live streams.
        let duration = self.element.duration();
        duration.is_finite().then_some(duration)
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn is_muted(&self) -> bool {
        self.element.muted()
    }

    fn request_play(&mut self, ticket: PlayTicket) {
        let promise = match self.element.play() {
            Ok(promise) => promise,
            Err(_) => {
                self.settle(ticket, Err(PlayRejected));
                return;
            }
        };
        let outcomes = self.outcomes.clone();
        let wake = self.wake.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|_| PlayRejected);
            outcomes.push(ticket, outcome);
            if let Some(wake) = wake {
                wake.request();
            }
        });
    }

    fn pause(&mut self) {
        let _ = self.element.pause();
    }

    fn set_current_time(&mut self, secs: f64) {
        self.element.set_current_time(secs);
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }
}

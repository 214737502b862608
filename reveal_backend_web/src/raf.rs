// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! On-demand `requestAnimationFrame` loop.
//!
//! [`RafLoop`] only runs while there is work. Event handlers call
//! [`FrameRequester::request`] when a [`FrameGate`] reports a new pending
//! sample; the loop then delivers one [`FrameTick`] and keeps going for as
//! long as the callback returns `true` (an entrance animation is still
//! playing, a drag is still active).
//!
//! Each callback receives a [`DOMHighResTimeStamp`][mdn] (milliseconds from
//! `performance.now()`), which is converted to microsecond [`HostTime`]
//! ticks.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp
//! [`FrameGate`]: reveal_core::frame::FrameGate
//! [`FrameTick`]: reveal_core::frame::FrameTick
//! [`HostTime`]: reveal_core::time::HostTime

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use reveal_core::frame::FrameTick;
use reveal_core::time::HostTime;

// Direct global bindings instead of `web_sys::Window` methods, so no
// Window/Performance lookup happens per frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    /// Registered with `requestAnimationFrame`; set once in `RafLoop::new`.
    closure: RefCell<Option<RafClosure>>,

    /// Receives each tick; returns `true` to keep the loop running.
    callback: RefCell<Box<dyn FnMut(FrameTick) -> bool>>,

    /// Becomes `FrameTick::frame_index`.
    frame_counter: Cell<u64>,

    /// ID of the outstanding `requestAnimationFrame` call, if any.
    pending: Cell<Option<i32>>,
}

impl RafInner {
    fn schedule(&self) {
        if self.pending.get().is_some() {
            return;
        }
        if let Some(ref closure) = *self.closure.borrow() {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.pending.set(Some(id));
        }
    }
}

/// A `requestAnimationFrame` loop that runs while it has work.
///
/// The loop is idle after construction. Call [`request`](Self::request) (or
/// [`FrameRequester::request`] from an event handler) to get the next frame.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

impl RafLoop {
    /// Creates an idle loop.
    ///
    /// `callback` receives a [`FrameTick`] per frame and returns whether
    /// another frame is needed.
    ///
    /// [`FrameTick`]: reveal_core::frame::FrameTick
    pub fn new(callback: impl FnMut(FrameTick) -> bool + 'static) -> Self {
        let inner = Rc::new(RafInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            frame_counter: Cell::new(0),
            pending: Cell::new(None),
        });

        // The closure holds a weak handle so dropping the loop frees both.
        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.pending.set(None);

            let frame_index = inner.frame_counter.get();
            inner.frame_counter.set(frame_index + 1);
            let tick = FrameTick {
                now: HostTime::from_millis_f64(timestamp_ms),
                frame_index,
            };

            // Scoped so a `request` from inside the callback does not overlap
            // with this borrow.
            let again = inner.callback.borrow_mut()(tick);
            if again {
                inner.schedule();
            }
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Requests the next frame. No-op if one is already pending.
    pub fn request(&self) {
        self.inner.schedule();
    }

    /// Returns a handle event handlers can use to request frames.
    #[must_use]
    pub fn requester(&self) -> FrameRequester {
        FrameRequester {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Cancels the pending frame, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            cancel_animation_frame(id);
        }
    }

    /// Returns `true` if a frame is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.cancel();
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("pending", &self.inner.pending.get().is_some())
            .field("frame_counter", &self.inner.frame_counter.get())
            .finish_non_exhaustive()
    }
}

/// A weak handle to a [`RafLoop`].
///
/// Requests after the loop is dropped are ignored.
#[derive(Clone)]
pub struct FrameRequester {
    inner: Weak<RafInner>,
}

impl FrameRequester {
    /// Requests the next frame. No-op if one is already pending.
    pub fn request(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
    }
}

impl core::fmt::Debug for FrameRequester {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameRequester")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish_non_exhaustive()
    }
}

// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped DOM event subscriptions.
//!
//! A [`Listener`] is acquired when a component mounts and dropped when it
//! unmounts; dropping it removes the listener from its target. Nothing is
//! registered globally.

use alloc::boxed::Box;
use alloc::string::String;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

/// An event listener that unregisters itself on drop.
pub struct Listener {
    target: EventTarget,
    event: String,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Registers `handler` for `event` on `target`.
    ///
    /// # Errors
    ///
    /// Returns the DOM exception if registration fails.
    pub fn new(
        target: &EventTarget,
        event: &str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event: String::from(event),
            closure,
        })
    }

    /// The event name.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(&self.event, self.closure.as_ref().unchecked_ref());
    }
}

impl core::fmt::Debug for Listener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listener")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

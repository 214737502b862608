// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` host.
//!
//! Each observed region gets its own browser observer, since threshold and
//! root margin are per-observer options. Observer callbacks only queue
//! `(region, ratio)` samples and request a frame; the frame callback drains
//! the queue into the [`VisibilityObserver`], which applies the per-frame
//! gate.
//!
//! [`VisibilityObserver`]: reveal_core::visibility::VisibilityObserver

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use js_sys::Array;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use reveal_core::host::IntersectionHost;
use reveal_core::visibility::{RegionId, RegionOptions, VisibilityObserver};

use crate::FrameRequester;

type EntriesClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;

struct Subscription {
    observer: IntersectionObserver,
    _closure: EntriesClosure,
}

/// Browser [`IntersectionHost`] backed by one `IntersectionObserver` per
/// region.
pub struct DomIntersectionHost {
    subscriptions: BTreeMap<RegionId, Subscription>,
    samples: Rc<RefCell<Vec<(RegionId, f64)>>>,
    wake: Option<FrameRequester>,
}

impl core::fmt::Debug for DomIntersectionHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomIntersectionHost")
            .field("regions", &self.subscriptions.len())
            .field("queued", &self.samples.borrow().len())
            .finish_non_exhaustive()
    }
}

impl DomIntersectionHost {
    /// Creates a host. `wake` is asked for a frame whenever a sample arrives.
    #[must_use]
    pub fn new(wake: Option<FrameRequester>) -> Self {
        Self {
            subscriptions: BTreeMap::new(),
            samples: Rc::new(RefCell::new(Vec::new())),
            wake,
        }
    }

    /// Moves queued samples into `observer`, in arrival order.
    ///
    /// Returns `true` if any sample is waiting for a frame afterwards.
    pub fn drain_into(&self, observer: &mut VisibilityObserver) -> bool {
        let samples = core::mem::take(&mut *self.samples.borrow_mut());
        for (region, ratio) in samples {
            observer.report_ratio(region, ratio);
        }
        observer.has_pending()
    }

    fn subscribe(
        &self,
        region: RegionId,
        target: &Element,
        options: RegionOptions,
    ) -> Result<Subscription, JsValue> {
        let samples = Rc::clone(&self.samples);
        let wake = self.wake.clone();
        let closure = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
            let mut queue = samples.borrow_mut();
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                queue.push((region, entry.intersection_ratio()));
            }
            drop(queue);
            if let Some(wake) = &wake {
                wake.request();
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&format!("{}px", options.margin));
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)?;
        observer.observe(target);
        Ok(Subscription {
            observer,
            _closure: closure,
        })
    }
}

impl IntersectionHost for DomIntersectionHost {
    type Target = Element;

    fn observe(&mut self, region: RegionId, target: &Element, options: RegionOptions) {
        match self.subscribe(region, target, options) {
            Ok(subscription) => {
                self.subscriptions.insert(region, subscription);
            }
            Err(_) => {
                // No observer support: show the content rather than leaving
                // it stuck at its initial style.
                self.samples.borrow_mut().push((region, 1.0));
                if let Some(wake) = &self.wake {
                    wake.request();
                }
            }
        }
    }

    fn unobserve(&mut self, region: RegionId) {
        if let Some(subscription) = self.subscriptions.remove(&region) {
            subscription.observer.disconnect();
        }
        self.samples.borrow_mut().retain(|(r, _)| *r != region);
    }
}

impl Drop for DomIntersectionHost {
    fn drop(&mut self) {
        for subscription in self.subscriptions.values() {
            subscription.observer.disconnect();
        }
    }
}

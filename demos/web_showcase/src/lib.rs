// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Promotional page showcase.
//!
//! Builds a page with three scroll-triggered sections, a filterable product
//! carousel with prev/next paging, a video with a custom scrubber over a
//! scroll-linked parallax background, and a backdrop that follows the
//! pointer. Everything runs off one on-demand
//! [`RafLoop`]: event handlers update controllers and request a frame, and
//! the frame callback applies styles and keeps running only while something
//! is still moving.
//!
//! Build with: `wasm-pack build --target web demos/web_showcase`
//! Then serve `demos/web_showcase/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Rect};
use reveal_backend_web::{
    DomIntersectionHost, DomMediaHost, DomScrollHost, FrameRequester, Listener, PlayOutcomes,
    RafLoop, apply_style, client_rect,
};
use reveal_core::animation::{AnimationController, AnimationScope, Replay, ScopeTransition};
use reveal_core::carousel::{CarouselController, CarouselGeometry, Direction};
use reveal_core::frame::FrameTick;
use reveal_core::pointer::PointerTracker;
use reveal_core::scroll_progress::ScrollProgress;
use reveal_core::scrubber::{ScrubberController, Track, format_timestamp};
use reveal_core::variant::{VariantName, VariantRegistry};
use reveal_core::visibility::{RegionId, RegionOptions, VisibilityChange, VisibilityObserver};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlButtonElement, HtmlElement, HtmlVideoElement, MouseEvent};

const VIDEO_URL: &str = "https://github.com/vidanov/video/raw/master/test_files/1080p50.mp4";

const SECTIONS: [(&str, VariantName, usize, Replay); 3] = [
    ("Built for speed", VariantName::FadeInUp, 1, Replay::Once),
    ("Everything you need", VariantName::StaggerChildren, 4, Replay::Always),
    ("See it in action", VariantName::ScaleIn, 1, Replay::Always),
];

const PRODUCTS: [(&str, &str); 9] = [
    ("Aurora", "audio"),
    ("Basalt", "video"),
    ("Cirrus", "audio"),
    ("Dune", "lighting"),
    ("Ember", "video"),
    ("Fjord", "lighting"),
    ("Glacier", "audio"),
    ("Halo", "lighting"),
    ("Iris", "video"),
];

struct Section {
    region: RegionId,
    children: Vec<HtmlElement>,
}

struct CarouselUi {
    prev: HtmlButtonElement,
    next: HtmlButtonElement,
    cards: Vec<(HtmlElement, &'static str)>,
}

struct ScrubberUi {
    play: HtmlButtonElement,
    mute: HtmlButtonElement,
    track: HtmlElement,
    fill: HtmlElement,
    time: HtmlElement,
}

struct Page {
    observer: VisibilityObserver,
    intersection: DomIntersectionHost,
    animations: AnimationController,
    sections: Vec<Section>,
    carousel: CarouselController<DomScrollHost>,
    carousel_ui: CarouselUi,
    scrubber: ScrubberController<DomMediaHost>,
    play_outcomes: PlayOutcomes,
    scrubber_ui: ScrubberUi,
    pointer: PointerTracker,
    backdrop: HtmlElement,
    parallax: ScrollProgress,
    parallax_layer: HtmlElement,
    changes: Vec<VisibilityChange>,
    transitions: Vec<(RegionId, ScopeTransition)>,
    wake: FrameRequester,
}

impl Page {
    /// Frame callback. Returns whether another frame is needed.
    fn on_frame(&mut self, tick: FrameTick) -> bool {
        // 1. Visibility → scope transitions → child styles.
        self.intersection.drain_into(&mut self.observer);
        self.changes.clear();
        self.observer.flush(&tick, &mut self.changes);
        self.transitions.clear();
        self.animations
            .apply(&self.changes, tick.now, &mut self.transitions);
        for section in &self.sections {
            let Some(scope) = self.animations.scope(section.region) else {
                continue;
            };
            for (i, el) in section.children.iter().enumerate() {
                apply_style(el, &scope.child_style(i, tick.now));
            }
        }

        // 2. Settled playback starts and drag seeks.
        for (ticket, outcome) in self.play_outcomes.drain() {
            self.scrubber.on_play_settled(ticket, outcome);
        }
        self.scrubber.on_frame(&tick);
        self.render_scrubber();

        // 3. Pointer-following backdrop.
        if self.pointer.on_frame(&tick).is_some()
            && let Some(at) = self.pointer.normalized(client_rect(&self.backdrop))
        {
            let _ = self.backdrop.style().set_property(
                "background-position",
                &format!("{:.1}% {:.1}%", at.x * 100.0, at.y * 100.0),
            );
        }

        // 4. Parallax background, 0% to 50% over the section's pass.
        if let Some(y) = self.parallax.on_frame(&tick) {
            let _ = self
                .parallax_layer
                .style()
                .set_property("background-position", &format!("50% {y:.2}%"));
        }

        self.animations.is_animating(tick.now)
            || self.observer.has_pending()
            || self.scrubber.is_dragging()
    }

    fn on_page_scroll(&mut self) {
        if self
            .parallax
            .on_scroll(client_rect(&self.parallax_layer), viewport())
        {
            self.wake.request();
        }
    }

    fn render_carousel(&self, geometry: CarouselGeometry) {
        self.carousel_ui.prev.set_disabled(!geometry.can_scroll_prev);
        self.carousel_ui.next.set_disabled(!geometry.can_scroll_next);
    }

    fn render_scrubber(&self) {
        let state = self.scrubber.state();
        let ui = &self.scrubber_ui;
        let _ = ui
            .fill
            .style()
            .set_property("width", &format!("{:.2}%", state.progress_percent()));
        let duration = state.duration_secs.unwrap_or(f64::NAN);
        ui.time.set_text_content(Some(&format!(
            "{} / {}",
            format_timestamp(state.current_secs),
            format_timestamp(duration),
        )));
        let label = if state.is_playing || self.scrubber.is_starting() {
            "Pause"
        } else {
            "Play"
        };
        ui.play.set_text_content(Some(label));
        ui.mute
            .set_text_content(Some(if state.is_muted { "Unmute" } else { "Mute" }));
    }

    fn track(&self) -> Track {
        let rect = client_rect(&self.scrubber_ui.track);
        Track {
            left: rect.x0,
            width: rect.width(),
        }
    }

    fn filter(&mut self, category: Option<&str>) {
        for (card, tag) in &self.carousel_ui.cards {
            let shown = category.is_none_or(|c| c == *tag);
            let _ = card
                .style()
                .set_property("display", if shown { "flex" } else { "none" });
        }
        if let Some(geometry) = self.carousel.on_items_changed() {
            self.render_carousel(geometry);
        }
    }
}

/// Entry point for the showcase.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    // The frame callback needs the page and the page's hosts need the loop.
    let slot: Rc<RefCell<Option<Page>>> = Rc::new(RefCell::new(None));
    let raf = {
        let slot = Rc::clone(&slot);
        RafLoop::new(move |tick| {
            slot.borrow_mut()
                .as_mut()
                .is_some_and(|page| page.on_frame(tick))
        })
    };
    let wake = raf.requester();

    let backdrop = element(&document, "div")?;
    style(
        &backdrop,
        "min-height: 100vh; background: radial-gradient(circle, #1d6f8a 0%, #0b1024 45%) no-repeat; background-size: 220% 220%; color: #eef4ff; font: 16px/1.5 system-ui, sans-serif;",
    )?;
    body.append_child(&backdrop)?;

    // -- sections --------------------------------------------------------
    let registry = VariantRegistry::standard();
    let mut intersection = DomIntersectionHost::new(Some(wake.clone()));
    let mut observer = VisibilityObserver::new();
    let mut animations = AnimationController::new();
    let mut sections = Vec::new();
    for (title, variant, children, replay) in SECTIONS {
        let section = element(&document, "section")?;
        style(
            &section,
            "min-height: 90vh; display: grid; gap: 16px; align-content: center; justify-items: center; padding: 48px;",
        )?;
        let mut items = Vec::new();
        for i in 0..children {
            let item = element(&document, "div")?;
            style(
                &item,
                "padding: 20px 28px; border-radius: 16px; background: rgba(255,255,255,0.08); will-change: opacity, transform;",
            )?;
            let label = if children == 1 {
                String::from(title)
            } else {
                format!("{title} · {}", i + 1)
            };
            item.set_text_content(Some(&label));
            section.append_child(&item)?;
            items.push(item);
        }
        backdrop.append_child(&section)?;

        let region = observer.observe(&mut intersection, &section, RegionOptions::section());
        let scope = AnimationScope::new(registry.resolve(variant), children, replay);
        for (i, item) in items.iter().enumerate() {
            apply_style(item, &scope.child_style(i, reveal_backend_web::now()));
        }
        animations.mount(region, scope);
        sections.push(Section {
            region,
            children: items,
        });
    }

    // -- carousel --------------------------------------------------------
    let carousel_section = element(&document, "section")?;
    style(&carousel_section, "padding: 48px; display: grid; gap: 12px;")?;
    let filters = element(&document, "div")?;
    style(&filters, "display: flex; gap: 8px;")?;
    carousel_section.append_child(&filters)?;
    let strip = element(&document, "div")?;
    style(
        &strip,
        "display: flex; gap: 16px; overflow-x: auto; scroll-snap-type: x mandatory;",
    )?;
    let mut cards = Vec::new();
    for (name, tag) in PRODUCTS {
        let card = element(&document, "div")?;
        style(
            &card,
            "flex: 0 0 260px; height: 160px; display: flex; align-items: end; padding: 16px; border-radius: 14px; background: rgba(255,255,255,0.1); scroll-snap-align: start;",
        )?;
        card.set_text_content(Some(name));
        strip.append_child(&card)?;
        cards.push((card, tag));
    }
    carousel_section.append_child(&strip)?;
    let nav = element(&document, "div")?;
    style(&nav, "display: flex; gap: 8px; justify-content: end;")?;
    let prev = button(&document, "‹")?;
    let next = button(&document, "›")?;
    nav.append_child(&prev)?;
    nav.append_child(&next)?;
    carousel_section.append_child(&nav)?;
    backdrop.append_child(&carousel_section)?;

    let mut carousel = CarouselController::new();
    let geometry = carousel.attach(DomScrollHost::new(strip.clone().into()));

    // -- video + scrubber -------------------------------------------------
    let media_section = element(&document, "section")?;
    style(
        &media_section,
        "padding: 48px; display: grid; gap: 12px; justify-items: center; background: linear-gradient(180deg, #0b1024 0%, #12344a 50%, #0b1024 100%) no-repeat; background-size: 100% 150%;",
    )?;
    let video: HtmlVideoElement = document.create_element("video")?.unchecked_into();
    video.set_src(VIDEO_URL);
    video.set_controls(false);
    video.set_preload("metadata");
    video.set_attribute("playsinline", "")?;
    style(&video, "width: 848px; max-width: 100%; border-radius: 14px;")?;
    media_section.append_child(&video)?;

    let controls = element(&document, "div")?;
    style(
        &controls,
        "width: 848px; max-width: 100%; display: grid; grid-template-columns: auto 1fr auto auto; gap: 12px; align-items: center;",
    )?;
    let play = button(&document, "Play")?;
    let track = element(&document, "div")?;
    style(
        &track,
        "height: 10px; border-radius: 999px; background: rgba(255,255,255,0.18); overflow: hidden; cursor: pointer;",
    )?;
    let fill = element(&document, "div")?;
    style(
        &fill,
        "width: 0%; height: 100%; background: linear-gradient(90deg, #0f5d71, #22b4b9); pointer-events: none;",
    )?;
    track.append_child(&fill)?;
    let time = element(&document, "span")?;
    style(&time, "font: 12px ui-monospace, monospace;")?;
    let mute = button(&document, "Mute")?;
    controls.append_child(&play)?;
    controls.append_child(&track)?;
    controls.append_child(&time)?;
    controls.append_child(&mute)?;
    media_section.append_child(&controls)?;
    backdrop.append_child(&media_section)?;

    let media_host = DomMediaHost::new(video.clone().into(), Some(wake.clone()));
    let play_outcomes = media_host.outcomes();
    let mut scrubber = ScrubberController::new();
    scrubber.attach(media_host);

    let mut page = Page {
        observer,
        intersection,
        animations,
        sections,
        carousel,
        carousel_ui: CarouselUi { prev, next, cards },
        scrubber,
        play_outcomes,
        scrubber_ui: ScrubberUi {
            play,
            mute,
            track,
            fill,
            time,
        },
        pointer: PointerTracker::new(),
        backdrop: backdrop.clone(),
        parallax: ScrollProgress::new(0.0, 50.0),
        parallax_layer: media_section,
        changes: Vec::new(),
        transitions: Vec::new(),
        wake,
    };
    page.render_carousel(geometry);
    page.render_scrubber();
    page.on_page_scroll();

    let mut listeners = Vec::new();
    bind_carousel(&slot, &page, &document, &filters, &strip, &mut listeners)?;
    bind_scrubber(&slot, &page, &video, &window, &mut listeners)?;
    listeners.push(on(&slot, &backdrop, "mousemove", |page, event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>()
            && page.pointer.on_pointer_move(client_point(mouse))
        {
            page.wake.request();
        }
    })?);
    listeners.push(on(&slot, &window, "scroll", |page, _| page.on_page_scroll())?);
    listeners.push(on(&slot, &window, "resize", |page, _| page.on_page_scroll())?);

    *slot.borrow_mut() = Some(page);
    raf.request();

    // Keep the loop and the listeners alive; there is no teardown on the web.
    core::mem::forget(raf);
    core::mem::forget(listeners);

    Ok(())
}

fn bind_carousel(
    slot: &Rc<RefCell<Option<Page>>>,
    page: &Page,
    document: &Document,
    filters: &HtmlElement,
    strip: &HtmlElement,
    listeners: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    listeners.push(on(slot, strip, "scroll", |page, _| {
        if let Some(geometry) = page.carousel.on_scroll() {
            page.render_carousel(geometry);
        }
    })?);
    listeners.push(on(slot, &page.carousel_ui.prev, "click", |page, _| {
        page.carousel.page_scroll(Direction::Prev);
    })?);
    listeners.push(on(slot, &page.carousel_ui.next, "click", |page, _| {
        page.carousel.page_scroll(Direction::Next);
    })?);
    if let Some(window) = web_sys::window() {
        listeners.push(on(slot, &window, "resize", |page, _| {
            if let Some(geometry) = page.carousel.on_resize() {
                page.render_carousel(geometry);
            }
        })?);
    }

    let categories: [(&str, Option<&'static str>); 4] = [
        ("All", None),
        ("Audio", Some("audio")),
        ("Video", Some("video")),
        ("Lighting", Some("lighting")),
    ];
    for (label, category) in categories {
        let chip = button(document, label)?;
        filters.append_child(&chip)?;
        listeners.push(on(slot, &chip, "click", move |page, _| {
            page.filter(category);
        })?);
    }
    Ok(())
}

fn bind_scrubber(
    slot: &Rc<RefCell<Option<Page>>>,
    page: &Page,
    video: &HtmlVideoElement,
    window: &web_sys::Window,
    listeners: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    let ui = &page.scrubber_ui;
    listeners.push(on(slot, &ui.play, "click", |page, _| {
        page.scrubber.toggle_playback();
        page.render_scrubber();
    })?);
    listeners.push(on(slot, &ui.mute, "click", |page, _| {
        page.scrubber.toggle_mute();
        page.render_scrubber();
    })?);

    let media = video.clone();
    listeners.push(on(slot, video, "timeupdate", move |page, _| {
        let duration = media.duration();
        page.scrubber
            .on_playhead_update(media.current_time(), Some(duration));
        page.render_scrubber();
    })?);
    let media = video.clone();
    listeners.push(on(slot, video, "loadedmetadata", move |page, _| {
        page.scrubber
            .on_playhead_update(media.current_time(), Some(media.duration()));
        page.render_scrubber();
    })?);
    // The media can change state without the play button: system media
    // keys, picture-in-picture controls, the browser suspending playback.
    listeners.push(on(slot, video, "pause", |page, _| {
        page.scrubber.on_host_paused();
        page.render_scrubber();
    })?);
    listeners.push(on(slot, video, "play", |page, _| {
        page.scrubber.on_host_played();
        page.render_scrubber();
    })?);
    listeners.push(on(slot, video, "ended", |page, _| {
        page.scrubber.on_ended();
        page.render_scrubber();
    })?);

    // Drag-seek: press on the track, follow the pointer anywhere on the page.
    listeners.push(on(slot, &ui.track, "mousedown", |page, event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            let track = page.track();
            page.scrubber.begin_drag(f64::from(mouse.client_x()), track);
            page.render_scrubber();
        }
    })?);
    listeners.push(on(slot, window, "mousemove", |page, event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>()
            && page.scrubber.drag_to(f64::from(mouse.client_x()))
        {
            page.wake.request();
        }
    })?);
    listeners.push(on(slot, window, "mouseup", |page, event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            page.scrubber.end_drag(f64::from(mouse.client_x()));
            page.render_scrubber();
        }
    })?);
    listeners.push(on(slot, window, "blur", |page, _| {
        page.scrubber.cancel_drag();
    })?);
    Ok(())
}

/// Subscribes `handler` to `event` on `target`, with mutable access to the
/// page. Events that arrive before the page exists are dropped.
fn on(
    slot: &Rc<RefCell<Option<Page>>>,
    target: &web_sys::EventTarget,
    event: &str,
    mut handler: impl FnMut(&mut Page, &Event) + 'static,
) -> Result<Listener, JsValue> {
    let slot = Rc::clone(slot);
    Listener::new(target, event, move |e: Event| {
        if let Some(page) = slot.borrow_mut().as_mut() {
            handler(page, &e);
        }
    })
}

fn client_point(mouse: &MouseEvent) -> Point {
    Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()))
}

fn viewport() -> Rect {
    let Some(window) = web_sys::window() else {
        return Rect::ZERO;
    };
    let size = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Rect::new(0.0, 0.0, size(window.inner_width()), size(window.inner_height()))
}

fn element(doc: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(doc.create_element(tag)?.unchecked_into())
}

fn button(doc: &Document, label: &str) -> Result<HtmlButtonElement, JsValue> {
    let button: HtmlButtonElement = doc.create_element("button")?.unchecked_into();
    button.set_text_content(Some(label));
    style(
        &button,
        "border: 0; border-radius: 999px; padding: 8px 16px; background: #0f5d71; color: #eff8ff; font-weight: 600; cursor: pointer;",
    )?;
    Ok(button)
}

fn style(el: &web_sys::Element, css: &str) -> Result<(), JsValue> {
    el.set_attribute("style", css)
}

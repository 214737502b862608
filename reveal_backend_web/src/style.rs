// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writing sampled [`StyleState`]s to elements.

use alloc::format;
use alloc::string::String;

use web_sys::HtmlElement;

use reveal_core::variant::StyleState;

/// CSS `transform` value for `style`.
#[must_use]
pub fn css_transform(style: &StyleState) -> String {
    format!("translateY({}px) scale({})", style.translate_y, style.scale)
}

/// Applies opacity and transform inline.
pub fn apply_style(el: &HtmlElement, style: &StyleState) {
    let s = el.style();
    let _ = s.set_property("opacity", &format!("{}", style.opacity));
    let _ = s.set_property("transform", &css_transform(style));
}

/// Removes the inline properties written by [`apply_style`].
pub fn clear_style(el: &HtmlElement) {
    let s = el.style();
    let _ = s.remove_property("opacity");
    let _ = s.remove_property("transform");
}

// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small DOM helpers shared by the feature installers.

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    CssStyleDeclaration, Document, Element, Event, EventTarget, HtmlElement, NodeList, Window,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    fn performance_now() -> f64;
}

/// Host time in whole milliseconds, as the slideshow expects it.
#[expect(
    clippy::cast_possible_truncation,
    reason = "performance.now() is a small non-negative millisecond count"
)]
pub(crate) fn now_ms() -> u64 {
    performance_now().max(0.0) as u64
}

/// Everything a feature installer needs from the page.
#[derive(Clone, Debug)]
pub(crate) struct Page {
    pub(crate) window: Window,
    pub(crate) document: Document,
    /// `prefers-reduced-motion: reduce`, captured once at startup.
    pub(crate) reduced_motion: bool,
}

impl Page {
    pub(crate) fn new(window: Window, document: Document) -> Self {
        let reduced_motion = window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches());
        Self {
            window,
            document,
            reduced_motion,
        }
    }

    pub(crate) fn query(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    pub(crate) fn query_all(&self, selector: &str) -> Vec<HtmlElement> {
        self.document
            .query_selector_all(selector)
            .map(|list| html_elements(&list))
            .unwrap_or_default()
    }

    /// Whether the browser exposes `IntersectionObserver`.
    pub(crate) fn has_intersection_observer(&self) -> bool {
        js_sys::Reflect::has(&self.window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false)
    }

    /// Run `f` once after `delay_ms`.
    pub(crate) fn after(&self, delay_ms: u32, f: impl FnOnce() + 'static) -> Result<i32, JsValue> {
        let callback = Closure::once_into_js(f);
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                clamp_delay(u64::from(delay_ms)),
            )
    }
}

pub(crate) fn html_elements(list: &NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Child element of `parent` matching `:scope > selector`.
pub(crate) fn child(parent: &Element, selector: &str) -> Option<HtmlElement> {
    parent
        .query_selector(&format!(":scope > {selector}"))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Attach `handler` for the page's lifetime.
pub(crate) fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// `setTimeout` takes a signed 32-bit delay.
pub(crate) fn clamp_delay(delay_ms: u64) -> i32 {
    i32::try_from(delay_ms).unwrap_or(i32::MAX)
}

/// Inline style overrides that are rolled back when dropped.
///
/// Used to lay out a hidden element for measurement without it flashing on
/// screen. The overrides are removed even if measuring fails halfway.
#[derive(Debug)]
pub(crate) struct StyleOverride {
    style: CssStyleDeclaration,
}

impl StyleOverride {
    /// Properties set while a hidden flyout is measured.
    const MEASURE: [(&'static str, &'static str); 4] = [
        ("visibility", "hidden"),
        ("opacity", "0"),
        ("transform", "translateY(0)"),
        ("display", "block"),
    ];

    /// Make `el` measurable if its computed style hides it.
    ///
    /// Returns `None` when the element is already laid out and nothing had to
    /// be overridden.
    pub(crate) fn measurable(window: &Window, el: &HtmlElement) -> Result<Option<Self>, JsValue> {
        let hidden = window
            .get_computed_style(el)?
            .map(|computed| computed.get_property_value("visibility"))
            .transpose()?
            .is_some_and(|visibility| visibility == "hidden");
        if !hidden {
            return Ok(None);
        }
        let guard = Self { style: el.style() };
        for (name, value) in Self::MEASURE {
            guard.style.set_property(name, value)?;
        }
        Ok(Some(guard))
    }
}

impl Drop for StyleOverride {
    fn drop(&mut self) {
        for (name, _) in Self::MEASURE {
            if let Err(err) = self.style.remove_property(name) {
                tracing::warn!(property = name, error = ?err, "could not restore inline style");
            }
        }
    }
}

/// Read the viewport the menu cares about.
pub(crate) fn viewport(window: &Window, main_nav: &Element) -> vitrine_menu::Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0);
    #[expect(
        clippy::cast_possible_truncation,
        reason = "CSS pixel widths fit comfortably in u32"
    )]
    let width = width.max(0.0) as u32;
    vitrine_menu::Viewport::new(width).with_forced_open(main_nav.class_list().contains("active"))
}

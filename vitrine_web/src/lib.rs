// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Web: wires the Vitrine state machines to a marketing page.
//!
//! On start this crate looks for the page's navigation, hero banner,
//! statistics, and fade-in elements and installs each feature on its own. A
//! feature whose markup is missing stays off; a feature that fails to install
//! is logged and does not stop the others.
//!
//! | Feature | Markup | State |
//! |---|---|---|
//! | Menu | `#main-nav`, `.has-dropdown`, `.has-flyout`, `#nav-toggle`, `#site-header` | [`vitrine_menu::MenuController`] |
//! | Hero | `.hero`, `.hero-fader`, `.hero-nav.prev`, `.hero-nav.next` | [`vitrine_slideshow::SlideshowController`] |
//! | Hero intro | `.hero h1`, `.hero p`, `.hero .btn-primary` | [`vitrine_effects::StaggerGroup`] |
//! | Stats | `#clients`, `#assets`, `#projects`, `#companies`, `.stat svg` | [`vitrine_effects::StatBoard`] |
//! | Reveals | `.fade-up`, `.testimonial` | [`vitrine_effects::RevealTracker`] |
//!
//! Build with: `wasm-pack build --target web vitrine_web`

#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

mod dom;
mod hero;
mod menu;
mod reveal;
mod stats;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;

use crate::dom::Page;

fn init_diagnostics() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }
}

fn install(feature: &'static str, page: &Page, f: fn(&Page) -> Result<(), JsValue>) {
    match f(page) {
        Ok(()) => tracing::trace!(feature, "feature installed"),
        Err(err) => tracing::warn!(feature, error = ?err, "feature failed to install"),
    }
}

fn bootstrap(page: &Page) {
    install("menu", page, menu::install);
    install("hero", page, hero::install);
    install("hero-intro", page, hero::install_intro);
    install("stats", page, stats::install);
    install("reveal", page, reveal::install);
}

/// Entry point: install every page feature once the document is parsed.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn start() -> Result<(), JsValue> {
    init_diagnostics();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let page = Page::new(window, document);
    tracing::debug!(reduced_motion = page.reduced_motion, "vitrine starting");

    if page.document.ready_state() == "loading" {
        let deferred = page.clone();
        let ready = wasm_bindgen::closure::Closure::once_into_js(move || bootstrap(&deferred));
        page.document
            .add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())?;
    } else {
        bootstrap(&page);
    }
    Ok(())
}

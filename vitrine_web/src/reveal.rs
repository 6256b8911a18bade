// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fade-in on scroll for `.fade-up` elements and testimonial cards.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use vitrine_effects::{Reveal, RevealTracker, STAGGER_THRESHOLD, StaggerGroup};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::dom::Page;

type ObserverClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;

fn observer(threshold: f64, callback: ObserverClosure) -> Result<IntersectionObserver, JsValue> {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    Ok(observer)
}

fn entries(list: &Array) -> impl Iterator<Item = IntersectionObserverEntry> + '_ {
    list.iter()
        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
}

fn show(el: &HtmlElement, reveal: &Reveal<usize>, transition_secs: f64) -> Result<(), JsValue> {
    if reveal.animate {
        let style = el.style();
        style.set_property(
            "transition",
            &format!(
                "opacity {transition_secs}s cubic-bezier(0.25, 0.1, 0.25, 1), \
                 transform {transition_secs}s cubic-bezier(0.25, 0.1, 0.25, 1)"
            ),
        )?;
        style.set_property("transition-delay", &format!("{}s", reveal.delay_secs))?;
    }
    el.class_list().add_1("visible")
}

/// Install both reveal effects.
pub(crate) fn install(page: &Page) -> Result<(), JsValue> {
    install_fade_ups(page)?;
    install_testimonials(page)
}

fn install_fade_ups(page: &Page) -> Result<(), JsValue> {
    let elements = page.query_all(".fade-up");
    if elements.is_empty() {
        return Ok(());
    }

    let mut tracker = RevealTracker::new(page.reduced_motion, page.has_intersection_observer());
    let transition_secs = tracker.config().transition_secs;
    for (id, el) in elements.iter().enumerate() {
        let delay = el
            .get_attribute("data-anim-delay")
            .and_then(|d| d.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        if let Some(reveal) = tracker.track(id, delay) {
            show(el, &reveal, transition_secs)?;
        }
    }
    if !tracker.needs_observer() {
        return Ok(());
    }

    let threshold = tracker.config().threshold;
    let tracker = Rc::new(RefCell::new(tracker));
    let targets = Rc::new(elements);
    let observed = Rc::clone(&targets);
    let callback = Closure::wrap(Box::new(move |list: Array, observer: IntersectionObserver| {
        for entry in entries(&list) {
            let target = entry.target();
            let target_js: &JsValue = target.as_ref();
            let Some(id) = observed.iter().position(|el| {
                let el: &JsValue = el.as_ref();
                el == target_js
            }) else {
                continue;
            };
            let Some(reveal) = tracker
                .borrow_mut()
                .on_intersect(&id, entry.is_intersecting())
            else {
                continue;
            };
            if let Err(err) = show(&observed[id], &reveal, transition_secs) {
                tracing::warn!(error = ?err, "reveal failed");
            }
            observer.unobserve(&target);
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let observer = observer(threshold, callback)?;
    for el in targets.iter() {
        observer.observe(el);
    }
    tracing::debug!(elements = targets.len(), "fade-up reveals observed");
    Ok(())
}

fn install_testimonials(page: &Page) -> Result<(), JsValue> {
    let cards = page.query_all(".testimonial");
    let mut group = StaggerGroup::new(0..cards.len());
    let Some(&sentinel) = group.sentinel() else {
        return Ok(());
    };
    let sentinel = cards[sentinel].clone();

    let has_observer = page.has_intersection_observer();
    let page = page.clone();
    let mut schedule = move |is_intersecting: bool| -> bool {
        let plan = group.on_intersect(is_intersecting);
        for &(index, delay_ms) in &plan {
            let card = cards[index].clone();
            let armed = page.after(delay_ms, move || {
                if let Err(err) = card.class_list().add_1("visible") {
                    tracing::warn!(error = ?err, "testimonial reveal failed");
                }
            });
            if let Err(err) = armed {
                tracing::warn!(error = ?err, "could not schedule testimonial reveal");
            }
        }
        !plan.is_empty()
    };

    if !has_observer {
        schedule(true);
        return Ok(());
    }

    let callback = Closure::wrap(Box::new(move |list: Array, observer: IntersectionObserver| {
        for entry in entries(&list) {
            if schedule(entry.is_intersecting()) {
                observer.disconnect();
                break;
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);
    observer(STAGGER_THRESHOLD, callback)?.observe(&sentinel);
    Ok(())
}

// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hero banner crossfade slideshow.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vitrine_effects::StaggerGroup;
use vitrine_slideshow::{
    Direction, SlideEvent, SlideEvents, SlideshowConfig, SlideshowController, TransitionId,
};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, HtmlElement, KeyboardEvent, PageTransitionEvent};

use crate::dom::{self, Page};

/// Images cycled through by the hero banner.
pub(crate) const HERO_SLIDES: [&str; 3] = [
    "assets/hero-office.png",
    "assets/hero-meeting.png",
    "assets/hero-sofa.png",
];

/// Delay before the first line of the hero copy rises into place.
const INTRO_OFFSET_MS: u32 = 200;

type Slideshow = SlideshowController<&'static str>;
type EventClosure = Closure<dyn FnMut(Event)>;

struct Hero {
    page: Page,
    show: RefCell<Slideshow>,
    /// Carries the committed slide in its `--hero-bg` custom property.
    banner: HtmlElement,
    /// Overlay that fades the incoming slide in.
    fader: HtmlElement,
    /// The single pending `setTimeout`, if any.
    timer: Cell<Option<i32>>,
    wake: RefCell<Option<Closure<dyn FnMut()>>>,
    /// `transitionend` listener for the crossfade in flight.
    transition_end: RefCell<Option<EventClosure>>,
}

impl core::fmt::Debug for Hero {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hero")
            .field("show", &self.show)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

fn css_url(src: &str) -> String {
    format!("url('{src}')")
}

impl Hero {
    /// Run `f` against the controller, present what it produced, and re-arm
    /// the timer for whatever deadline is now next.
    fn drive(self: &Rc<Self>, f: impl FnOnce(&mut Slideshow, u64) -> SlideEvents) {
        let events = f(&mut self.show.borrow_mut(), dom::now_ms());
        for event in events {
            if let Err(err) = self.present(event) {
                tracing::warn!(error = ?err, "slide presentation failed");
            }
        }
        self.reschedule();
    }

    fn present(self: &Rc<Self>, event: SlideEvent) -> Result<(), JsValue> {
        match event {
            SlideEvent::CrossfadeStarted { transition, target } => {
                let src = self.slide(target);
                self.fader
                    .style()
                    .set_property("background-image", &css_url(src))?;
                self.arm_transition_end(transition)?;
                self.fader.class_list().add_1("show")?;
            }
            SlideEvent::Committed { index, .. } => {
                self.disarm_transition_end();
                let src = self.slide(index);
                self.banner
                    .style()
                    .set_property("--hero-bg", &css_url(src))?;
                self.fader.class_list().remove_1("show")?;
            }
        }
        Ok(())
    }

    fn slide(&self, index: usize) -> &'static str {
        self.show.borrow().slide(index).copied().unwrap_or_default()
    }

    /// Listen once for the end of the fade belonging to `transition`.
    fn arm_transition_end(self: &Rc<Self>, transition: TransitionId) -> Result<(), JsValue> {
        self.disarm_transition_end();
        let hero = Rc::downgrade(self);
        let closure = Closure::wrap(Box::new(move |_: Event| {
            if let Some(hero) = hero.upgrade() {
                hero.drive(|show, _| show.on_transition_end(transition).into_iter().collect());
            }
        }) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        self.fader
            .add_event_listener_with_callback_and_add_event_listener_options(
                "transitionend",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
        *self.transition_end.borrow_mut() = Some(closure);
        Ok(())
    }

    fn disarm_transition_end(&self) {
        let previous = self.transition_end.borrow_mut().take();
        if let Some(closure) = previous
            && let Err(err) = self.fader.remove_event_listener_with_callback(
                "transitionend",
                closure.as_ref().unchecked_ref(),
            )
        {
            tracing::warn!(error = ?err, "could not detach transitionend listener");
        }
    }

    fn reschedule(&self) {
        if let Some(handle) = self.timer.take() {
            self.page.window.clear_timeout_with_handle(handle);
        }
        let Some(deadline) = self.show.borrow().next_deadline() else {
            return;
        };
        let delay = dom::clamp_delay(deadline.saturating_sub(dom::now_ms()));
        let wake = self.wake.borrow();
        let Some(wake) = wake.as_ref() else {
            return;
        };
        match self
            .page
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                wake.as_ref().unchecked_ref(),
                delay,
            ) {
            Ok(handle) => self.timer.set(Some(handle)),
            Err(err) => tracing::warn!(error = ?err, "could not arm the slideshow timer"),
        }
    }
}

/// Install the hero slideshow. Missing banner, overlay, or arrows disable it.
pub(crate) fn install(page: &Page) -> Result<(), JsValue> {
    let (Some(banner), Some(fader), Some(prev), Some(next)) = (
        page.query(".hero"),
        page.query(".hero .hero-fader"),
        page.query(".hero .hero-nav.prev"),
        page.query(".hero .hero-nav.next"),
    ) else {
        tracing::debug!("hero markup incomplete; slideshow disabled");
        return Ok(());
    };

    let config = SlideshowConfig::with_reduced_motion(page.reduced_motion);
    let show = SlideshowController::new(HERO_SLIDES, config)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    banner
        .style()
        .set_property("--hero-bg", &css_url(show.current_slide()))?;

    let hero = Rc::new(Hero {
        page: page.clone(),
        show: RefCell::new(show),
        banner,
        fader,
        timer: Cell::new(None),
        wake: RefCell::new(None),
        transition_end: RefCell::new(None),
    });

    let weak = Rc::downgrade(&hero);
    let wake = Closure::wrap(Box::new(move || {
        if let Some(hero) = weak.upgrade() {
            hero.timer.set(None);
            hero.drive(Slideshow::advance);
        }
    }) as Box<dyn FnMut()>);
    *hero.wake.borrow_mut() = Some(wake);

    for (button, direction) in [(prev, Direction::Previous), (next, Direction::Next)] {
        let h = Rc::clone(&hero);
        dom::listen(&button, "click", move |_| {
            h.drive(|show, now| show.navigate(direction, now).into_iter().collect());
        })?;
    }

    for kind in ["mouseenter", "focusin"] {
        let h = Rc::clone(&hero);
        dom::listen(&hero.banner, kind, move |_| {
            h.drive(|show, _| {
                show.interaction_started();
                SlideEvents::new()
            });
        })?;
    }
    for kind in ["mouseleave", "focusout"] {
        let h = Rc::clone(&hero);
        dom::listen(&hero.banner, kind, move |_| {
            h.drive(|show, now| {
                show.interaction_ended(now);
                SlideEvents::new()
            });
        })?;
    }

    let h = Rc::clone(&hero);
    dom::listen(&hero.banner, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        let mut prevent_default = false;
        h.drive(|show, now| {
            let outcome = show.handle_key(&key, now);
            prevent_default = outcome.prevent_default;
            outcome.event.into_iter().collect()
        });
        if prevent_default {
            event.prevent_default();
        }
    })?;
    let h = Rc::clone(&hero);
    dom::listen(&page.window, "pagehide", move |_| {
        h.drive(|show, _| show.shutdown().into_iter().collect());
    })?;
    // A page restored from the back/forward cache keeps its old state.
    let h = Rc::clone(&hero);
    dom::listen(&page.window, "pageshow", move |event| {
        let restored = event
            .dyn_ref::<PageTransitionEvent>()
            .is_some_and(PageTransitionEvent::persisted);
        if restored {
            h.drive(|show, now| {
                show.resume(now);
                SlideEvents::new()
            });
        }
    })?;
    hero.banner.set_attribute("tabindex", "-1")?;

    hero.drive(|show, now| {
        show.resume(now);
        SlideEvents::new()
    });
    tracing::debug!(
        slides = HERO_SLIDES.len(),
        reduced_motion = page.reduced_motion,
        "hero slideshow running"
    );
    Ok(())
}

/// Fade the hero heading, subheading and call to action in, one after another.
pub(crate) fn install_intro(page: &Page) -> Result<(), JsValue> {
    let (Some(heading), Some(subheading), Some(cta)) = (
        page.query(".hero h1"),
        page.query(".hero p"),
        page.query(".hero .btn-primary"),
    ) else {
        return Ok(());
    };
    if page.reduced_motion {
        return Ok(());
    }

    let lines = [heading, subheading, cta];
    for el in &lines {
        let style = el.style();
        style.set_property("opacity", "0")?;
        style.set_property("transform", "translateY(20px)")?;
    }
    let mut group = StaggerGroup::new(0..lines.len());
    for (index, delay_ms) in group.on_intersect(true) {
        let el = lines[index].clone();
        page.after(INTRO_OFFSET_MS + delay_ms, move || {
            if let Err(err) = rise(&el) {
                tracing::warn!(error = ?err, "hero intro failed");
            }
        })?;
    }
    Ok(())
}

fn rise(el: &HtmlElement) -> Result<(), JsValue> {
    let style = el.style();
    style.set_property("transition", "opacity 0.8s ease-out, transform 0.8s ease-out")?;
    style.set_property("opacity", "1")?;
    style.set_property("transform", "translateY(0)")
}

// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headline statistics, animated through the page's `countUp` global.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Array, Function, Object, Reflect};
use vitrine_effects::{CountUp, CountUpOptions, StatBoard, StatDisplay, StatSpec};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, SvgElement};

use crate::dom::Page;

/// How long a stat's icon stays highlighted.
const GLOW_MS: u32 = 1_500;

/// The page's statistics, keyed by element id.
fn site_stats() -> [StatSpec<String>; 4] {
    [
        StatSpec::counted("clients".into(), 1355),
        StatSpec::literal("assets".into(), "€550M+"),
        StatSpec::literal("projects".into(), "110+"),
        StatSpec::counted("companies".into(), 475),
    ]
}

#[derive(Debug)]
struct DomStats {
    document: Document,
}

impl StatDisplay<String> for DomStats {
    fn show(&mut self, id: &String, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

/// Binding to `window.countUp.CountUp`.
#[derive(Debug)]
struct JsCountUp {
    constructor: Function,
    board: Weak<RefCell<StatBoard<String>>>,
    page: Page,
}

impl JsCountUp {
    fn detect(page: &Page) -> Option<Function> {
        let namespace = Reflect::get(&page.window, &"countUp".into()).ok()?;
        if namespace.is_undefined() || namespace.is_null() {
            return None;
        }
        Reflect::get(&namespace, &"CountUp".into())
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }

    fn js_options(options: &CountUpOptions) -> Result<Object, JsValue> {
        let js = Object::new();
        Reflect::set(&js, &"duration".into(), &options.duration_secs.into())?;
        Reflect::set(
            &js,
            &"separator".into(),
            &JsValue::from_str(&options.separator.to_string()),
        )?;
        Reflect::set(&js, &"decimalPlaces".into(), &options.decimal_places.into())?;
        Ok(js)
    }
}

impl CountUp<String> for JsCountUp {
    type Error = JsValue;

    fn start(&mut self, id: &String, target: u64, options: &CountUpOptions) -> Result<(), JsValue> {
        let args = Array::of3(
            &JsValue::from_str(id),
            &JsValue::from_f64(target as f64),
            &Self::js_options(options)?.into(),
        );
        let counter = Reflect::construct(&self.constructor, &args)?;
        let error = Reflect::get(&counter, &"error".into())?;
        if error.is_truthy() {
            return Err(error);
        }

        let board = self.board.clone();
        let page = self.page.clone();
        let id = id.clone();
        // Completion may be reported from inside `start`, while the board is
        // still borrowed; settle on a fresh task instead.
        let done = Closure::once_into_js(move || {
            let deferred = page.clone();
            let settled = deferred.after(0, move || {
                let Some(board) = board.upgrade() else {
                    return;
                };
                match board.try_borrow_mut() {
                    Ok(mut board) => {
                        board.complete(&id, &mut DomStats { document: page.document });
                    }
                    Err(_) => tracing::warn!(id = %id, "stat completed while the board was busy"),
                }
            });
            if let Err(err) = settled {
                tracing::warn!(error = ?err, "could not schedule stat completion");
            }
        });
        let start: Function = Reflect::get(&counter, &"start".into())?.dyn_into()?;
        start.call1(&counter, &done)?;
        Ok(())
    }
}

/// Briefly highlight the icon of the stat card holding `el`.
fn glow_icon(page: &Page, el: &Element) -> Result<(), JsValue> {
    let Some(card) = el.closest(".stat")? else {
        return Ok(());
    };
    let Some(icon) = card
        .query_selector("svg")?
        .and_then(|icon| icon.dyn_into::<SvgElement>().ok())
    else {
        return Ok(());
    };
    icon.style().set_property("color", "var(--color-gold)")?;
    page.after(GLOW_MS, move || {
        if let Err(err) = icon.style().set_property("color", "var(--color-primary)") {
            tracing::warn!(error = ?err, "could not restore stat icon color");
        }
    })?;
    Ok(())
}

/// Start the statistics. Stats whose element is missing are skipped.
pub(crate) fn install(page: &Page) -> Result<(), JsValue> {
    let mut specs = Vec::new();
    for spec in site_stats() {
        let Some(el) = page.document.get_element_by_id(&spec.id) else {
            continue;
        };
        if let Err(err) = glow_icon(page, &el) {
            tracing::warn!(id = %spec.id, error = ?err, "stat icon glow failed");
        }
        specs.push(spec);
    }
    if specs.is_empty() {
        tracing::debug!("no stat elements; counters disabled");
        return Ok(());
    }

    let board = Rc::new(RefCell::new(StatBoard::new(specs)));
    let mut counter = JsCountUp::detect(page).map(|constructor| JsCountUp {
        constructor,
        board: Rc::downgrade(&board),
        page: page.clone(),
    });
    let mut display = DomStats {
        document: page.document.clone(),
    };
    let summary = board.borrow_mut().start(counter.as_mut(), &mut display);
    tracing::debug!(
        counting = summary.counting,
        settled = summary.settled,
        "stats started"
    );
    // Completion callbacks hold a weak handle; keep the board for the page's lifetime.
    std::mem::forget(board);
    Ok(())
}

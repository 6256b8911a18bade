// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Site navigation: dropdowns, flyouts, hamburger toggle, current page.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use vitrine_menu::{Branch, Expanded, MenuController, TriggerKey, VisualFlags, current};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, KeyboardEvent, Node};

use crate::dom::{self, Page, StyleOverride};

/// Branch ids are positions in [`MenuDom::items`].
type ItemId = usize;

/// One `<li>` that owns a dropdown or a flyout.
#[derive(Debug)]
struct MenuItem {
    li: HtmlElement,
    trigger: Option<HtmlElement>,
    /// The flyout panel, for second-level items.
    flyout: Option<HtmlElement>,
}

#[derive(Debug)]
struct MenuDom {
    page: Page,
    main_nav: HtmlElement,
    controller: MenuController<ItemId>,
    items: Vec<MenuItem>,
}

impl MenuDom {
    fn viewport(&self) -> vitrine_menu::Viewport {
        dom::viewport(&self.page.window, &self.main_nav)
    }

    fn apply(&self, changes: &[Expanded<ItemId>]) {
        for change in changes {
            let Some(item) = self.items.get(change.id) else {
                continue;
            };
            if let Err(err) = item.li.class_list().toggle_with_force("open", change.expanded) {
                tracing::warn!(error = ?err, "could not update menu class");
            }
            if let Some(trigger) = &item.trigger
                && let Err(err) = trigger.set_attribute("aria-expanded", change.aria_value())
            {
                tracing::warn!(error = ?err, "could not update aria-expanded");
            }
        }
    }

    fn activate(&mut self, id: ItemId, event: &Event) {
        let viewport = self.viewport();
        match self.controller.handle_primary_activate(&id, viewport) {
            Ok(activation) => {
                if activation.prevent_default {
                    event.prevent_default();
                }
                self.apply(&activation.changes);
            }
            Err(err) => tracing::warn!(id, %err, "menu activation failed"),
        }
    }

    fn key(&mut self, id: ItemId, event: &Event) {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        let viewport = self.viewport();
        match self
            .controller
            .handle_trigger_key(&id, TriggerKey::from_key(&key), viewport)
        {
            Ok(activation) => {
                if activation.prevent_default {
                    event.prevent_default();
                }
                self.apply(&activation.changes);
            }
            Err(err) => tracing::warn!(id, %err, "menu key handling failed"),
        }
    }

    /// Measure the flyout of `id` in its default alignment and flip it if it
    /// would spill past the right edge of the window.
    fn realign(&mut self, id: ItemId) -> Result<(), JsValue> {
        let viewport = self.viewport();
        let Some(flyout) = self.items.get(id).and_then(|item| item.flyout.clone()) else {
            return Ok(());
        };
        flyout.class_list().remove_1("align-right")?;
        let rect = {
            let _measuring = StyleOverride::measurable(&self.page.window, &flyout)?;
            let r = flyout.get_bounding_client_rect();
            Rect::new(r.left(), r.top(), r.right(), r.bottom())
        };
        self.controller
            .measure_overflow_and_realign(&id, rect, viewport)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let right = self
            .controller
            .visual_flags(&id)
            .is_some_and(|flags| flags.contains(VisualFlags::ALIGN_RIGHT));
        if right {
            flyout.class_list().add_1("align-right")?;
        }
        Ok(())
    }

    fn outside(&mut self, target: Option<Node>) {
        // Without a header there is no "outside" to speak of.
        let Some(header) = self.page.document.get_element_by_id("site-header") else {
            return;
        };
        let inside = header.contains(target.as_ref());
        let viewport = self.viewport();
        let changes = self.controller.handle_outside_interaction(inside, viewport);
        self.apply(&changes);
    }

    fn resized(&mut self) {
        let viewport = self.viewport();
        let changes = self.controller.handle_viewport_change(viewport);
        self.apply(&changes);
    }
}

/// Install the navigation menu. A page without `#main-nav` gets nothing.
pub(crate) fn install(page: &Page) -> Result<(), JsValue> {
    let Some(main_nav) = page
        .document
        .get_element_by_id("main-nav")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        tracing::debug!("no #main-nav; menu disabled");
        return Ok(());
    };

    let (structure, items) = discover(&main_nav)?;
    let controller =
        MenuController::new(&structure).map_err(|err| JsValue::from_str(&err.to_string()))?;
    for item in &items {
        if let Some(trigger) = &item.trigger {
            trigger.set_attribute("aria-expanded", "false")?;
        }
    }
    tracing::debug!(branches = items.len(), "menu discovered");

    let menu = Rc::new(RefCell::new(MenuDom {
        page: page.clone(),
        main_nav,
        controller,
        items,
    }));

    if let Some(toggle) = page.document.get_element_by_id("nav-toggle") {
        let m = Rc::clone(&menu);
        dom::listen(&toggle, "click", move |_| {
            let mut menu = m.borrow_mut();
            if let Err(err) = menu.main_nav.class_list().toggle("active") {
                tracing::warn!(error = ?err, "could not toggle the menu");
                return;
            }
            // Closing the hamburger on a wide window switches to desktop mode.
            menu.resized();
        })?;
    }

    let count = menu.borrow().items.len();
    for id in 0..count {
        let (li, trigger, has_flyout) = {
            let m = menu.borrow();
            let item = &m.items[id];
            (item.li.clone(), item.trigger.clone(), item.flyout.is_some())
        };
        if let Some(trigger) = &trigger {
            let m = Rc::clone(&menu);
            dom::listen(trigger, "click", move |event| m.borrow_mut().activate(id, &event))?;
            let m = Rc::clone(&menu);
            dom::listen(trigger, "keydown", move |event| m.borrow_mut().key(id, &event))?;
        }
        if has_flyout {
            let m = Rc::clone(&menu);
            let realign = move |_: Event| {
                if let Err(err) = m.borrow_mut().realign(id) {
                    tracing::warn!(error = ?err, "flyout measurement failed");
                }
            };
            dom::listen(&li, "mouseenter", realign.clone())?;
            if let Some(trigger) = &trigger {
                dom::listen(trigger, "focus", realign)?;
            }
        }
    }

    let m = Rc::clone(&menu);
    dom::listen(&page.document, "click", move |event| {
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        m.borrow_mut().outside(target);
    })?;
    let m = Rc::clone(&menu);
    dom::listen(&page.window, "resize", move |_| m.borrow_mut().resized())?;

    highlight_current(page)
}

/// Walk `#main-nav` and build the branch structure in document order.
fn discover(main_nav: &HtmlElement) -> Result<(Vec<Branch<ItemId>>, Vec<MenuItem>), JsValue> {
    let mut items = Vec::new();
    let mut structure = Vec::new();
    for dropdown in dom::html_elements(&main_nav.query_selector_all(".has-dropdown")?) {
        let id = items.len();
        items.push(MenuItem {
            trigger: dom::child(&dropdown, "a"),
            li: dropdown.clone(),
            flyout: None,
        });
        let mut children = Vec::new();
        let flyouts = dropdown.query_selector_all(".dropdown li.has-flyout")?;
        for flyout_li in dom::html_elements(&flyouts) {
            children.push(Branch::leaf(items.len()));
            items.push(MenuItem {
                trigger: dom::child(&flyout_li, "a"),
                flyout: dom::child(&flyout_li, ".flyout"),
                li: flyout_li,
            });
        }
        structure.push(Branch::with_children(id, children));
    }
    Ok((structure, items))
}

/// Mark navigation links that point at the current page.
fn highlight_current(page: &Page) -> Result<(), JsValue> {
    let path = page.window.location().pathname()?;
    let links = page.document.query_selector_all("#main-nav a[href]")?;
    for link in dom::html_elements(&links) {
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        if current::is_current_page(&path, &href) {
            link.set_attribute("aria-current", "page")?;
            link.class_list().add_1("active")?;
        }
    }
    Ok(())
}

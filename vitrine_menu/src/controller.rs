// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu controller: routes pointer, keyboard, outside-click and resize events.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashSet;
use kurbo::Rect;
use smallvec::SmallVec;

use crate::error::MenuError;
use crate::mode::ModeDetector;
use crate::tree::DisclosureTree;
use crate::types::{
    Branch, Expanded, Level, Mode, NodeHandle, TriggerKey, Viewport, VisualFlags,
};

/// What the host should do after a trigger was activated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activation<K> {
    /// Suppress the trigger's default navigation (and, for keys, the key default).
    pub prevent_default: bool,
    /// Resulting state of the activated branch, if the controller handled it.
    pub expanded: Option<bool>,
    /// Every branch whose state changed, oldest first.
    pub changes: Vec<Expanded<K>>,
}

impl<K> Activation<K> {
    /// Activation left to the browser and the stylesheet.
    pub fn passive() -> Self {
        Self {
            prevent_default: false,
            expanded: None,
            changes: Vec::new(),
        }
    }

    /// True if the controller took over the activation.
    pub fn is_handled(&self) -> bool {
        self.expanded.is_some()
    }
}

/// Owns the disclosure tree and is the only code that mutates it.
///
/// Every entry point takes the current [`Viewport`] so that the decision
/// between hover-driven desktop behavior and tap-driven mobile behavior is
/// made against the state at event time.
///
/// ## Example
///
/// ```rust
/// use vitrine_menu::{Branch, MenuController, Viewport};
///
/// let mut menu = MenuController::new(&[
///     Branch::leaf("about"),
///     Branch::leaf("services"),
/// ])
/// .unwrap();
///
/// let phone = Viewport::new(480);
/// menu.handle_primary_activate(&"about", phone).unwrap();
/// let act = menu.handle_primary_activate(&"services", phone).unwrap();
///
/// assert!(act.prevent_default);
/// assert!(!menu.is_open(&"about"));
/// assert!(menu.is_open(&"services"));
/// ```
#[derive(Clone, Debug)]
pub struct MenuController<K> {
    tree: DisclosureTree<K>,
    detector: ModeDetector,
    aligned_right: HashSet<NodeHandle>,
}

impl<K: Clone + Eq + Hash + Debug> MenuController<K> {
    /// Build a controller over a static menu structure with the default breakpoint.
    pub fn new(structure: &[Branch<K>]) -> Result<Self, MenuError> {
        Self::with_detector(structure, ModeDetector::default())
    }

    /// Build a controller with a custom [`ModeDetector`].
    pub fn with_detector(
        structure: &[Branch<K>],
        detector: ModeDetector,
    ) -> Result<Self, MenuError> {
        Ok(Self {
            tree: DisclosureTree::from_structure(structure)?,
            detector,
            aligned_right: HashSet::new(),
        })
    }

    /// Read-only view of the disclosure tree.
    pub fn tree(&self) -> &DisclosureTree<K> {
        &self.tree
    }

    /// The mode for `viewport`.
    pub fn mode(&self, viewport: Viewport) -> Mode {
        self.detector.mode_of(viewport)
    }

    /// Whether the branch `id` is open. Unknown ids read as closed.
    pub fn is_open(&self, id: &K) -> bool {
        self.tree.handle(id).is_some_and(|h| self.tree.is_open(h))
    }

    /// Presentation flags for `id`.
    pub fn visual_flags(&self, id: &K) -> Option<VisualFlags> {
        let handle = self.tree.handle(id)?;
        let mut flags = VisualFlags::empty();
        flags.set(VisualFlags::OPEN, self.tree.is_open(handle));
        flags.set(VisualFlags::ALIGN_RIGHT, self.aligned_right.contains(&handle));
        Some(flags)
    }

    /// The user clicked, tapped, or otherwise activated the trigger of `id`.
    ///
    /// On desktop this is passive: the stylesheet shows branches on hover and
    /// the trigger keeps its default navigation. On mobile the default is
    /// prevented, every other open branch in the same sibling group is closed
    /// (taking its own flyouts with it), and `id` is toggled.
    pub fn handle_primary_activate(
        &mut self,
        id: &K,
        viewport: Viewport,
    ) -> Result<Activation<K>, MenuError> {
        let handle = self.lookup(id)?;
        if self.mode(viewport) == Mode::Desktop {
            tracing::trace!(?id, "desktop activation left to hover styling");
            return Ok(Activation::passive());
        }

        let open_siblings: SmallVec<[NodeHandle; 8]> = self
            .tree
            .siblings(handle)
            .filter(|&s| self.tree.is_open(s))
            .collect();
        for sibling in open_siblings {
            self.tree.close(sibling);
        }

        let expanded = self.tree.toggle(handle);
        if !expanded {
            self.tree.close(handle);
        }
        tracing::debug!(?id, expanded, "menu branch activated");

        Ok(Activation {
            prevent_default: true,
            expanded: Some(expanded),
            changes: self.tree.take_changes(),
        })
    }

    /// A key was pressed while the trigger of `id` had focus.
    ///
    /// Enter and Space behave exactly like a primary activation on mobile.
    /// On desktop, and for any other key, the browser keeps the event.
    pub fn handle_trigger_key(
        &mut self,
        id: &K,
        key: TriggerKey,
        viewport: Viewport,
    ) -> Result<Activation<K>, MenuError> {
        self.lookup(id)?;
        if !key.activates() || self.mode(viewport) == Mode::Desktop {
            return Ok(Activation::passive());
        }
        self.handle_primary_activate(id, viewport)
    }

    /// A pointer interaction happened somewhere on the page.
    ///
    /// On mobile, an interaction outside the whole menu region collapses the
    /// menu. Returns the resulting state changes.
    pub fn handle_outside_interaction(
        &mut self,
        target_inside_menu: bool,
        viewport: Viewport,
    ) -> Vec<Expanded<K>> {
        if target_inside_menu || self.mode(viewport) == Mode::Desktop {
            return Vec::new();
        }
        self.tree.close_all();
        let changes = self.tree.take_changes();
        if !changes.is_empty() {
            tracing::debug!(closed = changes.len(), "menu collapsed by outside interaction");
        }
        changes
    }

    /// The viewport was resized (or the hamburger toggle changed).
    ///
    /// Entering desktop mode collapses everything so no tap-opened branch lingers
    /// under hover-driven presentation.
    pub fn handle_viewport_change(&mut self, viewport: Viewport) -> Vec<Expanded<K>> {
        if self.mode(viewport) == Mode::Mobile {
            return Vec::new();
        }
        self.tree.close_all();
        let changes = self.tree.take_changes();
        if !changes.is_empty() {
            tracing::debug!(
                width = viewport.width,
                closed = changes.len(),
                "menu reset for desktop layout"
            );
        }
        changes
    }

    /// Decide whether the flyout `id` must be right-aligned to stay on screen.
    ///
    /// `host_rect` is the flyout's border box in viewport coordinates, measured
    /// with its default left alignment while the host keeps it invisible. Only
    /// flyouts on desktop are ever realigned; anything else reports `false`.
    /// The decision is remembered as [`VisualFlags::ALIGN_RIGHT`].
    pub fn measure_overflow_and_realign(
        &mut self,
        id: &K,
        host_rect: Rect,
        viewport: Viewport,
    ) -> Result<bool, MenuError> {
        let handle = self.lookup(id)?;
        self.aligned_right.remove(&handle);
        let is_flyout = self
            .tree
            .node(handle)
            .is_some_and(|n| n.level() == Level::NestedFlyout);
        if !is_flyout || self.mode(viewport) == Mode::Mobile {
            return Ok(false);
        }

        let overflows = host_rect.x1 > f64::from(viewport.width);
        if overflows {
            self.aligned_right.insert(handle);
            tracing::debug!(?id, right = host_rect.x1, "flyout realigned to the right");
        }
        Ok(overflows)
    }

    fn lookup(&self, id: &K) -> Result<NodeHandle, MenuError> {
        self.tree.handle(id).ok_or_else(|| {
            tracing::warn!(?id, "event for unknown menu branch");
            MenuError::UnknownNode
        })
    }
}

// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the menu: structure input, viewport snapshot, levels, and signals.

use alloc::vec::Vec;

/// Handle of a node inside a [`DisclosureTree`](crate::DisclosureTree).
///
/// Handles are plain arena indices. They are only meaningful for the tree that
/// produced them, and stay valid for its whole lifetime since the menu
/// structure never changes after construction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub(crate) u32);

impl NodeHandle {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "a page menu never holds anywhere near u32::MAX branches"
    )]
    pub(crate) const fn from_idx(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Which sibling group a disclosure branch belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// A top-level dropdown hanging off the main navigation bar.
    TopDropdown,
    /// A flyout nested inside a dropdown (or, for deeper menus, inside another flyout).
    NestedFlyout,
}

impl Level {
    pub(crate) const fn for_depth(depth: usize) -> Self {
        if depth == 0 {
            Self::TopDropdown
        } else {
            Self::NestedFlyout
        }
    }
}

/// Interaction mode derived from the viewport.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Hover-driven presentation handled entirely by the stylesheet.
    Desktop,
    /// Tap-driven presentation where open state is owned by the controller.
    Mobile,
}

/// Snapshot of the ambient UI state that decides the [`Mode`].
///
/// Hosts read these values at event time and pass them into every controller
/// call, so the controller never consults global state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Viewport {
    /// Layout viewport width in CSS pixels.
    pub width: u32,
    /// Whether the page's hamburger toggle has forced the menu open.
    pub forced_open: bool,
}

impl Viewport {
    /// A viewport of the given width with the hamburger toggle closed.
    pub const fn new(width: u32) -> Self {
        Self {
            width,
            forced_open: false,
        }
    }

    /// Returns a copy with the forced-open flag set to `forced_open`.
    #[must_use]
    pub const fn with_forced_open(mut self, forced_open: bool) -> Self {
        self.forced_open = forced_open;
        self
    }
}

bitflags::bitflags! {
    /// Presentation toggles a host applies to a branch (for example as CSS classes).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct VisualFlags: u8 {
        /// The branch is expanded (`open` class).
        const OPEN        = 0b0000_0001;
        /// The flyout should be anchored to its right edge (`align-right` class).
        const ALIGN_RIGHT = 0b0000_0010;
    }
}

/// One collapsible branch of the static menu description.
///
/// Only branches that own a disclosure trigger are described; plain leaf links
/// carry no state and are left to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch<K> {
    /// Host identifier of the branch trigger.
    pub id: K,
    /// Nested flyouts, in document order.
    pub children: Vec<Branch<K>>,
}

impl<K> Branch<K> {
    /// A branch without nested flyouts.
    pub fn leaf(id: K) -> Self {
        Self {
            id,
            children: Vec::new(),
        }
    }

    /// A branch holding the given nested flyouts.
    pub fn with_children(id: K, children: impl IntoIterator<Item = Self>) -> Self {
        Self {
            id,
            children: children.into_iter().collect(),
        }
    }
}

/// Accessibility signal: a trigger's expanded state changed.
///
/// Hosts mirror this onto the trigger's `aria-expanded` attribute and toggle
/// the [`VisualFlags::OPEN`] presentation on the branch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Expanded<K> {
    /// The branch whose state changed.
    pub id: K,
    /// New expanded state.
    pub expanded: bool,
}

impl<K> Expanded<K> {
    /// The value to write into `aria-expanded`.
    pub const fn aria_value(&self) -> &'static str {
        if self.expanded { "true" } else { "false" }
    }
}

/// Keys that reach a disclosure trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriggerKey {
    /// `Enter`.
    Enter,
    /// The space bar.
    Space,
    /// Anything else; never handled by the menu.
    Other,
}

impl TriggerKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            _ => Self::Other,
        }
    }

    pub(crate) const fn activates(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

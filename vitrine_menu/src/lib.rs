// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Menu: state for a responsive, two-tier disclosure navigation menu.
//!
//! ## Overview
//!
//! A site navigation bar holds top-level dropdowns, and dropdowns may hold
//! nested flyouts. The same markup behaves in two ways:
//!
//! - **Desktop**: branches open on hover through the stylesheet alone. The
//!   controller keeps its hands off; activations are passive.
//! - **Mobile**: branches open on tap (or Enter/Space). The controller owns
//!   open state, keeps at most one branch open per sibling group, and folds
//!   nested flyouts away whenever their parent closes.
//!
//! [`ModeDetector`] picks the mode from a [`Viewport`] snapshot (width plus the
//! hamburger toggle). [`DisclosureTree`] holds one [`DisclosureNode`] per
//! branch with open/close/toggle primitives. [`MenuController`] routes host
//! events to those primitives and reports every state change as an
//! [`Expanded`] signal the host mirrors onto `aria-expanded` and its `open`
//! class.
//!
//! The controller never touches a document. Hosts translate DOM events into
//! method calls and apply the returned signals.
//!
//! ## Example
//!
//! ```rust
//! use vitrine_menu::{Branch, Expanded, MenuController, Viewport};
//!
//! let mut menu = MenuController::new(&[
//!     Branch::with_children("services", [Branch::leaf("consulting"), Branch::leaf("audit")]),
//!     Branch::leaf("company"),
//! ])
//! .unwrap();
//!
//! let phone = Viewport::new(390);
//! menu.handle_primary_activate(&"services", phone).unwrap();
//! menu.handle_primary_activate(&"consulting", phone).unwrap();
//!
//! // Opening a sibling dropdown closes "services" and its open flyout.
//! let act = menu.handle_primary_activate(&"company", phone).unwrap();
//! assert_eq!(
//!     act.changes,
//!     vec![
//!         Expanded { id: "services", expanded: false },
//!         Expanded { id: "consulting", expanded: false },
//!         Expanded { id: "company", expanded: true },
//!     ]
//! );
//!
//! // Growing into desktop layout resets everything.
//! let changes = menu.handle_viewport_change(Viewport::new(1280));
//! assert_eq!(changes, vec![Expanded { id: "company", expanded: false }]);
//! ```
//!
//! ## Flyout overflow
//!
//! On desktop, a flyout near the right edge of the window may spill off
//! screen. Hosts measure it once on hover or focus (keeping it invisible while
//! it is measurable) and call
//! [`MenuController::measure_overflow_and_realign`], which reports whether to
//! anchor it to the right instead.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in `kurbo`.
//! - `libm`: `no_std` float math for `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
pub mod current;
mod error;
mod mode;
mod tree;
mod types;

pub use controller::{Activation, MenuController};
pub use error::MenuError;
pub use mode::{DEFAULT_BREAKPOINT, ModeDetector, current_mode};
pub use tree::{DisclosureNode, DisclosureTree};
pub use types::{Branch, Expanded, Level, Mode, NodeHandle, TriggerKey, Viewport, VisualFlags};

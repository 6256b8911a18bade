// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Effects: decision logic for the page's smaller flourishes.
//!
//! - [`StatBoard`] drives count-up statistics through an external
//!   [`CountUp`] utility and guarantees each stat ends on its exact literal
//!   (`1,355`, `€550M+`) even when the utility is missing or fails.
//! - [`RevealTracker`] decides when fade-in elements become visible, honoring
//!   reduced motion and the absence of a visibility observer.
//! - [`StaggerGroup`] reveals a row of cards one after another once the row
//!   scrolls into view.
//!
//! Nothing here touches a document or a timer; hosts feed in observations and
//! apply the returned decisions.
//!
//! ## Example
//!
//! ```rust
//! use vitrine_effects::{RevealTracker, StaggerGroup};
//!
//! let mut reveals = RevealTracker::new(false, true);
//! assert_eq!(reveals.track("about", 0.2), None);
//! let reveal = reveals.on_intersect(&"about", true).unwrap();
//! assert!(reveal.animate);
//!
//! let mut cards = StaggerGroup::new(["first", "second"]);
//! let schedule = cards.on_intersect(true);
//! assert_eq!(schedule[1], ("second", 300));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod counter;
mod reveal;

pub use counter::{
    CountUp, CountUpOptions, StartSummary, StatBoard, StatDisplay, StatPhase, StatSpec,
    format_grouped,
};
pub use reveal::{
    Reveal, RevealConfig, RevealStrategy, RevealTracker, STAGGER_STEP_MS, STAGGER_THRESHOLD,
    StaggerGroup,
};

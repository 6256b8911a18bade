// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Slideshow: a crossfading image rotator.
//!
//! ## Overview
//!
//! A hero banner cycles through a fixed list of images. Each change is a
//! crossfade: the incoming image is loaded into an overlay, the overlay fades
//! in, and only once the fade is over does the base image switch and the
//! overlay clear. [`SlideshowController`] keeps track of which slide is
//! committed, which crossfade is in flight, and when the next automatic
//! advance is due.
//!
//! The controller never reads a clock and never schedules anything. Every
//! timed call takes the host's current time in milliseconds; the host asks
//! for [`SlideshowController::next_deadline`], arms one timer, and calls
//! [`SlideshowController::advance`] when it fires. Presentation work comes back
//! as [`SlideEvent`]s.
//!
//! Two guarantees shape the design:
//!
//! - A crossfade always resolves. If the presentation layer never reports the
//!   end of its fade, a fallback deadline commits the target anyway.
//! - A crossfade resolves once. Finished signals carry the [`TransitionId`]
//!   they belong to, and anything that does not match the crossfade in flight
//!   is ignored.
//!
//! Users who ask for reduced motion get manual controls only; see
//! [`SlideshowConfig::reduced_motion`].
//!
//! ## Example
//!
//! ```rust
//! use vitrine_slideshow::{SlideEvent, SlideshowConfig, SlideshowController};
//!
//! let slides = ["hero-office.png", "hero-meeting.png", "hero-sofa.png"];
//! let mut hero = SlideshowController::new(slides, SlideshowConfig::default()).unwrap();
//!
//! // An arrow key moves one slide and restarts the auto-advance clock.
//! let outcome = hero.handle_key("ArrowLeft", 1_000);
//! assert!(outcome.prevent_default);
//! let Some(SlideEvent::CrossfadeStarted { transition, target }) = outcome.event else {
//!     unreachable!()
//! };
//! assert_eq!(hero.slide(target), Some(&"hero-sofa.png"));
//!
//! // The fade reports its own end before the fallback deadline.
//! hero.on_transition_end(transition);
//! assert_eq!(hero.current_index(), 2);
//! assert_eq!(hero.next_deadline(), Some(9_000));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod error;
mod types;

pub use config::{AUTO_ADVANCE_INTERVAL_MS, SlideshowConfig, TRANSITION_FALLBACK_MS};
pub use controller::SlideshowController;
pub use error::SlideshowError;
pub use types::{Direction, KeyOutcome, SlideEvent, SlideEvents, TransitionId};

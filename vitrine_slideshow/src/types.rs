// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signals exchanged between the slideshow and its presentation layer.

use smallvec::SmallVec;

/// Identifies one crossfade from start to resolution.
///
/// The presentation layer hands it back when its transition finishes, so a
/// finished signal that belongs to a superseded or already resolved crossfade
/// can be told apart from the live one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(pub(crate) u64);

/// Presentation work requested by the slideshow.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SlideEvent {
    /// Load slide `target` into the overlay and fade the overlay in.
    CrossfadeStarted {
        /// The crossfade this belongs to.
        transition: TransitionId,
        /// Index of the incoming slide.
        target: usize,
    },
    /// Make slide `index` the base image and clear the overlay.
    Committed {
        /// The crossfade that resolved or was cancelled.
        transition: TransitionId,
        /// Index of the slide now showing.
        index: usize,
    },
}

/// Events produced by a single call, oldest first.
pub type SlideEvents = SmallVec<[SlideEvent; 2]>;

/// Manual navigation direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the previous slide, wrapping from the first to the last.
    Previous,
    /// Towards the next slide, wrapping from the last to the first.
    Next,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` value to a direction.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Self::Previous),
            "ArrowRight" | "Right" => Some(Self::Next),
            _ => None,
        }
    }
}

/// Result of a key press on the slideshow region.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Suppress the key's default (scrolling) behavior.
    pub prevent_default: bool,
    /// Crossfade started by the key, if any.
    pub event: Option<SlideEvent>,
}

// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Time between automatic advances, in milliseconds.
pub const AUTO_ADVANCE_INTERVAL_MS: u64 = 8000;

/// Deadline after which a crossfade commits even if the presentation layer
/// never reported the end of its transition, in milliseconds.
pub const TRANSITION_FALLBACK_MS: u64 = 1100;

/// Slideshow timing and accessibility configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlideshowConfig {
    /// Auto-advance period in milliseconds.
    pub interval_ms: u64,
    /// Fallback deadline for a crossfade in milliseconds.
    ///
    /// Should be slightly longer than the stylesheet's fade duration.
    pub fallback_ms: u64,
    /// The user asked for reduced motion. Captured once; while set, the
    /// slideshow never advances on its own.
    pub reduced_motion: bool,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval_ms: AUTO_ADVANCE_INTERVAL_MS,
            fallback_ms: TRANSITION_FALLBACK_MS,
            reduced_motion: false,
        }
    }
}

impl SlideshowConfig {
    /// Default timings with the given reduced-motion preference.
    pub fn with_reduced_motion(reduced_motion: bool) -> Self {
        Self {
            reduced_motion,
            ..Self::default()
        }
    }
}

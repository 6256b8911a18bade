// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mode detection: desktop (hover) vs. mobile (tap).

use crate::types::{Mode, Viewport};

/// Width at or below which the menu switches to tap-driven behavior.
///
/// Must match the media query in the companion stylesheet.
pub const DEFAULT_BREAKPOINT: u32 = 768;

/// Maps a viewport snapshot to a [`Mode`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ModeDetector {
    /// Inclusive upper bound for [`Mode::Mobile`] widths.
    pub breakpoint: u32,
}

impl Default for ModeDetector {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_BREAKPOINT,
        }
    }
}

impl ModeDetector {
    /// Detector with a custom breakpoint.
    pub const fn with_breakpoint(breakpoint: u32) -> Self {
        Self { breakpoint }
    }

    /// Classify `viewport_width`, honoring a hamburger toggle that forces mobile behavior.
    pub const fn mode(&self, viewport_width: u32, forced_open: bool) -> Mode {
        if forced_open || viewport_width <= self.breakpoint {
            Mode::Mobile
        } else {
            Mode::Desktop
        }
    }

    /// Classify a [`Viewport`] snapshot.
    pub const fn mode_of(&self, viewport: Viewport) -> Mode {
        self.mode(viewport.width, viewport.forced_open)
    }
}

/// [`ModeDetector::mode`] with [`DEFAULT_BREAKPOINT`].
pub const fn current_mode(viewport_width: u32, forced_open: bool) -> Mode {
    ModeDetector::with_breakpoint(DEFAULT_BREAKPOINT).mode(viewport_width, forced_open)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_inclusive() {
        assert_eq!(current_mode(768, false), Mode::Mobile);
        assert_eq!(current_mode(769, false), Mode::Desktop);
        assert_eq!(current_mode(0, false), Mode::Mobile);
    }

    #[test]
    fn forced_open_wins_on_wide_viewports() {
        assert_eq!(current_mode(1440, true), Mode::Mobile);
        assert_eq!(
            ModeDetector::default().mode_of(Viewport::new(1024).with_forced_open(true)),
            Mode::Mobile
        );
    }

    #[test]
    fn custom_breakpoint() {
        let detector = ModeDetector::with_breakpoint(1024);
        assert_eq!(detector.mode(1024, false), Mode::Mobile);
        assert_eq!(detector.mode(1025, false), Mode::Desktop);
    }
}

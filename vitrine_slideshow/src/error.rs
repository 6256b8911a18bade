// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors raised while constructing a slideshow.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SlideshowError {
    /// A slideshow needs at least one slide.
    #[error("slideshow constructed without slides")]
    NoSlides,
}

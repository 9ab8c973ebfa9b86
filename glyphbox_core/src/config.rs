// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed picker configuration.
//!
//! A [`PickerConfig`] is chosen once when the [`Picker`](crate::picker::Picker)
//! is constructed and never changes afterwards.

use crate::time::Duration;

/// How the content area is brought into view after a category opens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    /// Animated scroll.
    #[default]
    Smooth,
    /// Jump straight to the target.
    Instant,
    /// Let the host decide (CSS `scroll-behavior`).
    Auto,
}

impl ScrollBehavior {
    /// Returns the CSSOM `ScrollBehavior` keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Instant => "instant",
            Self::Auto => "auto",
        }
    }
}

/// Configuration for the [`Picker`](crate::picker::Picker).
#[derive(Clone, Copy, Debug)]
pub struct PickerConfig {
    /// How long an item keeps its "copied" pulse after a copy.
    pub copy_pulse: Duration,
    /// How long the toast stays visible.
    pub toast_duration: Duration,
    /// Gap between the variant popup and its anchor, and the minimum
    /// distance the popup keeps from the viewport edges (CSS px).
    pub popup_edge_offset: f64,
    /// Scroll behavior used when a category opens.
    pub scroll_behavior: ScrollBehavior,
    /// Number of items materialized per batch (and synchronously on open).
    pub batch_size: usize,
    /// Quiet period for secondary-click popup requests.
    pub variant_debounce: Duration,
    /// Key that dismisses the variant popup (a `KeyboardEvent.key` value).
    pub cancel_key: &'static str,
}

impl PickerConfig {
    /// Default configuration for the browser picker.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            copy_pulse: Duration::from_millis(600),
            toast_duration: Duration::from_millis(2000),
            popup_edge_offset: 10.0,
            scroll_behavior: ScrollBehavior::Smooth,
            batch_size: 100,
            variant_debounce: Duration::from_millis(50),
            cancel_key: "Escape",
        }
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self::web()
    }
}

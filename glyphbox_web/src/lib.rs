// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for glyphbox.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` frame source
//! - [`DomPresenter`]: DOM element management
//! - [`Listeners`]: delegated event wiring producing [`InputEvent`]s
//! - [`clipboard`]: Clipboard API with an `execCommand` fallback
//! - [`ConsoleSink`]: trace output to the browser console

#![no_std]

extern crate alloc;

pub mod clipboard;
mod console;
mod events;
mod presenter;
mod raf;

pub use console::ConsoleSink;
pub use events::{InputEvent, Listeners};
pub use glyphbox_core::backend::Presenter;
pub use presenter::{DomPresenter, PickerElements, anchor_rect};
pub use raf::RafLoop;

use glyphbox_core::time::HostTime;
use kurbo::Rect;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}

/// Converts a `DOMRect` into a [`Rect`] in the same (viewport) coordinates.
#[must_use]
pub fn dom_rect(rect: &web_sys::DomRect) -> Rect {
    rect_from_ltrb(rect.left(), rect.top(), rect.right(), rect.bottom())
}

fn rect_from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Rect {
    // DOMRect permits negative sizes; keep x0 <= x1 and y0 <= y1.
    Rect::new(left, top, right.max(left), bottom.max(top))
}

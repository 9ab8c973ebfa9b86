// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Glyphbox splits platform-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Frame source**: calls [`Picker::tick`] once per display frame
//!   (e.g. from `requestAnimationFrame`). Deferred work such as render
//!   batches only advances on ticks.
//!
//! - **Time**: a `now() -> HostTime` free function reading the platform's
//!   monotonic clock in microseconds.
//!
//! - **Event dispatch**: translates native input into the picker's input
//!   methods (category header clicks, delegated item clicks, keys, the
//!   low-memory signal).
//!
//! - **Clipboard**: performs [`ViewChange::WriteClipboard`] requests and
//!   reports the outcome with [`Picker::finish_copy`].
//!
//! - **Presenter**: implements the [`Presenter`] trait to apply
//!   [`ViewChanges`] to a platform-native tree (e.g. DOM elements).
//!
//! [`Picker::tick`]: crate::picker::Picker::tick
//! [`Picker::finish_copy`]: crate::picker::Picker::finish_copy
//! [`ViewChange::WriteClipboard`]: crate::change::ViewChange::WriteClipboard

use crate::change::ViewChanges;

/// Applies view changes to a platform-native presentation tree.
///
/// DOM presenters and test doubles both implement this trait.
///
/// # Event loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(now: HostTime) {
///     picker.tick(now);
///     presenter.apply(&picker.take_changes());
/// }
///
/// fn on_content_click(hit: ItemHit) {
///     picker.primary_click(hit);
///     presenter.apply(&picker.take_changes());
/// }
/// ```
pub trait Presenter {
    /// Applies `changes` in order.
    fn apply(&mut self, changes: &ViewChanges);
}

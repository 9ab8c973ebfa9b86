// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debouncing.

use crate::time::{Duration, HostTime};

/// Collapses bursts of requests into the last one.
///
/// Each [`request`](Self::request) replaces the pending value and restarts
/// the quiet period. [`poll`](Self::poll) yields the value once the quiet
/// period has elapsed without another request.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(HostTime, T)>,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value with `value`, due `delay` after `now`.
    pub fn request(&mut self, value: T, now: HostTime) {
        self.pending = Some((now.saturating_add(self.delay), value));
    }

    /// Returns the pending value if its quiet period has elapsed.
    pub fn poll(&mut self, now: HostTime) -> Option<T> {
        if self.pending.as_ref().is_some_and(|(due, _)| *due <= now) {
            self.pending.take().map(|(_, value)| value)
        } else {
            None
        }
    }

    /// Returns `true` if a request is waiting.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot timers for transient visual state.
//!
//! Copy pulses and toasts revert after a fixed duration. Timers are not
//! cancellable: two copies in quick succession each schedule their own
//! revert, and both fire.

use alloc::vec::Vec;

use crate::time::HostTime;

/// Queue of `(deadline, action)` pairs.
#[derive(Clone, Debug)]
pub struct TimerQueue<A> {
    entries: Vec<(HostTime, A)>,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<A> TimerQueue<A> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` to fire at `deadline`.
    pub fn schedule(&mut self, deadline: HostTime, action: A) {
        self.entries.push((deadline, action));
    }

    /// Removes and returns every action due at `now`.
    ///
    /// Actions come back in deadline order; equal deadlines keep their
    /// scheduling order.
    pub fn drain_due(&mut self, now: HostTime) -> Vec<A> {
        let mut due = Vec::new();
        let mut kept = Vec::with_capacity(self.entries.len());
        for (deadline, action) in self.entries.drain(..) {
            if deadline <= now {
                due.push((deadline, action));
            } else {
                kept.push((deadline, action));
            }
        }
        self.entries = kept;
        // Stable sort keeps scheduling order for equal deadlines.
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, action)| action).collect()
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.entries.iter().map(|(deadline, _)| *deadline).min()
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

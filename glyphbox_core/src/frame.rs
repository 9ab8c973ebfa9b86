// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Work deferred to the next display frame.
//!
//! Instead of registering closures with the platform's frame callback, the
//! picker queues [`Deferred`] values. Each [`Picker::tick`] takes the batch
//! queued so far with [`FrameQueue::begin_frame`] and runs it; anything
//! queued while that batch runs waits for the following tick. That is the
//! only yield point in the system, and hosts (or tests) decide when it
//! happens.
//!
//! [`Picker::tick`]: crate::picker::Picker::tick

use alloc::collections::VecDeque;

use crate::render::BatchTicket;
use crate::taxonomy::CategoryId;

/// A unit of work scheduled for the next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Continue an in-flight category render.
    Batch(BatchTicket),
    /// Update the selected category header marker.
    SelectHeader(Option<CategoryId>),
    /// Bring the content area into view.
    ScrollIntoView,
}

/// FIFO of deferred work, split into frames.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    pending: VecDeque<Deferred>,
}

impl FrameQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `work` for the next frame.
    pub fn defer(&mut self, work: Deferred) {
        self.pending.push_back(work);
    }

    /// Takes everything scheduled so far, in scheduling order.
    ///
    /// Work deferred after this call belongs to the next frame.
    pub fn begin_frame(&mut self) -> VecDeque<Deferred> {
        core::mem::take(&mut self.pending)
    }

    /// Number of scheduled units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for rendering and caching.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Picker`](crate::picker::Picker) calls as it renders, caches and copies.
//! All method bodies default to no-ops, so implementing only the events you
//! care about is fine.
//!
//! [`Tracer`] owns an optional boxed sink. When the `trace` feature is
//! **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use alloc::boxed::Box;

use crate::clipboard::CopyResult;
use crate::taxonomy::CategoryId;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Where rendered content came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderSource {
    /// Served from a cached snapshot.
    Cache,
    /// Built from taxonomy data.
    Fresh,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a category render starts.
#[derive(Clone, Copy, Debug)]
pub struct RenderEvent {
    /// Host time of the triggering input.
    pub at: HostTime,
    /// The category being rendered.
    pub category: CategoryId,
    /// Cache or fresh build.
    pub source: RenderSource,
    /// Items mounted synchronously.
    pub mounted: usize,
    /// Items in the category.
    pub total: usize,
}

/// Emitted when a deferred batch is appended.
#[derive(Clone, Copy, Debug)]
pub struct BatchEvent {
    /// Host time of the frame.
    pub at: HostTime,
    /// The category being rendered.
    pub category: CategoryId,
    /// Index of the first item in the batch.
    pub start: usize,
    /// Items in the batch.
    pub len: usize,
}

/// Emitted when a pending batch is dropped because its render was superseded.
#[derive(Clone, Copy, Debug)]
pub struct RenderCancelledEvent {
    /// Host time of the frame.
    pub at: HostTime,
    /// The abandoned category.
    pub category: CategoryId,
    /// Items appended before cancellation.
    pub rendered: usize,
    /// Items in the category.
    pub total: usize,
}

/// Emitted when a completed category render is stored in the cache.
#[derive(Clone, Copy, Debug)]
pub struct SnapshotEvent {
    /// Host time of the completing input or frame.
    pub at: HostTime,
    /// The cached category.
    pub category: CategoryId,
    /// Items in the snapshot.
    pub items: usize,
}

/// Emitted when the variant popup is shown.
#[derive(Clone, Copy, Debug)]
pub struct VariantPopupEvent {
    /// Host time of the frame that fired the debounced request.
    pub at: HostTime,
    /// Cache or fresh build.
    pub source: RenderSource,
    /// Variant entries in the popup.
    pub variants: usize,
}

/// Emitted when the host reports a clipboard outcome.
#[derive(Clone, Copy, Debug)]
pub struct CopyEvent {
    /// Host time of the report.
    pub at: HostTime,
    /// Which tier succeeded, or why both failed.
    pub result: CopyResult,
}

/// Emitted when the low-memory signal clears the caches.
#[derive(Clone, Copy, Debug)]
pub struct CachesClearedEvent {
    /// Host time of the signal.
    pub at: HostTime,
    /// Category snapshots dropped.
    pub categories: usize,
    /// Variant snapshots dropped.
    pub variants: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the picker.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a category render starts.
    fn on_render(&mut self, e: &RenderEvent) {
        _ = e;
    }

    /// Called when a deferred batch is appended.
    fn on_batch(&mut self, e: &BatchEvent) {
        _ = e;
    }

    /// Called when an in-flight render is abandoned.
    fn on_render_cancelled(&mut self, e: &RenderCancelledEvent) {
        _ = e;
    }

    /// Called when a category snapshot is cached.
    fn on_snapshot_stored(&mut self, e: &SnapshotEvent) {
        _ = e;
    }

    /// Called when the variant popup is shown.
    fn on_variant_popup(&mut self, e: &VariantPopupEvent) {
        _ = e;
    }

    /// Called when a clipboard outcome is reported.
    fn on_copy(&mut self, e: &CopyEvent) {
        _ = e;
    }

    /// Called when both caches are cleared.
    fn on_caches_cleared(&mut self, e: &CachesClearedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Owner of an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing and
/// the sink is dropped on construction. When **on**, each method checks the
/// inner `Option` (one branch) before dispatching to the sink.
#[derive(Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident, $event:ident) => {{
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut $self.sink {
            sink.$method($event);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (&$self, $event);
        }
    }};
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            drop(sink);
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Emits a [`RenderEvent`].
    #[inline]
    pub fn render(&mut self, e: &RenderEvent) {
        dispatch!(self, on_render, e);
    }

    /// Emits a [`BatchEvent`].
    #[inline]
    pub fn batch(&mut self, e: &BatchEvent) {
        dispatch!(self, on_batch, e);
    }

    /// Emits a [`RenderCancelledEvent`].
    #[inline]
    pub fn render_cancelled(&mut self, e: &RenderCancelledEvent) {
        dispatch!(self, on_render_cancelled, e);
    }

    /// Emits a [`SnapshotEvent`].
    #[inline]
    pub fn snapshot_stored(&mut self, e: &SnapshotEvent) {
        dispatch!(self, on_snapshot_stored, e);
    }

    /// Emits a [`VariantPopupEvent`].
    #[inline]
    pub fn variant_popup(&mut self, e: &VariantPopupEvent) {
        dispatch!(self, on_variant_popup, e);
    }

    /// Emits a [`CopyEvent`].
    #[inline]
    pub fn copy(&mut self, e: &CopyEvent) {
        dispatch!(self, on_copy, e);
    }

    /// Emits a [`CachesClearedEvent`].
    #[inline]
    pub fn caches_cleared(&mut self, e: &CachesClearedEvent) {
        dispatch!(self, on_caches_cleared, e);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_render() -> RenderEvent {
        RenderEvent {
            at: HostTime(1_000),
            category: CategoryId(0),
            source: RenderSource::Fresh,
            mounted: 100,
            total: 150,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_render(&sample_render());
        sink.on_caches_cleared(&CachesClearedEvent {
            at: HostTime(0),
            categories: 0,
            variants: 0,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.render(&sample_render());
        tracer.batch(&BatchEvent {
            at: HostTime(16_000),
            category: CategoryId(0),
            start: 100,
            len: 50,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::rc::Rc;
        use alloc::vec::Vec;
        use core::cell::RefCell;

        struct RecordingSink {
            totals: Rc<RefCell<Vec<usize>>>,
        }
        impl TraceSink for RecordingSink {
            fn on_render(&mut self, e: &RenderEvent) {
                self.totals.borrow_mut().push(e.total);
            }
        }

        let totals = Rc::new(RefCell::new(Vec::new()));
        let mut tracer = Tracer::new(Box::new(RecordingSink {
            totals: Rc::clone(&totals),
        }));
        tracer.render(&sample_render());
        assert_eq!(*totals.borrow(), [150]);
    }
}

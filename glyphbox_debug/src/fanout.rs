// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forwarding one event stream to several sinks.

use glyphbox_core::trace::{
    BatchEvent, CachesClearedEvent, CopyEvent, RenderCancelledEvent, RenderEvent, SnapshotEvent,
    TraceSink, VariantPopupEvent,
};

/// A [`TraceSink`] that forwards every event to each inner sink in order.
///
/// A [`Tracer`](glyphbox_core::trace::Tracer) owns exactly one sink, so this
/// is how a session gets both a live log and a recording.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn TraceSink>>,
}

impl std::fmt::Debug for FanoutSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl FanoutSink {
    /// Creates a sink with no outputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an output, builder style.
    #[must_use]
    pub fn with(mut self, sink: impl TraceSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Number of outputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Returns `true` if there are no outputs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

macro_rules! forward {
    ($self:ident, $method:ident, $event:ident) => {
        for sink in &mut $self.sinks {
            sink.$method($event);
        }
    };
}

impl TraceSink for FanoutSink {
    fn on_render(&mut self, e: &RenderEvent) {
        forward!(self, on_render, e);
    }

    fn on_batch(&mut self, e: &BatchEvent) {
        forward!(self, on_batch, e);
    }

    fn on_render_cancelled(&mut self, e: &RenderCancelledEvent) {
        forward!(self, on_render_cancelled, e);
    }

    fn on_snapshot_stored(&mut self, e: &SnapshotEvent) {
        forward!(self, on_snapshot_stored, e);
    }

    fn on_variant_popup(&mut self, e: &VariantPopupEvent) {
        forward!(self, on_variant_popup, e);
    }

    fn on_copy(&mut self, e: &CopyEvent) {
        forward!(self, on_copy, e);
    }

    fn on_caches_cleared(&mut self, e: &CachesClearedEvent) {
        forward!(self, on_caches_cleared, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{RecorderSink, decode};
    use glyphbox_core::taxonomy::CategoryId;
    use glyphbox_core::time::HostTime;

    #[test]
    fn every_sink_sees_every_event() {
        let first = RecorderSink::new();
        let second = RecorderSink::new();
        let mut fanout = FanoutSink::new().with(first.clone()).with(second.clone());
        assert_eq!(fanout.len(), 2);

        fanout.on_snapshot_stored(&SnapshotEvent {
            at: HostTime(10),
            category: CategoryId(0),
            items: 3,
        });
        fanout.on_caches_cleared(&CachesClearedEvent {
            at: HostTime(20),
            categories: 1,
            variants: 0,
        });

        assert_eq!(first.to_bytes(), second.to_bytes());
        assert_eq!(decode(&first.to_bytes()).count(), 2);
    }

    #[test]
    fn empty_fanout_discards() {
        let mut fanout = FanoutSink::new();
        assert!(fanout.is_empty());
        fanout.on_copy(&CopyEvent {
            at: HostTime(0),
            result: Ok(glyphbox_core::clipboard::CopyPath::Primary),
        });
    }
}

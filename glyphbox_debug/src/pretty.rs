// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds.

use std::io::Write;

use glyphbox_core::clipboard::CopyResult;
use glyphbox_core::time::HostTime;
use glyphbox_core::trace::{
    BatchEvent, CachesClearedEvent, CopyEvent, RenderCancelledEvent, RenderEvent, RenderSource,
    SnapshotEvent, TraceSink, VariantPopupEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    #[expect(
        clippy::cast_precision_loss,
        reason = "trace timestamps stay well below 2^52 µs"
    )]
    let us = t.ticks() as f64;
    us / 1000.0
}

fn source_name(source: RenderSource) -> &'static str {
    match source {
        RenderSource::Cache => "cache",
        RenderSource::Fresh => "fresh",
    }
}

fn copy_outcome(result: CopyResult) -> String {
    match result {
        Ok(path) => format!("ok via {path:?}"),
        Err(err) => format!("FAILED ({err})"),
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_render(&mut self, e: &RenderEvent) {
        let _ = writeln!(
            self.writer,
            "[render] {:.1}ms category={} source={} mounted={}/{}",
            ms(e.at),
            e.category.0,
            source_name(e.source),
            e.mounted,
            e.total,
        );
    }

    fn on_batch(&mut self, e: &BatchEvent) {
        let _ = writeln!(
            self.writer,
            "[batch] {:.1}ms category={} items={}..{}",
            ms(e.at),
            e.category.0,
            e.start,
            e.start + e.len,
        );
    }

    fn on_render_cancelled(&mut self, e: &RenderCancelledEvent) {
        let _ = writeln!(
            self.writer,
            "[cancel] {:.1}ms category={} stopped at {}/{}",
            ms(e.at),
            e.category.0,
            e.rendered,
            e.total,
        );
    }

    fn on_snapshot_stored(&mut self, e: &SnapshotEvent) {
        let _ = writeln!(
            self.writer,
            "[cache] {:.1}ms category={} stored items={}",
            ms(e.at),
            e.category.0,
            e.items,
        );
    }

    fn on_variant_popup(&mut self, e: &VariantPopupEvent) {
        let _ = writeln!(
            self.writer,
            "[popup] {:.1}ms source={} variants={}",
            ms(e.at),
            source_name(e.source),
            e.variants,
        );
    }

    fn on_copy(&mut self, e: &CopyEvent) {
        let _ = writeln!(
            self.writer,
            "[copy] {:.1}ms {}",
            ms(e.at),
            copy_outcome(e.result),
        );
    }

    fn on_caches_cleared(&mut self, e: &CachesClearedEvent) {
        let _ = writeln!(
            self.writer,
            "[memory] {:.1}ms dropped categories={} variants={}",
            ms(e.at),
            e.categories,
            e.variants,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphbox_core::clipboard::ClipboardError;
    use glyphbox_core::taxonomy::CategoryId;

    #[test]
    fn pretty_print_render() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_render(&RenderEvent {
            at: HostTime(16_500),
            category: CategoryId(3),
            source: RenderSource::Fresh,
            mounted: 100,
            total: 150,
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert!(output.starts_with("[render] 16.5ms"), "got: {output}");
        assert!(output.contains("category=3"), "got: {output}");
        assert!(output.contains("mounted=100/150"), "got: {output}");
    }

    #[test]
    fn pretty_print_failed_copy() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_copy(&CopyEvent {
            at: HostTime(0),
            result: Err(ClipboardError::Both),
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert!(output.contains("FAILED"), "got: {output}");
        assert!(output.contains("both failed"), "got: {output}");
    }
}

// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace output to the browser console.

use alloc::format;

use glyphbox_core::trace::{
    BatchEvent, CachesClearedEvent, CopyEvent, RenderCancelledEvent, RenderEvent, SnapshotEvent,
    TraceSink, VariantPopupEvent,
};
use wasm_bindgen::JsValue;

/// A [`TraceSink`] that writes one `console.debug` line per event.
///
/// Events only arrive when the `trace` feature is enabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

fn debug(line: &str) {
    web_sys::console::debug_1(&JsValue::from_str(line));
}

fn ms(t: glyphbox_core::time::HostTime) -> f64 {
    #[expect(
        clippy::cast_precision_loss,
        reason = "session-relative µs stay well below 2^52"
    )]
    let us = t.ticks() as f64;
    us / 1000.0
}

impl TraceSink for ConsoleSink {
    fn on_render(&mut self, e: &RenderEvent) {
        debug(&format!(
            "[glyphbox] {:.1}ms render {:?} from {:?}: {}/{} mounted",
            ms(e.at),
            e.category,
            e.source,
            e.mounted,
            e.total
        ));
    }

    fn on_batch(&mut self, e: &BatchEvent) {
        debug(&format!(
            "[glyphbox] {:.1}ms batch {:?} [{}..{})",
            ms(e.at),
            e.category,
            e.start,
            e.start + e.len
        ));
    }

    fn on_render_cancelled(&mut self, e: &RenderCancelledEvent) {
        debug(&format!(
            "[glyphbox] {:.1}ms render {:?} cancelled at {}/{}",
            ms(e.at),
            e.category,
            e.rendered,
            e.total
        ));
    }

    fn on_snapshot_stored(&mut self, e: &SnapshotEvent) {
        debug(&format!(
            "[glyphbox] {:.1}ms cached {:?} ({} items)",
            ms(e.at),
            e.category,
            e.items
        ));
    }

    fn on_variant_popup(&mut self, e: &VariantPopupEvent) {
        debug(&format!(
            "[glyphbox] {:.1}ms popup from {:?}: {} variants",
            ms(e.at),
            e.source,
            e.variants
        ));
    }

    fn on_copy(&mut self, e: &CopyEvent) {
        debug(&format!("[glyphbox] {:.1}ms copy {:?}", ms(e.at), e.result));
    }

    fn on_caches_cleared(&mut self, e: &CachesClearedEvent) {
        debug(&format!(
            "[glyphbox] {:.1}ms caches cleared ({} categories, {} variants)",
            ms(e.at),
            e.categories,
            e.variants
        ));
    }
}

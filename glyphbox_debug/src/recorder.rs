// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events as
//! little-endian records into a shared buffer. Clones of a recorder append to
//! the same buffer, so one clone can be boxed into a
//! [`Tracer`](glyphbox_core::trace::Tracer) while another reads the bytes
//! back. [`decode`] turns the bytes into an iterator of [`RecordedEvent`].
//!
//! Counts are stored as `u32` and saturate.

use std::cell::RefCell;
use std::rc::Rc;

use glyphbox_core::clipboard::{ClipboardError, CopyPath, CopyResult};
use glyphbox_core::taxonomy::CategoryId;
use glyphbox_core::time::HostTime;
use glyphbox_core::trace::{
    BatchEvent, CachesClearedEvent, CopyEvent, RenderCancelledEvent, RenderEvent, RenderSource,
    SnapshotEvent, TraceSink, VariantPopupEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_RENDER: u8 = 1;
const TAG_BATCH: u8 = 2;
const TAG_RENDER_CANCELLED: u8 = 3;
const TAG_SNAPSHOT: u8 = 4;
const TAG_VARIANT_POPUP: u8 = 5;
const TAG_COPY: u8 = 6;
const TAG_CACHES_CLEARED: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Clone, Debug, Default)]
pub struct RecorderSink {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buf.borrow().clone()
    }

    /// Number of recorded bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.borrow().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.borrow().is_empty()
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&self, v: u8) {
        self.buf.borrow_mut().push(v);
    }

    fn write_u32(&self, v: u32) {
        self.buf.borrow_mut().extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&self, v: u64) {
        self.buf.borrow_mut().extend_from_slice(&v.to_le_bytes());
    }

    fn write_count(&self, n: usize) {
        self.write_u32(u32::try_from(n).unwrap_or(u32::MAX));
    }

    fn write_header(&self, tag: u8, at: HostTime) {
        self.write_u8(tag);
        self.write_u64(at.ticks());
    }

    fn write_source(&self, source: RenderSource) {
        self.write_u8(match source {
            RenderSource::Cache => 0,
            RenderSource::Fresh => 1,
        });
    }

    fn write_copy_result(&self, result: CopyResult) {
        self.write_u8(match result {
            Ok(CopyPath::Primary) => 0,
            Ok(CopyPath::Fallback) => 1,
            Err(ClipboardError::Unavailable) => 2,
            Err(ClipboardError::Rejected) => 3,
            Err(ClipboardError::Both) => 4,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_render(&mut self, e: &RenderEvent) {
        self.write_header(TAG_RENDER, e.at);
        self.write_u32(e.category.0);
        self.write_source(e.source);
        self.write_count(e.mounted);
        self.write_count(e.total);
    }

    fn on_batch(&mut self, e: &BatchEvent) {
        self.write_header(TAG_BATCH, e.at);
        self.write_u32(e.category.0);
        self.write_count(e.start);
        self.write_count(e.len);
    }

    fn on_render_cancelled(&mut self, e: &RenderCancelledEvent) {
        self.write_header(TAG_RENDER_CANCELLED, e.at);
        self.write_u32(e.category.0);
        self.write_count(e.rendered);
        self.write_count(e.total);
    }

    fn on_snapshot_stored(&mut self, e: &SnapshotEvent) {
        self.write_header(TAG_SNAPSHOT, e.at);
        self.write_u32(e.category.0);
        self.write_count(e.items);
    }

    fn on_variant_popup(&mut self, e: &VariantPopupEvent) {
        self.write_header(TAG_VARIANT_POPUP, e.at);
        self.write_source(e.source);
        self.write_count(e.variants);
    }

    fn on_copy(&mut self, e: &CopyEvent) {
        self.write_header(TAG_COPY, e.at);
        self.write_copy_result(e.result);
    }

    fn on_caches_cleared(&mut self, e: &CachesClearedEvent) {
        self.write_header(TAG_CACHES_CLEARED, e.at);
        self.write_count(e.categories);
        self.write_count(e.variants);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A [`RenderEvent`].
    Render(RenderEvent),
    /// A [`BatchEvent`].
    Batch(BatchEvent),
    /// A [`RenderCancelledEvent`].
    RenderCancelled(RenderCancelledEvent),
    /// A [`SnapshotEvent`].
    Snapshot(SnapshotEvent),
    /// A [`VariantPopupEvent`].
    VariantPopup(VariantPopupEvent),
    /// A [`CopyEvent`].
    Copy(CopyEvent),
    /// A [`CachesClearedEvent`].
    CachesCleared(CachesClearedEvent),
}

impl RecordedEvent {
    /// Host time of the event.
    #[must_use]
    pub fn at(&self) -> HostTime {
        match self {
            Self::Render(e) => e.at,
            Self::Batch(e) => e.at,
            Self::RenderCancelled(e) => e.at,
            Self::Snapshot(e) => e.at,
            Self::VariantPopup(e) => e.at,
            Self::Copy(e) => e.at,
            Self::CachesCleared(e) => e.at,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first truncated or unknown record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_count(&mut self) -> Option<usize> {
        self.read_u32().map(|n| n as usize)
    }

    fn read_category(&mut self) -> Option<CategoryId> {
        self.read_u32().map(CategoryId)
    }

    fn read_source(&mut self) -> Option<RenderSource> {
        Some(match self.read_u8()? {
            0 => RenderSource::Cache,
            _ => RenderSource::Fresh,
        })
    }

    fn read_copy_result(&mut self) -> Option<CopyResult> {
        Some(match self.read_u8()? {
            0 => Ok(CopyPath::Primary),
            1 => Ok(CopyPath::Fallback),
            2 => Err(ClipboardError::Unavailable),
            3 => Err(ClipboardError::Rejected),
            _ => Err(ClipboardError::Both),
        })
    }

    fn decode_record(&mut self, tag: u8) -> Option<RecordedEvent> {
        let at = HostTime(self.read_u64()?);
        Some(match tag {
            TAG_RENDER => RecordedEvent::Render(RenderEvent {
                at,
                category: self.read_category()?,
                source: self.read_source()?,
                mounted: self.read_count()?,
                total: self.read_count()?,
            }),
            TAG_BATCH => RecordedEvent::Batch(BatchEvent {
                at,
                category: self.read_category()?,
                start: self.read_count()?,
                len: self.read_count()?,
            }),
            TAG_RENDER_CANCELLED => RecordedEvent::RenderCancelled(RenderCancelledEvent {
                at,
                category: self.read_category()?,
                rendered: self.read_count()?,
                total: self.read_count()?,
            }),
            TAG_SNAPSHOT => RecordedEvent::Snapshot(SnapshotEvent {
                at,
                category: self.read_category()?,
                items: self.read_count()?,
            }),
            TAG_VARIANT_POPUP => RecordedEvent::VariantPopup(VariantPopupEvent {
                at,
                source: self.read_source()?,
                variants: self.read_count()?,
            }),
            TAG_COPY => RecordedEvent::Copy(CopyEvent {
                at,
                result: self.read_copy_result()?,
            }),
            TAG_CACHES_CLEARED => RecordedEvent::CachesCleared(CachesClearedEvent {
                at,
                categories: self.read_count()?,
                variants: self.read_count()?,
            }),
            _ => return None,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        let event = self.decode_record(tag);
        if event.is_none() {
            // Stop for good on corrupt input.
            self.pos = self.data.len();
        }
        event
    }
}

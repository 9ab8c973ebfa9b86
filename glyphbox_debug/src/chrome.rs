// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Category render events go on one track per category (`tid` = category
//! position); popup, clipboard and memory events share track 0 of a second
//! process so they stay apart from rendering.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

const RENDER_PID: u32 = 0;
const INTERACTION_PID: u32 = 1;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Timestamps are host microseconds, which is the format's native unit.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes).map(to_json).collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn to_json(recorded: RecordedEvent) -> Value {
    let ts = recorded.at().ticks();
    match recorded {
        RecordedEvent::Render(e) => json!({
            "ph": "i",
            "name": "Render",
            "cat": "Render",
            "ts": ts,
            "pid": RENDER_PID,
            "tid": e.category.0,
            "s": "t",
            "args": {
                "source": format!("{:?}", e.source),
                "mounted": e.mounted,
                "total": e.total,
            }
        }),
        RecordedEvent::Batch(e) => json!({
            "ph": "i",
            "name": "Batch",
            "cat": "Render",
            "ts": ts,
            "pid": RENDER_PID,
            "tid": e.category.0,
            "s": "t",
            "args": {
                "start": e.start,
                "len": e.len,
            }
        }),
        RecordedEvent::RenderCancelled(e) => json!({
            "ph": "i",
            "name": "RenderCancelled",
            "cat": "Render",
            "ts": ts,
            "pid": RENDER_PID,
            "tid": e.category.0,
            "s": "t",
            "args": {
                "rendered": e.rendered,
                "total": e.total,
            }
        }),
        RecordedEvent::Snapshot(e) => json!({
            "ph": "i",
            "name": "SnapshotStored",
            "cat": "Cache",
            "ts": ts,
            "pid": RENDER_PID,
            "tid": e.category.0,
            "s": "t",
            "args": {
                "items": e.items,
            }
        }),
        RecordedEvent::VariantPopup(e) => json!({
            "ph": "i",
            "name": "VariantPopup",
            "cat": "Popup",
            "ts": ts,
            "pid": INTERACTION_PID,
            "tid": 0,
            "s": "t",
            "args": {
                "source": format!("{:?}", e.source),
                "variants": e.variants,
            }
        }),
        RecordedEvent::Copy(e) => json!({
            "ph": "i",
            "name": "Copy",
            "cat": "Clipboard",
            "ts": ts,
            "pid": INTERACTION_PID,
            "tid": 0,
            "s": "t",
            "args": {
                "ok": e.result.is_ok(),
                "outcome": match e.result {
                    Ok(path) => format!("{path:?}"),
                    Err(err) => format!("{err:?}"),
                },
            }
        }),
        RecordedEvent::CachesCleared(e) => json!({
            "ph": "i",
            "name": "CachesCleared",
            "cat": "Cache",
            "ts": ts,
            "pid": INTERACTION_PID,
            "tid": 0,
            "s": "g",
            "args": {
                "categories": e.categories,
                "variants": e.variants,
            }
        }),
    }
}

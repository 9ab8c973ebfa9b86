// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted picker session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Drives a [`Picker`] through 120 synthetic 16 ms frames with a headless
//! presenter and a simulated clipboard. Events go to both a
//! [`PrettyPrintSink`] on stdout and a [`RecorderSink`], and the recording is
//! exported as a Chrome trace JSON file.

use std::fs::File;
use std::io::{self, BufWriter};

use glyphbox_core::backend::Presenter;
use glyphbox_core::change::{ViewChange, ViewChanges};
use glyphbox_core::clipboard::{ClipboardError, CopyPath, CopyRequest, CopyResult};
use glyphbox_core::config::PickerConfig;
use glyphbox_core::item::ItemHit;
use glyphbox_core::kurbo::Rect;
use glyphbox_core::picker::Picker;
use glyphbox_core::taxonomy::{CategoryId, Taxonomy};
use glyphbox_core::time::{Duration, HostTime};
use glyphbox_core::trace::Tracer;

use glyphbox_debug::fanout::FanoutSink;
use glyphbox_debug::pretty::PrettyPrintSink;
use glyphbox_debug::recorder::RecorderSink;

const FRAME_COUNT: u64 = 120;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

const SMILEYS: CategoryId = CategoryId(0);
const PEOPLE: CategoryId = CategoryId(1);
const FLAGS: CategoryId = CategoryId(2);

fn taxonomy() -> Taxonomy {
    let smileys = (0x1F600..0x1F600 + 150)
        .filter_map(char::from_u32)
        .map(String::from);
    Taxonomy::builder()
        .category("Smileys", "😀", smileys)
        .category("People", "👋", ["👋", "👍", "👏", "🙌", "🤝"])
        .category("Flags", "🏁", ["🇫🇷", "🇯🇵", "🏁"])
        .variants("👍", ["👍", "👍🏻", "👍🏼", "👍🏽", "👍🏾", "👍🏿"])
        .variants("👋", ["👋", "👋🏻", "👋🏼"])
        .label("🇫🇷", "France")
        .label("🇯🇵", "Japan")
        .build()
}

/// Tracks what a real presenter would show and collects clipboard requests.
#[derive(Debug, Default)]
struct HeadlessPresenter {
    content: usize,
    popup_visible: bool,
    clipboard: Vec<CopyRequest>,
}

impl Presenter for HeadlessPresenter {
    fn apply(&mut self, changes: &ViewChanges) {
        self.content = changes.content_len_after(self.content);
        for change in changes {
            match change {
                ViewChange::ShowPopup { .. } => self.popup_visible = true,
                ViewChange::HidePopup => self.popup_visible = false,
                ViewChange::WriteClipboard(request) => self.clipboard.push(request.clone()),
                ViewChange::ShowToast { message, kind } => {
                    println!("  toast ({kind:?}): {message}");
                }
                _ => {}
            }
        }
    }
}

/// Scripted input for one frame, delivered before the frame's tick.
fn script(picker: &mut Picker, frame: u64, now: HostTime) {
    let thumbs = || ItemHit::new("👍", 1);
    let anchor = Rect::new(120.0, 300.0, 160.0, 340.0);
    match frame {
        // Switching away before the first batch lands cancels it.
        0 => {
            picker.select_category(SMILEYS, now);
            picker.select_category(PEOPLE, now);
        }
        4 => picker.select_category(SMILEYS, now),
        10 => picker.primary_click(ItemHit::new("😃", 3)),
        14 => picker.select_category(PEOPLE, now),
        // A burst of secondary clicks collapses into one popup.
        16..=18 => picker.secondary_click(thumbs(), anchor, now),
        30 => {
            picker.variant_click(2);
        }
        40 => picker.secondary_click(thumbs(), anchor, now),
        50 => {
            picker.key_down("Escape");
        }
        60 => picker.select_category(SMILEYS, now),
        70 => picker.primary_click(ItemHit::new("😍", 13)),
        80 => picker.memory_pressure(now),
        90 => picker.select_category(FLAGS, now),
        100 => picker.select_category(FLAGS, now),
        _ => {}
    }
}

/// Settles pending clipboard writes, all failing when `failing` is set.
fn resolve_clipboard(
    picker: &mut Picker,
    presenter: &mut HeadlessPresenter,
    failing: bool,
    now: HostTime,
) {
    for request in presenter.clipboard.drain(..) {
        let result: CopyResult = if failing {
            Err(ClipboardError::Both)
        } else {
            Ok(CopyPath::Primary)
        };
        picker.finish_copy(request, result, now);
    }
}

fn main() -> io::Result<()> {
    // -- sinks -------------------------------------------------------------
    let recorder = RecorderSink::new();
    let sinks = FanoutSink::new()
        .with(PrettyPrintSink::new(Box::new(io::stdout())))
        .with(recorder.clone());

    // -- picker ------------------------------------------------------------
    let mut picker = Picker::new(taxonomy(), PickerConfig::web());
    picker.set_tracer(Tracer::new(Box::new(sinks)));
    let mut presenter = HeadlessPresenter::default();

    // -- simulated loop ----------------------------------------------------
    let mut now = HostTime::from_millis(1_000);
    let mut failing_copy = false;

    for frame in 0..FRAME_COUNT {
        // The clipboard promise settles one frame after the request.
        resolve_clipboard(&mut picker, &mut presenter, failing_copy, now);
        failing_copy = frame == 70;

        script(&mut picker, frame, now);
        presenter.apply(&picker.take_changes());

        picker.tick(now);
        presenter.apply(&picker.take_changes());

        now = now.saturating_add(FRAME_INTERVAL);
    }

    let stats = picker.stats();
    println!(
        "content={} popup={} built={} category_hits={} variant_lists={} variant_hits={}",
        presenter.content,
        presenter.popup_visible,
        stats.items_built,
        stats.category_cache_hits,
        stats.variant_lists_built,
        stats.variant_cache_hits,
    );

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let mut writer = BufWriter::new(File::create(path)?);
    glyphbox_debug::chrome::export(&recorder.to_bytes(), &mut writer)?;

    println!("Wrote {path} ({FRAME_COUNT} frames, {} bytes recorded)", recorder.len());
    Ok(())
}

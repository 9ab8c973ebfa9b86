// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The top-level interaction controller.
//!
//! A [`Picker`] owns every piece of picker state: the taxonomy, both render
//! caches, the category selection, the batch renderer, the variant popup,
//! the frame queue, the popup debouncer and the revert timers. Hosts feed it
//! input events and frame ticks, then drain the resulting [`ViewChanges`]
//! into a [`Presenter`](crate::backend::Presenter):
//!
//! ```text
//!   input event ──► Picker::{select_category, primary_click, ...}
//!                          │
//!   frame tick ──► Picker::tick(now)
//!                          │
//!                          ▼
//!                  Picker::take_changes() ──► Presenter::apply()
//!                                                   │
//!   clipboard outcome ◄── WriteClipboard ◄──────────┘
//!          │
//!          ▼
//!   Picker::finish_copy()
//! ```
//!
//! Nothing happens between calls. Deferred render batches, the debounced
//! popup request and the copy/toast reverts all wait for the next
//! [`tick`](Picker::tick).

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::cache::RenderCaches;
use crate::change::{ToastKind, ViewChange, ViewChanges};
use crate::clipboard::{CopyRequest, CopyResult};
use crate::config::PickerConfig;
use crate::debounce::Debouncer;
use crate::frame::{Deferred, FrameQueue};
use crate::item::{EmojiItem, ItemHit, ItemSlot};
use crate::popup::{PopupShow, VariantPopup};
use crate::render::{BatchOutcome, BatchRenderer, BatchTicket, RenderOutcome};
use crate::selection::{Selection, SelectionChange};
use crate::taxonomy::{CategoryId, Taxonomy};
use crate::time::HostTime;
use crate::timers::TimerQueue;
use crate::trace::{
    BatchEvent, CachesClearedEvent, CopyEvent, RenderCancelledEvent, RenderEvent, RenderSource,
    SnapshotEvent, Tracer, VariantPopupEvent,
};

/// Message shown when neither clipboard tier could copy.
pub const COPY_FAILED_MESSAGE: &str = "Copy failed";

/// Work counters, used to confirm cache reuse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Emoji item descriptors built from taxonomy data.
    pub items_built: usize,
    /// Category renders served from the category cache.
    pub category_cache_hits: usize,
    /// Variant lists built from taxonomy data.
    pub variant_lists_built: usize,
    /// Variant popups served from the variant cache.
    pub variant_cache_hits: usize,
}

#[derive(Clone, Debug)]
struct PopupRequest {
    symbol: String,
    index: usize,
    mount: u64,
    anchor: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Revert {
    Copied { slot: ItemSlot, mount: u64 },
    Toast,
}

/// The emoji picker's rendering and interaction state.
#[derive(Debug)]
pub struct Picker {
    taxonomy: Taxonomy,
    config: PickerConfig,
    caches: RenderCaches,
    selection: Selection,
    renderer: BatchRenderer,
    popup: VariantPopup,
    frames: FrameQueue,
    popup_requests: Debouncer<PopupRequest>,
    timers: TimerQueue<Revert>,
    outbox: Vec<ViewChange>,
    tracer: Tracer,
}

impl Picker {
    /// Creates a picker over `taxonomy` with empty caches.
    #[must_use]
    pub fn new(taxonomy: Taxonomy, config: PickerConfig) -> Self {
        Self {
            taxonomy,
            config,
            caches: RenderCaches::new(),
            selection: Selection::new(),
            renderer: BatchRenderer::new(config.batch_size),
            popup: VariantPopup::new(),
            frames: FrameQueue::new(),
            popup_requests: Debouncer::new(config.variant_debounce),
            timers: TimerQueue::new(),
            outbox: Vec::new(),
            tracer: Tracer::none(),
        }
    }

    /// Replaces the trace sink owner.
    pub fn set_tracer(&mut self, tracer: Tracer) {
        self.tracer = tracer;
    }

    /// The loaded taxonomy.
    #[must_use]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// The configuration fixed at construction.
    #[must_use]
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Both render caches.
    #[must_use]
    pub fn caches(&self) -> &RenderCaches {
        &self.caches
    }

    /// The expanded category, if any.
    #[must_use]
    pub fn active_category(&self) -> Option<CategoryId> {
        self.selection.active()
    }

    /// Returns `true` while the variant popup is visible.
    #[must_use]
    pub fn is_popup_visible(&self) -> bool {
        self.popup.is_visible()
    }

    /// Items currently in the content area, in order.
    #[must_use]
    pub fn mounted(&self) -> &[EmojiItem] {
        self.renderer.mounted()
    }

    /// Work counters since construction.
    #[must_use]
    pub fn stats(&self) -> RenderStats {
        RenderStats {
            items_built: self.renderer.items_built(),
            category_cache_hits: self.renderer.cache_hits(),
            variant_lists_built: self.popup.lists_built(),
            variant_cache_hits: self.popup.cache_hits(),
        }
    }

    /// Returns `true` if a later [`tick`](Self::tick) has something to do.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        !self.frames.is_empty() || self.popup_requests.is_pending() || !self.timers.is_empty()
    }

    /// Takes the changes accumulated since the last call.
    pub fn take_changes(&mut self) -> ViewChanges {
        ViewChanges {
            changes: core::mem::take(&mut self.outbox),
        }
    }

    /// Handles a click on a category header.
    ///
    /// Clicking the active category collapses it. Clicking any other category
    /// renders it, replacing whatever was shown. The header marker follows on
    /// the next frame.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not part of the taxonomy.
    pub fn select_category(&mut self, id: CategoryId, now: HostTime) {
        match self.selection.toggle(id) {
            SelectionChange::Closed(_) => {
                self.frames.defer(Deferred::SelectHeader(None));
                self.outbox.push(ViewChange::SetContentActive(false));
                self.renderer.clear(&mut self.outbox);
            }
            SelectionChange::Opened { category, .. } => {
                self.frames.defer(Deferred::SelectHeader(Some(category)));
                let outcome = self.renderer.render(
                    &self.taxonomy,
                    category,
                    &mut self.caches.categories,
                    &mut self.outbox,
                );
                self.trace_render(category, outcome, now);
                if let RenderOutcome::Started { ticket, .. } = outcome {
                    self.frames.defer(Deferred::Batch(ticket));
                }
                self.outbox.push(ViewChange::SetContentActive(true));
                self.frames.defer(Deferred::ScrollIntoView);
            }
        }
    }

    /// Handles a primary click on a content item: copies its symbol.
    pub fn primary_click(&mut self, hit: ItemHit) {
        self.outbox.push(ViewChange::WriteClipboard(CopyRequest {
            text: hit.symbol,
            target: ItemSlot::Content(hit.index),
            mount: self.renderer.generation(),
        }));
    }

    /// Handles a secondary click on a content item.
    ///
    /// The popup request is debounced; only the last request in a burst is
    /// shown, on the first tick after the quiet period.
    pub fn secondary_click(&mut self, hit: ItemHit, anchor: Rect, now: HostTime) {
        self.popup_requests.request(
            PopupRequest {
                symbol: hit.symbol,
                index: hit.index,
                mount: self.renderer.generation(),
                anchor,
            },
            now,
        );
    }

    /// Handles a click on popup entry `index`: copies it and hides the popup.
    ///
    /// Returns `false` if the popup is hidden or has no such entry.
    pub fn variant_click(&mut self, index: usize) -> bool {
        let Some(item) = self.popup.variant(index) else {
            return false;
        };
        let text = item.symbol.clone();
        self.outbox.push(ViewChange::WriteClipboard(CopyRequest {
            text,
            target: ItemSlot::Popup(index),
            mount: self.popup.mounts(),
        }));
        self.popup.hide(&mut self.outbox);
        true
    }

    /// Handles a click outside both the popup and the emoji items.
    ///
    /// Returns `true` if the popup was hidden.
    pub fn outside_click(&mut self) -> bool {
        self.popup.hide(&mut self.outbox)
    }

    /// Handles a key press. The configured cancel key hides the popup.
    ///
    /// Returns `true` if the popup was hidden.
    pub fn key_down(&mut self, key: &str) -> bool {
        key == self.config.cancel_key && self.popup.hide(&mut self.outbox)
    }

    /// Reports the outcome of a [`ViewChange::WriteClipboard`] request.
    ///
    /// On success the item pulses and a confirmation toast appears; both
    /// revert on their own timers. On failure only an error toast appears.
    ///
    /// The pulse is skipped when the item's surface has been remounted since
    /// the request, since the position now holds a different item.
    pub fn finish_copy(&mut self, request: CopyRequest, result: CopyResult, now: HostTime) {
        self.tracer.copy(&CopyEvent { at: now, result });
        match result {
            Ok(_) => {
                let (slot, mount) = (request.target, request.mount);
                if self.is_current(slot, mount) {
                    self.outbox.push(ViewChange::SetCopied { slot, on: true });
                    self.timers.schedule(
                        now.saturating_add(self.config.copy_pulse),
                        Revert::Copied { slot, mount },
                    );
                }
                self.show_toast(format!("Copied: {}", request.text), ToastKind::Success, now);
            }
            Err(_) => {
                self.show_toast(COPY_FAILED_MESSAGE.into(), ToastKind::Error, now);
            }
        }
    }

    /// Handles the host's low-memory signal: drops both caches.
    ///
    /// Mounted content and the visible popup stay as they are.
    pub fn memory_pressure(&mut self, now: HostTime) {
        let (categories, variants) = self.caches.clear_all();
        self.tracer.caches_cleared(&CachesClearedEvent {
            at: now,
            categories,
            variants,
        });
    }

    /// Runs one frame.
    ///
    /// Executes the work deferred before this call, fires the debounced popup
    /// request if its quiet period has passed, then fires due reverts.
    pub fn tick(&mut self, now: HostTime) {
        for work in self.frames.begin_frame() {
            match work {
                Deferred::Batch(ticket) => self.run_batch(ticket, now),
                Deferred::SelectHeader(header) => {
                    self.outbox.push(ViewChange::SelectHeader(header));
                }
                Deferred::ScrollIntoView => {
                    if self.selection.active().is_some() {
                        self.outbox
                            .push(ViewChange::ScrollContentIntoView(self.config.scroll_behavior));
                    }
                }
            }
        }

        if let Some(request) = self.popup_requests.poll(now) {
            self.show_popup(request, now);
        }

        for revert in self.timers.drain_due(now) {
            match revert {
                Revert::Copied { slot, mount } => {
                    if self.is_current(slot, mount) {
                        self.outbox.push(ViewChange::SetCopied { slot, on: false });
                    }
                }
                Revert::Toast => self.outbox.push(ViewChange::HideToast),
            }
        }
    }

    /// Returns `true` if `slot` still refers to the item mounted at `mount`.
    fn is_current(&self, slot: ItemSlot, mount: u64) -> bool {
        match slot {
            ItemSlot::Content(_) => mount == self.renderer.generation(),
            ItemSlot::Popup(_) => mount == self.popup.mounts(),
        }
    }

    fn run_batch(&mut self, ticket: BatchTicket, now: HostTime) {
        let category = ticket.category();
        let outcome = self.renderer.continue_render(
            ticket,
            self.selection.active(),
            &self.taxonomy,
            &mut self.caches.categories,
            &mut self.outbox,
        );
        match outcome {
            BatchOutcome::Continue { start, len, next } => {
                self.tracer.batch(&BatchEvent {
                    at: now,
                    category,
                    start,
                    len,
                });
                self.frames.defer(Deferred::Batch(next));
            }
            BatchOutcome::Finished { start, len, items } => {
                self.tracer.batch(&BatchEvent {
                    at: now,
                    category,
                    start,
                    len,
                });
                self.tracer.snapshot_stored(&SnapshotEvent {
                    at: now,
                    category,
                    items,
                });
            }
            BatchOutcome::Cancelled { rendered, total } => {
                self.tracer.render_cancelled(&RenderCancelledEvent {
                    at: now,
                    category,
                    rendered,
                    total,
                });
            }
        }
    }

    fn show_popup(&mut self, request: PopupRequest, now: HostTime) {
        let shown = self.popup.show(
            &self.taxonomy,
            &request.symbol,
            request.anchor,
            self.is_current(ItemSlot::Content(request.index), request.mount)
                .then_some(request.index),
            self.config.popup_edge_offset,
            &mut self.caches.variants,
            &mut self.outbox,
        );
        let (source, variants) = match shown {
            PopupShow::Skipped => return,
            PopupShow::Built { variants } => (RenderSource::Fresh, variants),
            PopupShow::Reused { variants } => (RenderSource::Cache, variants),
        };
        self.tracer.variant_popup(&VariantPopupEvent {
            at: now,
            source,
            variants,
        });
    }

    fn show_toast(&mut self, message: String, kind: ToastKind, now: HostTime) {
        self.outbox.push(ViewChange::ShowToast { message, kind });
        self.timers.schedule(
            now.saturating_add(self.config.toast_duration),
            Revert::Toast,
        );
    }

    fn trace_render(&mut self, category: CategoryId, outcome: RenderOutcome, now: HostTime) {
        let (source, mounted, total) = match outcome {
            RenderOutcome::Cached { items } => (RenderSource::Cache, items, items),
            RenderOutcome::Complete { items } => (RenderSource::Fresh, items, items),
            RenderOutcome::Started { mounted, total, .. } => (RenderSource::Fresh, mounted, total),
        };
        self.tracer.render(&RenderEvent {
            at: now,
            category,
            source,
            mounted,
            total,
        });
        if let RenderOutcome::Complete { items } = outcome {
            self.tracer.snapshot_stored(&SnapshotEvent {
                at: now,
                category,
                items,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;

    use super::*;
    use crate::clipboard::{ClipboardError, CopyPath};
    use crate::config::ScrollBehavior;
    use crate::time::Duration;

    const THUMBS: [&str; 6] = ["👍", "👍🏻", "👍🏼", "👍🏽", "👍🏾", "👍🏿"];

    fn smileys() -> Vec<String> {
        (0..150)
            .map(|i| {
                char::from_u32(0x1F600 + i)
                    .expect("valid scalar")
                    .into()
            })
            .collect()
    }

    fn taxonomy() -> Taxonomy {
        Taxonomy::builder()
            .category("Smileys", "😀", smileys())
            .category("People", "👍", ["👍", "👋", "🇯🇵"])
            .variants("👍", THUMBS)
            .label("🇯🇵", "Japan")
            .build()
    }

    fn picker() -> Picker {
        Picker::new(taxonomy(), PickerConfig::web())
    }

    fn ms(ms: u64) -> HostTime {
        HostTime::from_millis(ms)
    }

    fn anchor() -> Rect {
        Rect::new(100.0, 200.0, 140.0, 240.0)
    }

    fn smileys_id(picker: &Picker) -> CategoryId {
        picker.taxonomy().find("Smileys").expect("Smileys exists")
    }

    fn people_id(picker: &Picker) -> CategoryId {
        picker.taxonomy().find("People").expect("People exists")
    }

    fn content_changes(changes: &ViewChanges) -> Vec<&ViewChange> {
        changes
            .iter()
            .filter(|change| {
                matches!(
                    change,
                    ViewChange::ReplaceContent(_)
                        | ViewChange::AppendContent(_)
                        | ViewChange::ClearContent
                )
            })
            .collect()
    }

    #[test]
    fn toggling_twice_collapses_the_category() {
        let mut picker = picker();
        let people = people_id(&picker);

        picker.select_category(people, ms(0));
        picker.tick(ms(16));
        picker.take_changes();

        picker.select_category(people, ms(100));
        assert_eq!(picker.active_category(), None);
        assert!(picker.mounted().is_empty());
        assert_eq!(
            picker.take_changes().changes,
            vec![ViewChange::SetContentActive(false), ViewChange::ClearContent]
        );

        picker.tick(ms(116));
        assert_eq!(
            picker.take_changes().changes,
            vec![ViewChange::SelectHeader(None)]
        );
    }

    #[test]
    fn smileys_render_in_two_frames_then_replay_from_cache() {
        let mut picker = picker();
        let smileys = smileys_id(&picker);

        picker.select_category(smileys, ms(0));
        let first = picker.take_changes();
        assert_eq!(first.content_len_after(0), 100);
        assert!(first.changes.contains(&ViewChange::SetContentActive(true)));
        assert!(!picker.caches().categories.contains(&smileys));

        picker.tick(ms(16));
        let second = picker.take_changes();
        let [ViewChange::AppendContent(appended)] = content_changes(&second).as_slice() else {
            panic!("expected one appended batch, got {second:?}");
        };
        assert_eq!(appended.len(), 50);
        assert_eq!(second.content_len_after(100), 150);
        assert_eq!(
            second.changes.last(),
            Some(&ViewChange::ScrollContentIntoView(ScrollBehavior::Smooth))
        );

        let cached = picker
            .caches()
            .categories
            .get(&smileys)
            .expect("cached after the final batch");
        assert_eq!(&*cached, picker.mounted());
        assert_eq!(picker.mounted()[149].symbol, "\u{1F695}");
        assert_eq!(picker.stats().items_built, 150);

        // Collapse and reopen: served from the cache, nothing rebuilt.
        picker.select_category(smileys, ms(100));
        picker.select_category(smileys, ms(200));
        let replay = picker.take_changes();
        let Some(ViewChange::ReplaceContent(replayed)) = content_changes(&replay).last().copied()
        else {
            panic!("expected a replace, got {replay:?}");
        };
        assert!(Rc::ptr_eq(replayed, &cached));
        assert_eq!(picker.stats().items_built, 150);
        assert_eq!(picker.stats().category_cache_hits, 1);
        // Header updates and the scroll are still queued.
        assert!(picker.has_pending_work());
    }

    #[test]
    fn switching_categories_cancels_the_pending_batch() {
        let mut picker = picker();
        let smileys = smileys_id(&picker);
        let people = people_id(&picker);

        picker.select_category(smileys, ms(0));
        picker.select_category(people, ms(5));
        picker.take_changes();

        picker.tick(ms(16));
        let changes = picker.take_changes();
        assert!(content_changes(&changes).is_empty());
        assert!(!picker.caches().categories.contains(&smileys));
        assert_eq!(picker.mounted().len(), 3);
        assert_eq!(picker.active_category(), Some(people));
    }

    #[test]
    fn switching_to_a_cached_category_mid_render_replays_its_snapshot() {
        let mut picker = picker();
        let smileys = smileys_id(&picker);
        let people = people_id(&picker);

        picker.select_category(people, ms(0));
        picker.tick(ms(16));
        picker.take_changes();
        let cached = picker
            .caches()
            .categories
            .get(&people)
            .expect("small category is cached on first render");

        picker.select_category(smileys, ms(100));
        picker.take_changes();
        picker.select_category(people, ms(110));
        let switched = picker.take_changes();
        let [ViewChange::ReplaceContent(replayed)] = content_changes(&switched).as_slice() else {
            panic!("expected a single replace, got {switched:?}");
        };
        assert!(Rc::ptr_eq(replayed, &cached));
        assert_eq!(picker.stats().category_cache_hits, 1);
        assert_eq!(picker.stats().items_built, 3 + 100);

        // The pending Smileys batch is dropped without appending.
        picker.tick(ms(116));
        let changes = picker.take_changes();
        assert!(content_changes(&changes).is_empty());
        assert!(!picker.caches().categories.contains(&smileys));
        assert_eq!(picker.mounted(), &*cached);
        assert!(!picker.has_pending_work());
    }

    #[test]
    fn copy_settling_after_a_category_switch_skips_the_pulse() {
        let mut picker = picker();
        let smileys = smileys_id(&picker);
        let people = people_id(&picker);

        picker.select_category(smileys, ms(0));
        picker.take_changes();
        picker.primary_click(ItemHit::new("😀", 0));
        let changes = picker.take_changes();
        let [ViewChange::WriteClipboard(request)] = changes.changes.as_slice() else {
            panic!("expected a clipboard write, got {changes:?}");
        };
        let request = request.clone();

        picker.select_category(people, ms(10));
        picker.take_changes();
        assert_eq!(picker.mounted()[0].symbol, "👍");

        picker.finish_copy(request, Ok(CopyPath::Primary), ms(20));
        assert_eq!(
            picker.take_changes().changes,
            vec![ViewChange::ShowToast {
                message: "Copied: 😀".into(),
                kind: ToastKind::Success
            }]
        );

        picker.tick(ms(3000));
        let later = picker.take_changes();
        assert!(
            !later
                .iter()
                .any(|change| matches!(change, ViewChange::SetCopied { .. })),
            "no pulse may touch the new content: {later:?}"
        );
        assert!(later.changes.contains(&ViewChange::HideToast));
    }

    #[test]
    fn copy_pulse_survives_an_appended_batch() {
        let mut picker = picker();
        let smileys = smileys_id(&picker);

        picker.select_category(smileys, ms(0));
        picker.primary_click(ItemHit::new("😀", 0));
        let changes = picker.take_changes();
        let Some(ViewChange::WriteClipboard(request)) = changes.changes.last() else {
            panic!("expected a clipboard write, got {changes:?}");
        };
        let request = request.clone();

        // The second batch only appends; position 0 still holds 😀.
        picker.tick(ms(16));
        picker.take_changes();

        picker.finish_copy(request, Ok(CopyPath::Primary), ms(20));
        assert_eq!(
            picker.take_changes().changes.first(),
            Some(&ViewChange::SetCopied {
                slot: ItemSlot::Content(0),
                on: true
            })
        );
        picker.tick(ms(620));
        assert!(picker.take_changes().changes.contains(&ViewChange::SetCopied {
            slot: ItemSlot::Content(0),
            on: false
        }));
    }

    #[test]
    fn remounted_popup_drops_a_pending_variant_pulse() {
        let mut picker = picker();
        picker.secondary_click(ItemHit::new("👍", 0), anchor(), ms(0));
        picker.tick(ms(50));
        assert!(picker.variant_click(1));
        let changes = picker.take_changes();
        let Some(ViewChange::WriteClipboard(request)) = changes
            .iter()
            .find(|change| matches!(change, ViewChange::WriteClipboard(_)))
        else {
            panic!("expected a clipboard write, got {changes:?}");
        };
        let request = request.clone();

        picker.secondary_click(ItemHit::new("👍", 0), anchor(), ms(100));
        picker.tick(ms(150));
        picker.take_changes();

        picker.finish_copy(request, Ok(CopyPath::Primary), ms(160));
        assert_eq!(
            picker.take_changes().changes,
            vec![ViewChange::ShowToast {
                message: "Copied: 👍🏻".into(),
                kind: ToastKind::Success
            }]
        );
    }

    #[test]
    fn flag_items_carry_their_label() {
        let mut picker = picker();
        let people = people_id(&picker);
        picker.select_category(people, ms(0));

        let mounted = picker.mounted();
        assert_eq!(mounted[2].label.as_deref(), Some("Japan"));
        assert!(mounted[0].has_variants);
        assert!(!mounted[1].has_variants);
    }

    #[test]
    fn thumbs_up_variant_click_copies_and_hides() {
        let mut picker = picker();
        picker.secondary_click(ItemHit::new("👍", 0), anchor(), ms(0));

        picker.tick(ms(49));
        assert!(picker.take_changes().is_empty());
        assert!(!picker.is_popup_visible());

        picker.tick(ms(50));
        let changes = picker.take_changes();
        let Some(ViewChange::MountPopup(entries)) = changes.changes.first() else {
            panic!("expected popup content, got {changes:?}");
        };
        let symbols: Vec<_> = entries.iter().map(|v| v.symbol.as_str()).collect();
        assert_eq!(symbols, THUMBS);
        assert!(matches!(
            changes.changes[1],
            ViewChange::ShowPopup { edge_offset, .. } if edge_offset == 10.0
        ));
        assert!(picker.is_popup_visible());

        assert!(picker.variant_click(2));
        assert_eq!(
            picker.take_changes().changes,
            vec![
                ViewChange::WriteClipboard(CopyRequest {
                    text: "👍🏼".into(),
                    target: ItemSlot::Popup(2),
                    mount: 1,
                }),
                ViewChange::HidePopup,
            ]
        );
        assert!(!picker.is_popup_visible());
        assert!(!picker.variant_click(2));
    }

    #[test]
    fn popup_anchor_item_is_dropped_once_content_is_replaced() {
        fn shown_item(changes: &ViewChanges) -> Option<Option<usize>> {
            changes.iter().find_map(|change| match change {
                ViewChange::ShowPopup { item, .. } => Some(*item),
                _ => None,
            })
        }

        let mut picker = picker();
        let people = people_id(&picker);
        picker.select_category(people, ms(0));
        picker.take_changes();

        picker.secondary_click(ItemHit::new("👍", 0), anchor(), ms(10));
        picker.tick(ms(60));
        assert_eq!(shown_item(&picker.take_changes()), Some(Some(0)));
        picker.outside_click();

        picker.secondary_click(ItemHit::new("👍", 0), anchor(), ms(100));
        let smileys = smileys_id(&picker);
        picker.select_category(smileys, ms(120));
        picker.tick(ms(150));
        assert_eq!(shown_item(&picker.take_changes()), Some(None));
        assert!(picker.is_popup_visible());
    }

    #[test]
    fn single_form_emoji_shows_no_popup() {
        let mut picker = picker();
        picker.secondary_click(ItemHit::new("👋", 1), anchor(), ms(0));
        picker.tick(ms(60));
        assert!(picker.take_changes().is_empty());
        assert!(!picker.is_popup_visible());
        assert!(picker.caches().variants.is_empty());
    }

    #[test]
    fn reopening_a_popup_reuses_cached_entries() {
        let mut picker = picker();
        picker.secondary_click(ItemHit::new("👍", 0), anchor(), ms(0));
        picker.tick(ms(50));
        picker.outside_click();
        picker.secondary_click(ItemHit::new("👍", 0), anchor(), ms(100));
        picker.tick(ms(150));

        let stats = picker.stats();
        assert_eq!(stats.variant_lists_built, 1);
        assert_eq!(stats.variant_cache_hits, 1);
        assert!(picker.is_popup_visible());
    }

    #[test]
    fn rapid_secondary_clicks_show_only_the_last() {
        let mut picker = Picker::new(
            Taxonomy::builder()
                .category("Hands", "👍", ["👍", "👋"])
                .variants("👍", THUMBS)
                .variants("👋", ["👋", "👋🏻"])
                .build(),
            PickerConfig::web(),
        );
        picker.secondary_click(ItemHit::new("👍", 0), anchor(), ms(0));
        picker.secondary_click(ItemHit::new("👋", 1), anchor(), ms(30));
        picker.tick(ms(60));
        assert!(picker.take_changes().is_empty());

        picker.tick(ms(80));
        let changes = picker.take_changes();
        let mounts: Vec<_> = changes
            .iter()
            .filter_map(|change| match change {
                ViewChange::MountPopup(entries) => Some(entries.len()),
                _ => None,
            })
            .collect();
        assert_eq!(mounts, [2]);
    }

    #[test]
    fn escape_and_outside_click_hide_the_popup() {
        let mut picker = picker();
        picker.secondary_click(ItemHit::new("👍", 0), anchor(), ms(0));
        picker.tick(ms(50));
        picker.take_changes();

        assert!(!picker.key_down("Enter"));
        assert!(picker.is_popup_visible());
        assert!(picker.key_down("Escape"));
        assert_eq!(picker.take_changes().changes, vec![ViewChange::HidePopup]);

        assert!(!picker.outside_click());
        assert!(picker.take_changes().is_empty());

        picker.secondary_click(ItemHit::new("👍", 0), anchor(), ms(100));
        picker.tick(ms(150));
        picker.take_changes();
        assert!(picker.outside_click());
        assert_eq!(picker.take_changes().changes, vec![ViewChange::HidePopup]);
    }

    #[test]
    fn successful_copy_pulses_and_toasts() {
        let mut picker = picker();
        picker.primary_click(ItemHit::new("😀", 0));
        let changes = picker.take_changes();
        let [ViewChange::WriteClipboard(request)] = changes.changes.as_slice() else {
            panic!("expected a clipboard write, got {changes:?}");
        };

        picker.finish_copy(request.clone(), Ok(CopyPath::Primary), ms(1000));
        assert_eq!(
            picker.take_changes().changes,
            vec![
                ViewChange::SetCopied {
                    slot: ItemSlot::Content(0),
                    on: true
                },
                ViewChange::ShowToast {
                    message: "Copied: 😀".into(),
                    kind: ToastKind::Success
                },
            ]
        );

        picker.tick(ms(1599));
        assert!(picker.take_changes().is_empty());
        picker.tick(ms(1600));
        assert_eq!(
            picker.take_changes().changes,
            vec![ViewChange::SetCopied {
                slot: ItemSlot::Content(0),
                on: false
            }]
        );
        picker.tick(ms(3000));
        assert_eq!(picker.take_changes().changes, vec![ViewChange::HideToast]);
        assert!(!picker.has_pending_work());
    }

    #[test]
    fn failed_copy_shows_only_an_error_toast() {
        let mut picker = picker();
        let request = CopyRequest {
            text: "😀".into(),
            target: ItemSlot::Content(0),
            mount: 0,
        };
        picker.finish_copy(request, Err(ClipboardError::Both), ms(0));
        assert_eq!(
            picker.take_changes().changes,
            vec![ViewChange::ShowToast {
                message: COPY_FAILED_MESSAGE.into(),
                kind: ToastKind::Error
            }]
        );
        picker.tick(ms(2000));
        assert_eq!(picker.take_changes().changes, vec![ViewChange::HideToast]);
    }

    #[test]
    fn each_copy_schedules_its_own_reverts() {
        let mut picker = picker();
        let first = CopyRequest {
            text: "😀".into(),
            target: ItemSlot::Content(0),
            mount: 0,
        };
        let second = CopyRequest {
            text: "😁".into(),
            target: ItemSlot::Content(1),
            mount: 0,
        };
        picker.finish_copy(first, Ok(CopyPath::Fallback), ms(0));
        picker.finish_copy(second, Ok(CopyPath::Primary), ms(100));
        picker.take_changes();

        picker.tick(ms(700));
        assert_eq!(
            picker.take_changes().changes,
            vec![
                ViewChange::SetCopied {
                    slot: ItemSlot::Content(0),
                    on: false
                },
                ViewChange::SetCopied {
                    slot: ItemSlot::Content(1),
                    on: false
                },
            ]
        );
        picker.tick(ms(2100));
        assert_eq!(
            picker.take_changes().changes,
            vec![ViewChange::HideToast, ViewChange::HideToast]
        );
    }

    #[test]
    fn memory_pressure_drops_both_caches() {
        let mut picker = picker();
        let people = people_id(&picker);
        picker.select_category(people, ms(0));
        picker.secondary_click(ItemHit::new("👍", 0), anchor(), ms(0));
        picker.tick(ms(50));
        assert_eq!(picker.caches().categories.len(), 1);
        assert_eq!(picker.caches().variants.len(), 1);

        picker.memory_pressure(ms(60));
        assert!(picker.caches().categories.is_empty());
        assert!(picker.caches().variants.is_empty());
        // Mounted content is untouched.
        assert_eq!(picker.mounted().len(), 3);

        picker.select_category(people, ms(100));
        picker.select_category(people, ms(200));
        assert_eq!(picker.stats().items_built, 6);
        assert_eq!(picker.stats().category_cache_hits, 0);
    }

    #[test]
    fn header_and_scroll_wait_for_the_next_frame() {
        let mut picker = picker();
        let people = people_id(&picker);

        picker.select_category(people, ms(0));
        let immediate = picker.take_changes();
        assert!(
            !immediate
                .iter()
                .any(|c| matches!(c, ViewChange::SelectHeader(_) | ViewChange::ScrollContentIntoView(_)))
        );

        picker.tick(ms(16));
        assert_eq!(
            picker.take_changes().changes,
            vec![
                ViewChange::SelectHeader(Some(people)),
                ViewChange::ScrollContentIntoView(ScrollBehavior::Smooth),
            ]
        );
    }

    #[test]
    fn collapsing_before_the_frame_skips_the_scroll() {
        let mut picker = picker();
        let people = people_id(&picker);
        picker.select_category(people, ms(0));
        picker.select_category(people, ms(5));
        picker.take_changes();

        picker.tick(ms(16));
        assert_eq!(
            picker.take_changes().changes,
            vec![
                ViewChange::SelectHeader(Some(people)),
                ViewChange::SelectHeader(None),
            ]
        );
    }

    #[test]
    fn custom_config_is_honoured() {
        let config = PickerConfig {
            batch_size: 40,
            variant_debounce: Duration::from_millis(10),
            cancel_key: "q",
            ..PickerConfig::web()
        };
        let mut picker = Picker::new(taxonomy(), config);
        let smileys = smileys_id(&picker);

        picker.select_category(smileys, ms(0));
        assert_eq!(picker.mounted().len(), 40);
        for frame in 1..=3 {
            picker.tick(ms(frame * 16));
        }
        assert_eq!(picker.mounted().len(), 150);
        assert!(picker.caches().categories.contains(&smileys));

        picker.secondary_click(ItemHit::new("👍", 0), anchor(), ms(100));
        picker.tick(ms(110));
        assert!(picker.is_popup_visible());
        assert!(!picker.key_down("Escape"));
        assert!(picker.key_down("q"));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn trace_events_follow_the_render() {
        use alloc::boxed::Box;
        use core::cell::RefCell;

        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Counts {
            renders: usize,
            batches: usize,
            snapshots: usize,
            cancelled: usize,
            popups: usize,
            copies: usize,
            cleared: usize,
        }
        struct CountingSink(Rc<RefCell<Counts>>);
        impl TraceSink for CountingSink {
            fn on_render(&mut self, _: &RenderEvent) {
                self.0.borrow_mut().renders += 1;
            }
            fn on_batch(&mut self, _: &BatchEvent) {
                self.0.borrow_mut().batches += 1;
            }
            fn on_snapshot_stored(&mut self, _: &SnapshotEvent) {
                self.0.borrow_mut().snapshots += 1;
            }
            fn on_render_cancelled(&mut self, _: &RenderCancelledEvent) {
                self.0.borrow_mut().cancelled += 1;
            }
            fn on_variant_popup(&mut self, _: &VariantPopupEvent) {
                self.0.borrow_mut().popups += 1;
            }
            fn on_copy(&mut self, _: &CopyEvent) {
                self.0.borrow_mut().copies += 1;
            }
            fn on_caches_cleared(&mut self, _: &CachesClearedEvent) {
                self.0.borrow_mut().cleared += 1;
            }
        }

        let counts = Rc::new(RefCell::new(Counts::default()));
        let mut picker = picker();
        picker.set_tracer(Tracer::new(Box::new(CountingSink(Rc::clone(&counts)))));
        let smileys = smileys_id(&picker);
        let people = people_id(&picker);

        picker.select_category(smileys, ms(0));
        picker.tick(ms(16));
        picker.select_category(people, ms(20));
        picker.select_category(smileys, ms(30));
        picker.select_category(people, ms(40));
        picker.secondary_click(ItemHit::new("👍", 0), anchor(), ms(40));
        picker.tick(ms(90));
        picker.finish_copy(
            CopyRequest {
                text: "👍".into(),
                target: ItemSlot::Content(0),
                mount: 0,
            },
            Ok(CopyPath::Primary),
            ms(95),
        );
        picker.memory_pressure(ms(100));

        let counts = counts.borrow();
        assert_eq!(counts.renders, 4);
        assert_eq!(counts.batches, 1);
        // Smileys after its final batch, People once on first render.
        assert_eq!(counts.snapshots, 2);
        assert_eq!(counts.cancelled, 0);
        assert_eq!(counts.popups, 1);
        assert_eq!(counts.copies, 1);
        assert_eq!(counts.cleared, 1);
    }
}

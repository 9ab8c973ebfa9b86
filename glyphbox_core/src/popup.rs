// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The variant popup: alternate forms of one emoji in a floating list.
//!
//! [`VariantPopup::show`] mounts the variant entries (from the variant cache
//! when possible) and asks the presenter to show the popup next to its
//! anchor. Placement needs the popup's rendered size, so the presenter lays
//! the popup out hidden, measures it, calls [`place_popup`] and only then
//! reveals it.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::cache::VariantCache;
use crate::change::ViewChange;
use crate::item::VariantItem;
use crate::taxonomy::Taxonomy;

/// Computes the popup's top-left corner in viewport coordinates.
///
/// The popup is centred horizontally above `anchor` with a `margin` gap,
/// then shifted so it keeps `margin` from both viewport edges (the left edge
/// wins when the popup is too wide for both). When there is not enough room
/// above the anchor, the popup flips below it with the same gap.
#[must_use]
pub fn place_popup(anchor: Rect, popup: Size, viewport: Size, margin: f64) -> Point {
    let centered = anchor.x0 + anchor.width() / 2.0 - popup.width / 2.0;
    let max_x = viewport.width - popup.width - margin;
    let x = centered.min(max_x).max(margin);

    let above = anchor.y0 - popup.height - margin;
    let y = if above < margin {
        anchor.y1 + margin
    } else {
        above
    };

    Point::new(x, y)
}

/// What [`VariantPopup::show`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PopupShow {
    /// The emoji has a single form; nothing was shown.
    Skipped,
    /// Entries were built and cached.
    Built {
        /// Entries mounted.
        variants: usize,
    },
    /// Entries came from the variant cache.
    Reused {
        /// Entries mounted.
        variants: usize,
    },
}

#[derive(Clone, Debug)]
struct Shown {
    emoji: String,
    items: Rc<[VariantItem]>,
}

/// Show/hide state of the variant popup.
#[derive(Clone, Debug, Default)]
pub struct VariantPopup {
    shown: Option<Shown>,
    visible: bool,
    lists_built: usize,
    cache_hits: usize,
    mounts: u64,
}

impl VariantPopup {
    /// Creates a hidden popup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while the popup is visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The base emoji whose variants are (or were last) mounted.
    #[must_use]
    pub fn emoji(&self) -> Option<&str> {
        self.shown.as_ref().map(|shown| shown.emoji.as_str())
    }

    /// Variant lists built from taxonomy data.
    #[must_use]
    pub fn lists_built(&self) -> usize {
        self.lists_built
    }

    /// Popups served from the variant cache.
    #[must_use]
    pub fn cache_hits(&self) -> usize {
        self.cache_hits
    }

    /// Number of times entries have been mounted into the popup.
    #[must_use]
    pub fn mounts(&self) -> u64 {
        self.mounts
    }

    /// Shows the variants of `emoji` next to `anchor`.
    ///
    /// Does nothing for emoji with a single form.
    pub fn show(
        &mut self,
        taxonomy: &Taxonomy,
        emoji: &str,
        anchor: Rect,
        item: Option<usize>,
        edge_offset: f64,
        cache: &mut VariantCache,
        out: &mut Vec<ViewChange>,
    ) -> PopupShow {
        let variants = taxonomy.variants_of(emoji);
        if !variants.has_alternates() {
            return PopupShow::Skipped;
        }

        let (items, outcome) = match cache.get(emoji) {
            Some(items) => {
                self.cache_hits += 1;
                let variants = items.len();
                (items, PopupShow::Reused { variants })
            }
            None => {
                self.lists_built += 1;
                let items: Rc<[VariantItem]> = variants
                    .iter()
                    .map(|symbol| VariantItem {
                        symbol: symbol.into(),
                    })
                    .collect();
                cache.insert(emoji.into(), Rc::clone(&items));
                let variants = items.len();
                (items, PopupShow::Built { variants })
            }
        };

        out.push(ViewChange::MountPopup(Rc::clone(&items)));
        self.mounts += 1;
        out.push(ViewChange::ShowPopup {
            anchor,
            item,
            edge_offset,
        });
        self.shown = Some(Shown {
            emoji: emoji.into(),
            items,
        });
        self.visible = true;
        outcome
    }

    /// Returns the entry at `index` of the visible popup.
    #[must_use]
    pub fn variant(&self, index: usize) -> Option<&VariantItem> {
        if !self.visible {
            return None;
        }
        self.shown.as_ref()?.items.get(index)
    }

    /// Hides the popup. Returns `false` if it was already hidden.
    pub fn hide(&mut self, out: &mut Vec<ViewChange>) -> bool {
        if !self.visible {
            return false;
        }
        self.visible = false;
        out.push(ViewChange::HidePopup);
        true
    }
}

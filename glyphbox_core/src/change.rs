// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered view changes handed from the picker to a presenter.
//!
//! Every picker input (clicks, keys, frame ticks) appends [`ViewChange`]s to
//! an outbox. The host drains it with
//! [`Picker::take_changes`](crate::picker::Picker::take_changes) and hands
//! the result to a [`Presenter`](crate::backend::Presenter), which applies
//! the changes in order.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::clipboard::CopyRequest;
use crate::config::ScrollBehavior;
use crate::item::{EmojiItem, ItemSlot, VariantItem};
use crate::taxonomy::CategoryId;

/// Visual tone of a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToastKind {
    /// Confirmation of a completed action.
    Success,
    /// An action failed.
    Error,
}

/// A single instruction for the presenter.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewChange {
    /// Replace all children of the content area with these items.
    ReplaceContent(Rc<[EmojiItem]>),
    /// Append items after the content area's current children.
    AppendContent(Vec<EmojiItem>),
    /// Remove all children of the content area.
    ClearContent,
    /// Toggle the content area's expanded ("active") state.
    SetContentActive(bool),
    /// Mark exactly this category header as selected (`None` clears all).
    SelectHeader(Option<CategoryId>),
    /// Scroll the content area into view.
    ScrollContentIntoView(ScrollBehavior),
    /// Replace the popup's children with these variant entries.
    MountPopup(Rc<[VariantItem]>),
    /// Measure the mounted popup, place it with
    /// [`place_popup`](crate::popup::place_popup), then make it visible.
    ShowPopup {
        /// Bounding box of the anchor item, in viewport coordinates, as
        /// measured when the popup was requested. Used when `item` is `None`.
        anchor: Rect,
        /// Content position of the anchor item while it is still mounted.
        /// Presenters re-measure that item instead of trusting `anchor`,
        /// which may be stale after a scroll.
        item: Option<usize>,
        /// Gap to the anchor and minimum viewport margin.
        edge_offset: f64,
    },
    /// Remove the popup's visible state.
    HidePopup,
    /// Write text to the system clipboard, then report back through
    /// [`Picker::finish_copy`](crate::picker::Picker::finish_copy).
    WriteClipboard(CopyRequest),
    /// Add or remove the transient "copied" pulse on an item.
    SetCopied {
        /// The item to pulse.
        slot: ItemSlot,
        /// Whether the pulse is on.
        on: bool,
    },
    /// Show the toast with a message.
    ShowToast {
        /// Text to display.
        message: String,
        /// Visual tone.
        kind: ToastKind,
    },
    /// Hide the toast.
    HideToast,
}

/// Changes accumulated since the last drain, in application order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewChanges {
    /// The changes, oldest first.
    pub changes: Vec<ViewChange>,
}

impl ViewChanges {
    /// Returns `true` if there is nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of pending changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Iterates over the changes in application order.
    pub fn iter(&self) -> core::slice::Iter<'_, ViewChange> {
        self.changes.iter()
    }

    /// Counts the items a presenter would have in the content area after
    /// applying these changes to an area holding `before` items.
    #[must_use]
    pub fn content_len_after(&self, before: usize) -> usize {
        self.changes.iter().fold(before, |len, change| match change {
            ViewChange::ReplaceContent(items) => items.len(),
            ViewChange::AppendContent(items) => len + items.len(),
            ViewChange::ClearContent => 0,
            _ => len,
        })
    }
}

impl<'a> IntoIterator for &'a ViewChanges {
    type Item = &'a ViewChange;
    type IntoIter = core::slice::Iter<'a, ViewChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn item(symbol: &str) -> EmojiItem {
        EmojiItem {
            symbol: symbol.into(),
            label: None,
            has_variants: false,
        }
    }

    #[test]
    fn content_len_follows_replace_append_clear() {
        let changes = ViewChanges {
            changes: vec![
                ViewChange::ReplaceContent(vec![item("a"), item("b")].into()),
                ViewChange::AppendContent(vec![item("c")]),
                ViewChange::SetContentActive(true),
            ],
        };
        assert_eq!(changes.content_len_after(7), 3);

        let cleared = ViewChanges {
            changes: vec![ViewChange::ClearContent],
        };
        assert_eq!(cleared.content_len_after(3), 0);
        assert_eq!(ViewChanges::default().content_len_after(4), 4);
    }
}

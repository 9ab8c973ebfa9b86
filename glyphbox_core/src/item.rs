// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value-type descriptors of rendered items.
//!
//! The renderer and popup controller never touch a live UI tree. They produce
//! descriptors, the caches store immutable slices of them, and a presenter
//! turns descriptors into fresh native elements every time they are mounted.

use alloc::string::String;

use crate::taxonomy::Taxonomy;

/// One emoji item in a category's content area.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmojiItem {
    /// The emoji symbol; also the item's key for event dispatch.
    pub symbol: String,
    /// Display label (flag and region names), if the taxonomy has one.
    pub label: Option<String>,
    /// Whether the item shows the "has variants" indicator.
    pub has_variants: bool,
}

impl EmojiItem {
    /// Describes `symbol` using the taxonomy's label and variant lookups.
    #[must_use]
    pub fn describe(taxonomy: &Taxonomy, symbol: &str) -> Self {
        Self {
            symbol: symbol.into(),
            label: taxonomy.label_of(symbol).map(Into::into),
            has_variants: taxonomy.variants_of(symbol).has_alternates(),
        }
    }
}

/// One clickable entry in the variant popup.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariantItem {
    /// The variant symbol copied when the entry is clicked.
    pub symbol: String,
}

/// Locates an item in one of the two mounted surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemSlot {
    /// Position in the category content area.
    Content(usize),
    /// Position in the variant popup.
    Popup(usize),
}

/// An emoji item hit by a pointer event, as resolved by delegated dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemHit {
    /// The symbol read from the item's key.
    pub symbol: String,
    /// The item's position in the content area.
    pub index: usize,
}

impl ItemHit {
    /// Creates a hit for `symbol` at `index`.
    #[must_use]
    pub fn new(symbol: impl Into<String>, index: usize) -> Self {
        Self {
            symbol: symbol.into(),
            index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_reads_label_and_variant_indicator() {
        let taxonomy = Taxonomy::builder()
            .category("Mixed", "🎲", ["👍", "🇫🇷", "😀"])
            .variants("👍", ["👍", "👍🏻"])
            .variants("😀", ["😀"])
            .label("🇫🇷", "France")
            .build();

        let thumbs = EmojiItem::describe(&taxonomy, "👍");
        assert!(thumbs.has_variants);
        assert_eq!(thumbs.label, None);

        let flag = EmojiItem::describe(&taxonomy, "🇫🇷");
        assert!(!flag.has_variants);
        assert_eq!(flag.label.as_deref(), Some("France"));

        // A single declared variant is not worth an indicator.
        assert!(!EmojiItem::describe(&taxonomy, "😀").has_variants);
    }
}

// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static emoji taxonomy: categories, variant lists and display labels.
//!
//! A [`Taxonomy`] is loaded once at startup and is read-only afterwards.
//! Categories are addressed by [`CategoryId`] handles whose value is the
//! category's position in display order.
//!
//! With the `serde` feature, a taxonomy deserializes from
//!
//! ```json
//! {
//!   "categories": { "Smileys": { "icon": "🙂", "emojis": ["😀", "😃"] } },
//!   "variants": { "👍": ["👍", "👍🏻"] },
//!   "labels": { "🇫🇷": "France" }
//! }
//! ```
//!
//! where display order is the document order of the `categories` object.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Handle to a category in a [`Taxonomy`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryId(pub u32);

impl CategoryId {
    /// Returns the display position of the category.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

/// A named, ordered group of emoji.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    name: String,
    icon: String,
    emojis: Vec<String>,
}

impl Category {
    /// The category's unique name, also used as its title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The icon glyph shown on the category header.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// The category's emoji in display order.
    #[must_use]
    pub fn emojis(&self) -> &[String] {
        &self.emojis
    }

    /// Number of emoji in the category.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emojis.len()
    }

    /// Returns `true` if the category has no emoji.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }
}

/// The variant forms of one emoji.
///
/// A symbol without declared alternates is its own sole variant, so a
/// `Variants` value always yields at least one symbol for well-formed data.
#[derive(Clone, Copy, Debug)]
pub enum Variants<'a> {
    /// The declared variant list.
    Listed(&'a [String]),
    /// No alternates were declared; the symbol stands alone.
    Sole(&'a str),
}

impl<'a> Variants<'a> {
    /// Number of variant forms.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Listed(list) => list.len(),
            Self::Sole(_) => 1,
        }
    }

    /// Returns `true` only for a declared but empty list (malformed data).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if there is more than one form to choose from.
    #[must_use]
    pub fn has_alternates(&self) -> bool {
        self.len() > 1
    }

    /// Iterates over the variant symbols in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        let (listed, sole): (&'a [String], Option<&'a str>) = match *self {
            Self::Listed(list) => (list, None),
            Self::Sole(symbol) => (&[], Some(symbol)),
        };
        listed.iter().map(String::as_str).chain(sole)
    }
}

/// Category definitions plus variant and label lookups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Taxonomy {
    categories: Vec<Category>,
    variants: BTreeMap<String, Vec<String>>,
    labels: BTreeMap<String, String>,
    total_emoji: usize,
}

impl Taxonomy {
    /// Starts building a taxonomy.
    #[must_use]
    pub fn builder() -> TaxonomyBuilder {
        TaxonomyBuilder::default()
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns `true` if there are no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterates over categories in display order.
    pub fn categories(&self) -> impl ExactSizeIterator<Item = (CategoryId, &Category)> {
        self.categories
            .iter()
            .enumerate()
            .map(|(i, category)| (id_at(i), category))
    }

    /// Returns the category for `id`, if it exists.
    #[must_use]
    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id.index())
    }

    /// Returns the category for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this taxonomy.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> &Category {
        match self.get(id) {
            Some(category) => category,
            None => panic!("{id:?} is not part of this taxonomy ({} categories)", self.len()),
        }
    }

    /// Looks up a category by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<CategoryId> {
        self.categories
            .iter()
            .position(|category| category.name == name)
            .map(id_at)
    }

    /// Returns the variant forms of `symbol`.
    #[must_use]
    pub fn variants_of<'a>(&'a self, symbol: &'a str) -> Variants<'a> {
        match self.variants.get(symbol) {
            Some(list) => Variants::Listed(list),
            None => Variants::Sole(symbol),
        }
    }

    /// Returns the display label for `symbol` (flag and region names).
    #[must_use]
    pub fn label_of(&self, symbol: &str) -> Option<&str> {
        self.labels.get(symbol).map(String::as_str)
    }

    /// Total number of emoji across all categories.
    #[must_use]
    pub fn total_emoji(&self) -> usize {
        self.total_emoji
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "category counts are tiny; u32 is plenty"
)]
fn id_at(index: usize) -> CategoryId {
    CategoryId(index as u32)
}

/// Incremental constructor for a [`Taxonomy`].
#[derive(Clone, Debug, Default)]
pub struct TaxonomyBuilder {
    categories: Vec<Category>,
    variants: BTreeMap<String, Vec<String>>,
    labels: BTreeMap<String, String>,
}

impl TaxonomyBuilder {
    /// Appends a category.
    ///
    /// Re-adding an existing name replaces its icon and emoji but keeps its
    /// original display position.
    #[must_use]
    pub fn category<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        icon: impl Into<String>,
        emojis: impl IntoIterator<Item = S>,
    ) -> Self {
        let category = Category {
            name: name.into(),
            icon: icon.into(),
            emojis: emojis.into_iter().map(Into::into).collect(),
        };
        match self.categories.iter_mut().find(|c| c.name == category.name) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
        self
    }

    /// Declares the variant forms of `symbol` (usually including itself).
    #[must_use]
    pub fn variants<S: Into<String>>(
        mut self,
        symbol: impl Into<String>,
        variants: impl IntoIterator<Item = S>,
    ) -> Self {
        self.variants
            .insert(symbol.into(), variants.into_iter().map(Into::into).collect());
        self
    }

    /// Declares a display label for `symbol`.
    #[must_use]
    pub fn label(mut self, symbol: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(symbol.into(), label.into());
        self
    }

    /// Finishes the taxonomy.
    #[must_use]
    pub fn build(self) -> Taxonomy {
        let total_emoji = self.categories.iter().map(Category::len).sum();
        Taxonomy {
            categories: self.categories,
            variants: self.variants,
            labels: self.labels,
            total_emoji,
        }
    }
}

#[cfg(feature = "serde")]
mod de {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::fmt;

    use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

    use super::{Taxonomy, TaxonomyBuilder};

    #[derive(serde::Deserialize)]
    struct RawTaxonomy {
        categories: OrderedCategories,
        #[serde(default)]
        variants: BTreeMap<String, Vec<String>>,
        #[serde(default)]
        labels: BTreeMap<String, String>,
    }

    #[derive(serde::Deserialize)]
    struct RawCategory {
        icon: String,
        emojis: Vec<String>,
    }

    /// A JSON object of categories, kept in document order.
    struct OrderedCategories(Vec<(String, RawCategory)>);

    impl<'de> Deserialize<'de> for OrderedCategories {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct OrderedVisitor;

            impl<'de> Visitor<'de> for OrderedVisitor {
                type Value = OrderedCategories;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a map of category name to { icon, emojis }")
                }

                fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                    let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                    while let Some(entry) = map.next_entry::<String, RawCategory>()? {
                        entries.push(entry);
                    }
                    Ok(OrderedCategories(entries))
                }
            }

            deserializer.deserialize_map(OrderedVisitor)
        }
    }

    impl<'de> Deserialize<'de> for Taxonomy {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let raw = RawTaxonomy::deserialize(deserializer)?;
            let mut builder = TaxonomyBuilder {
                variants: raw.variants,
                labels: raw.labels,
                ..TaxonomyBuilder::default()
            };
            for (name, category) in raw.categories.0 {
                builder = builder.category(name, category.icon, category.emojis);
            }
            Ok(builder.build())
        }
    }
}

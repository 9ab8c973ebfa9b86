// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental, cache-aware rendering of category content.
//!
//! [`BatchRenderer::render`] either replays a cached snapshot in one step or
//! mounts the first batch of a category synchronously and hands back a
//! [`BatchTicket`] for the rest. Each later batch runs on its own frame via
//! [`BatchRenderer::continue_render`].
//!
//! # Cancellation
//!
//! Every `render` and `clear` bumps the renderer's generation. A ticket is
//! honoured only while its generation is current *and* its category is still
//! the active one; otherwise the batch is dropped. Content already appended
//! stays mounted until the next `render` or `clear` replaces it.
//!
//! # Caching
//!
//! A category snapshot is stored only after its final batch has been
//! appended, so a cache entry always describes complete content.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::cache::CategoryCache;
use crate::change::ViewChange;
use crate::item::EmojiItem;
use crate::taxonomy::{CategoryId, Taxonomy};

/// Continuation token for an in-flight category render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchTicket {
    category: CategoryId,
    generation: u64,
    next: usize,
}

impl BatchTicket {
    /// The category being rendered.
    #[must_use]
    pub const fn category(self) -> CategoryId {
        self.category
    }

    /// Index of the first item of the next batch.
    #[must_use]
    pub const fn next(self) -> usize {
        self.next
    }
}

/// What [`BatchRenderer::render`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The cached snapshot was mounted in one step.
    Cached {
        /// Items mounted.
        items: usize,
    },
    /// The whole category fit in the first batch and is now cached.
    Complete {
        /// Items mounted.
        items: usize,
    },
    /// The first batch is mounted; the rest needs `ticket`.
    Started {
        /// Continuation for the next frame.
        ticket: BatchTicket,
        /// Items mounted so far.
        mounted: usize,
        /// Items in the category.
        total: usize,
    },
}

/// What [`BatchRenderer::continue_render`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchOutcome {
    /// A batch was appended and more remain.
    Continue {
        /// Index of the batch's first item.
        start: usize,
        /// Items appended.
        len: usize,
        /// Continuation for the next frame.
        next: BatchTicket,
    },
    /// The final batch was appended and the snapshot cached.
    Finished {
        /// Index of the batch's first item.
        start: usize,
        /// Items appended.
        len: usize,
        /// Items in the cached snapshot.
        items: usize,
    },
    /// The render was superseded; nothing was appended.
    Cancelled {
        /// Items appended before the render was abandoned.
        rendered: usize,
        /// Items in the category.
        total: usize,
    },
}

/// Materializes category content in fixed-size batches.
#[derive(Clone, Debug)]
pub struct BatchRenderer {
    batch_size: usize,
    generation: u64,
    /// Mirror of the content area's current items.
    mounted: Vec<EmojiItem>,
    items_built: usize,
    cache_hits: usize,
}

impl BatchRenderer {
    /// Creates a renderer that materializes `batch_size` items per step.
    ///
    /// A zero batch size is treated as one.
    #[must_use]
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            generation: 0,
            mounted: Vec::new(),
            items_built: 0,
            cache_hits: 0,
        }
    }

    /// Items currently mounted in the content area, in order.
    #[must_use]
    pub fn mounted(&self) -> &[EmojiItem] {
        &self.mounted
    }

    /// Total item descriptors built from taxonomy data.
    #[must_use]
    pub fn items_built(&self) -> usize {
        self.items_built
    }

    /// Renders served from the category cache.
    #[must_use]
    pub fn cache_hits(&self) -> usize {
        self.cache_hits
    }

    /// Bumped whenever the content area is replaced or cleared.
    ///
    /// Appending a batch keeps the generation, so item positions stay valid
    /// until the next render or clear.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts rendering `id` into the content area.
    ///
    /// Any in-flight render is invalidated. The content area is always
    /// replaced, never appended to, so partial content from an abandoned
    /// render cannot leak into this one.
    pub fn render(
        &mut self,
        taxonomy: &Taxonomy,
        id: CategoryId,
        cache: &mut CategoryCache,
        out: &mut Vec<ViewChange>,
    ) -> RenderOutcome {
        self.generation += 1;

        if let Some(snapshot) = cache.get(&id) {
            self.cache_hits += 1;
            self.mounted.clear();
            self.mounted.extend_from_slice(&snapshot);
            let items = snapshot.len();
            out.push(ViewChange::ReplaceContent(snapshot));
            return RenderOutcome::Cached { items };
        }

        let emojis = taxonomy.category(id).emojis();
        let total = emojis.len();
        let first = self.batch_size.min(total);
        let batch: Rc<[EmojiItem]> = self.describe(taxonomy, &emojis[..first]).into();

        self.mounted.clear();
        self.mounted.extend_from_slice(&batch);
        out.push(ViewChange::ReplaceContent(Rc::clone(&batch)));

        if first < total {
            RenderOutcome::Started {
                ticket: BatchTicket {
                    category: id,
                    generation: self.generation,
                    next: first,
                },
                mounted: first,
                total,
            }
        } else {
            // The mounted content is exactly this batch; share it.
            cache.insert(id, batch);
            RenderOutcome::Complete { items: total }
        }
    }

    /// Appends the batch described by `ticket`, if it is still current.
    pub fn continue_render(
        &mut self,
        ticket: BatchTicket,
        active: Option<CategoryId>,
        taxonomy: &Taxonomy,
        cache: &mut CategoryCache,
        out: &mut Vec<ViewChange>,
    ) -> BatchOutcome {
        let emojis = taxonomy.category(ticket.category).emojis();
        let total = emojis.len();

        if ticket.generation != self.generation || active != Some(ticket.category) {
            return BatchOutcome::Cancelled {
                rendered: ticket.next,
                total,
            };
        }

        let start = ticket.next.min(total);
        let end = (start + self.batch_size).min(total);
        let batch = self.describe(taxonomy, &emojis[start..end]);
        let len = batch.len();
        self.mounted.extend_from_slice(&batch);
        out.push(ViewChange::AppendContent(batch));

        if end < total {
            BatchOutcome::Continue {
                start,
                len,
                next: BatchTicket { next: end, ..ticket },
            }
        } else {
            let snapshot: Rc<[EmojiItem]> = self.mounted.as_slice().into();
            let items = snapshot.len();
            cache.insert(ticket.category, snapshot);
            BatchOutcome::Finished { start, len, items }
        }
    }

    /// Empties the content area and invalidates any in-flight render.
    pub fn clear(&mut self, out: &mut Vec<ViewChange>) {
        self.generation += 1;
        self.mounted.clear();
        out.push(ViewChange::ClearContent);
    }

    fn describe(&mut self, taxonomy: &Taxonomy, symbols: &[String]) -> Vec<EmojiItem> {
        self.items_built += symbols.len();
        symbols
            .iter()
            .map(|symbol| EmojiItem::describe(taxonomy, symbol))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::vec;

    use super::*;

    fn taxonomy(sizes: &[usize]) -> Taxonomy {
        let mut builder = Taxonomy::builder();
        for (c, &size) in sizes.iter().enumerate() {
            builder = builder.category(
                format!("cat{c}"),
                "*",
                (0..size).map(|i| format!("c{c}e{i}")),
            );
        }
        builder.build()
    }

    fn symbols(items: &[EmojiItem]) -> Vec<&str> {
        items.iter().map(|item| item.symbol.as_str()).collect()
    }

    #[test]
    fn small_category_renders_and_caches_in_one_step() {
        let taxonomy = taxonomy(&[3]);
        let mut renderer = BatchRenderer::new(100);
        let mut cache = CategoryCache::new();
        let mut out = Vec::new();

        let outcome = renderer.render(&taxonomy, CategoryId(0), &mut cache, &mut out);
        assert_eq!(outcome, RenderOutcome::Complete { items: 3 });
        assert_eq!(symbols(renderer.mounted()), vec!["c0e0", "c0e1", "c0e2"]);

        let [ViewChange::ReplaceContent(mounted)] = out.as_slice() else {
            panic!("expected a single replace, got {out:?}");
        };
        let cached = cache.get(&CategoryId(0)).expect("cached immediately");
        assert!(Rc::ptr_eq(mounted, &cached));
    }

    #[test]
    fn large_category_caches_only_after_last_batch() {
        let taxonomy = taxonomy(&[250]);
        let mut renderer = BatchRenderer::new(100);
        let mut cache = CategoryCache::new();
        let mut out = Vec::new();

        let RenderOutcome::Started { ticket, mounted, total } =
            renderer.render(&taxonomy, CategoryId(0), &mut cache, &mut out)
        else {
            panic!("expected a started render");
        };
        assert_eq!((mounted, total), (100, 250));
        assert!(!cache.contains(&CategoryId(0)));

        let active = Some(CategoryId(0));
        let BatchOutcome::Continue { start, len, next } =
            renderer.continue_render(ticket, active, &taxonomy, &mut cache, &mut out)
        else {
            panic!("expected a second batch");
        };
        assert_eq!((start, len), (100, 100));
        assert!(!cache.contains(&CategoryId(0)));

        let outcome = renderer.continue_render(next, active, &taxonomy, &mut cache, &mut out);
        assert_eq!(
            outcome,
            BatchOutcome::Finished {
                start: 200,
                len: 50,
                items: 250
            }
        );

        let cached = cache.get(&CategoryId(0)).expect("cached after final batch");
        assert_eq!(&*cached, renderer.mounted());
        let expected: Vec<_> = (0..250).map(|i| format!("c0e{i}")).collect();
        assert_eq!(symbols(&cached), expected);
        assert_eq!(renderer.items_built(), 250);
    }

    #[test]
    fn stale_ticket_is_cancelled_without_appending() {
        let taxonomy = taxonomy(&[150, 5]);
        let mut renderer = BatchRenderer::new(100);
        let mut cache = CategoryCache::new();
        let mut out = Vec::new();

        let RenderOutcome::Started { ticket, .. } =
            renderer.render(&taxonomy, CategoryId(0), &mut cache, &mut out)
        else {
            panic!("expected a started render");
        };
        renderer.render(&taxonomy, CategoryId(1), &mut cache, &mut out);
        out.clear();

        let outcome =
            renderer.continue_render(ticket, Some(CategoryId(1)), &taxonomy, &mut cache, &mut out);
        assert_eq!(
            outcome,
            BatchOutcome::Cancelled {
                rendered: 100,
                total: 150
            }
        );
        assert!(out.is_empty());
        assert!(!cache.contains(&CategoryId(0)));
        assert_eq!(renderer.mounted().len(), 5);
    }

    #[test]
    fn rerender_of_same_category_invalidates_old_ticket() {
        let taxonomy = taxonomy(&[150]);
        let mut renderer = BatchRenderer::new(100);
        let mut cache = CategoryCache::new();
        let mut out = Vec::new();
        let active = Some(CategoryId(0));

        let RenderOutcome::Started { ticket: old, .. } =
            renderer.render(&taxonomy, CategoryId(0), &mut cache, &mut out)
        else {
            panic!("expected a started render");
        };
        renderer.clear(&mut out);
        let RenderOutcome::Started { ticket: fresh, .. } =
            renderer.render(&taxonomy, CategoryId(0), &mut cache, &mut out)
        else {
            panic!("expected a started render");
        };

        assert!(matches!(
            renderer.continue_render(old, active, &taxonomy, &mut cache, &mut out),
            BatchOutcome::Cancelled { .. }
        ));
        assert!(matches!(
            renderer.continue_render(fresh, active, &taxonomy, &mut cache, &mut out),
            BatchOutcome::Finished { items: 150, .. }
        ));
        assert_eq!(renderer.mounted().len(), 150);
    }

    #[test]
    fn cached_render_replays_snapshot_without_building() {
        let taxonomy = taxonomy(&[4]);
        let mut renderer = BatchRenderer::new(100);
        let mut cache = CategoryCache::new();
        let mut out = Vec::new();

        renderer.render(&taxonomy, CategoryId(0), &mut cache, &mut out);
        renderer.clear(&mut out);
        let outcome = renderer.render(&taxonomy, CategoryId(0), &mut cache, &mut out);

        assert_eq!(outcome, RenderOutcome::Cached { items: 4 });
        assert_eq!(renderer.items_built(), 4);
        assert_eq!(renderer.cache_hits(), 1);
        assert_eq!(renderer.mounted().len(), 4);
        assert!(matches!(out.last(), Some(ViewChange::ReplaceContent(items)) if items.len() == 4));
    }

    #[test]
    fn empty_category_caches_an_empty_snapshot() {
        let taxonomy = taxonomy(&[0]);
        let mut renderer = BatchRenderer::new(100);
        let mut cache = CategoryCache::new();
        let mut out = Vec::new();

        let outcome = renderer.render(&taxonomy, CategoryId(0), &mut cache, &mut out);
        assert_eq!(outcome, RenderOutcome::Complete { items: 0 });
        assert!(cache.contains(&CategoryId(0)));
        assert_eq!(out, vec![ViewChange::ReplaceContent(Rc::from(Vec::new()))]);
    }
}

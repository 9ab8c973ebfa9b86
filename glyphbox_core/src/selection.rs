// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which category is expanded.

use crate::taxonomy::CategoryId;

/// Result of [`Selection::toggle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectionChange {
    /// The category became active (possibly replacing another).
    Opened {
        /// The newly active category.
        category: CategoryId,
        /// The category that was active before, if any.
        previous: Option<CategoryId>,
    },
    /// The active category was clicked again and collapsed.
    Closed(CategoryId),
}

/// At most one active category. No selection is the initial resting state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    active: Option<CategoryId>,
}

impl Selection {
    /// Creates a selection with nothing active.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// The active category.
    #[must_use]
    pub const fn active(&self) -> Option<CategoryId> {
        self.active
    }

    /// Closes `category` if it is active, otherwise makes it active.
    pub fn toggle(&mut self, category: CategoryId) -> SelectionChange {
        if self.active == Some(category) {
            self.active = None;
            SelectionChange::Closed(category)
        } else {
            let previous = self.active.replace(category);
            SelectionChange::Opened { category, previous }
        }
    }
}

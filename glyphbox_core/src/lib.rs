// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering and caching core of the glyphbox emoji picker.
//!
//! `glyphbox_core` turns an emoji taxonomy and a stream of user input into
//! an ordered list of view changes. It never touches a UI tree itself, so it
//! is `no_std` compatible (with `alloc`) and fully testable without a
//! browser.
//!
//! # Architecture
//!
//! ```text
//!   Backend (input + frame source)
//!       │
//!       ▼
//!   Picker::{select_category, primary_click, secondary_click, tick, ...}
//!       │
//!       ├──► BatchRenderer ◄──► RenderCaches ◄──► VariantPopup
//!       │
//!       ▼
//!   ViewChanges ──► Presenter::apply()
//! ```
//!
//! **[`taxonomy`]**: Immutable category list, variant map and label map.
//!
//! **[`item`]**: Value-type descriptors of rendered emoji and variant
//! entries. Caches store these rather than live UI nodes.
//!
//! **[`cache`]**: Shared, immutable per-category and per-emoji snapshots.
//! Entries are only written for complete content and are only dropped by the
//! low-memory signal.
//!
//! **[`render`]**: Batched category rendering with generation-based
//! cancellation of superseded renders.
//!
//! **[`selection`]** and **[`popup`]**: Single active category, and the
//! variant popup with its viewport-aware placement.
//!
//! **[`picker`]**: The [`Picker`](picker::Picker) that owns all of the above
//! and drives deferred work from frame ticks via [`frame`], [`debounce`] and
//! [`timers`].
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait that
//! platform backends implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! render and cache instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `serde` (disabled by default): Implements `Deserialize` for
//!   [`Taxonomy`](taxonomy::Taxonomy).
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub use kurbo;

pub mod backend;
pub mod cache;
pub mod change;
pub mod clipboard;
pub mod config;
pub mod debounce;
pub mod frame;
pub mod item;
pub mod picker;
pub mod popup;
pub mod render;
pub mod selection;
pub mod taxonomy;
pub mod time;
pub mod timers;
pub mod trace;

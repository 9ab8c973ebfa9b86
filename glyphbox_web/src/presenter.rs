// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM presentation of the picker.
//!
//! [`DomPresenter::mount`] builds the static page structure (category
//! headers and the content area) and locates the popup, toast and total
//! count elements. [`Presenter::apply`] then turns each [`ViewChange`] into
//! DOM mutations. Items are always created fresh from their descriptors, so
//! cached content is never shared between mounts.

use alloc::format;
use alloc::vec::Vec;

use glyphbox_core::backend::Presenter;
use glyphbox_core::change::{ToastKind, ViewChange, ViewChanges};
use glyphbox_core::clipboard::CopyRequest;
use glyphbox_core::config::ScrollBehavior;
use glyphbox_core::item::{EmojiItem, ItemSlot, VariantItem};
use glyphbox_core::popup::place_popup;
use glyphbox_core::taxonomy::{CategoryId, Taxonomy};
use kurbo::{Rect, Size};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, DocumentFragment, Element, HtmlElement, ScrollIntoViewOptions};

use crate::dom_rect;

/// Class of a category header.
pub const HEADER_CLASS: &str = "category-header";
/// Class of an emoji item in the content area.
pub const ITEM_CLASS: &str = "emoji-item";
/// Class of an entry in the variant popup.
pub const VARIANT_CLASS: &str = "variant-item";
/// Attribute holding an item's symbol.
pub const SYMBOL_ATTR: &str = "data-emoji";
/// Attribute holding an item's position within its surface.
pub const INDEX_ATTR: &str = "data-index";
/// Attribute holding a header's category position.
pub const CATEGORY_ATTR: &str = "data-category";

const ITEM_TITLE: &str = "Click to copy | Right-click for variants";
const VARIANT_TITLE: &str = "Click to copy";

/// The picker's DOM surfaces.
#[derive(Clone, Debug)]
pub struct PickerElements {
    /// Grid of category headers.
    pub grid: HtmlElement,
    /// The content area holding emoji items.
    pub content: HtmlElement,
    /// The floating variant popup.
    pub popup: HtmlElement,
    /// The toast.
    pub toast: HtmlElement,
}

/// Applies [`ViewChanges`] to the DOM.
///
/// Clipboard requests cannot be completed synchronously; they are queued and
/// handed out by [`take_copy_requests`](Self::take_copy_requests).
pub struct DomPresenter {
    document: Document,
    elements: PickerElements,
    headers: Vec<HtmlElement>,
    copy_requests: Vec<CopyRequest>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("headers", &self.headers.len())
            .field("copy_requests", &self.copy_requests.len())
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Builds the category headers and content area inside `container`.
    ///
    /// The popup (`#variantPopup`), toast (`#toast`) and total count
    /// (`#totalCount`) are looked up by id; the popup and toast are created
    /// under `<body>` when the page does not provide them.
    pub fn mount(
        document: &Document,
        container: &HtmlElement,
        taxonomy: &Taxonomy,
    ) -> Result<Self, JsValue> {
        container.replace_children_with_node_0();

        let grid = create_div(document, "categories-grid")?;
        let mut headers = Vec::with_capacity(taxonomy.len());
        for (id, category) in taxonomy.categories() {
            let wrapper = create_div(document, "category")?;
            let header = create_div(document, HEADER_CLASS)?;
            header.set_attribute(CATEGORY_ATTR, &format!("{}", id.index()))?;

            let icon = create_element(document, "span", "category-icon")?;
            icon.set_text_content(Some(category.icon()));
            let title = create_element(document, "span", "category-title")?;
            title.set_text_content(Some(category.name()));

            header.append_child(&icon)?;
            header.append_child(&title)?;
            wrapper.append_child(&header)?;
            grid.append_child(&wrapper)?;
            headers.push(header);
        }

        let content = create_div(document, "emoji-content")?;
        content.set_id("emojiContent");
        container.append_child(&grid)?;
        container.append_child(&content)?;

        let popup = find_or_create(document, "variantPopup", "variant-popup")?;
        let toast = find_or_create(document, "toast", "toast")?;

        if let Some(total) = document.get_element_by_id("totalCount") {
            total.set_text_content(Some(&format!("{}", taxonomy.total_emoji())));
        }

        Ok(Self {
            document: document.clone(),
            elements: PickerElements {
                grid,
                content,
                popup,
                toast,
            },
            headers,
            copy_requests: Vec::new(),
        })
    }

    /// The mounted surfaces.
    #[must_use]
    pub fn elements(&self) -> &PickerElements {
        &self.elements
    }

    /// Takes the clipboard writes requested since the last call.
    pub fn take_copy_requests(&mut self) -> Vec<CopyRequest> {
        core::mem::take(&mut self.copy_requests)
    }

    fn item_element(&self, slot: ItemSlot) -> Option<Element> {
        let (surface, index) = match slot {
            ItemSlot::Content(index) => (&self.elements.content, index),
            ItemSlot::Popup(index) => (&self.elements.popup, index),
        };
        surface.children().item(u32::try_from(index).ok()?)
    }

    fn emoji_fragment(&self, items: &[EmojiItem], first_index: usize) -> DocumentFragment {
        let fragment = self.document.create_document_fragment();
        for (offset, item) in items.iter().enumerate() {
            if let Ok(el) = create_emoji_element(&self.document, item, first_index + offset) {
                let _ = fragment.append_child(&el);
            }
        }
        fragment
    }

    fn variant_fragment(&self, items: &[VariantItem]) -> DocumentFragment {
        let fragment = self.document.create_document_fragment();
        for (index, item) in items.iter().enumerate() {
            if let Ok(el) = create_variant_element(&self.document, item, index) {
                let _ = fragment.append_child(&el);
            }
        }
        fragment
    }

    fn show_popup(&self, anchor: Rect, item: Option<usize>, edge_offset: f64) {
        let popup = &self.elements.popup;
        let anchor = item
            .and_then(|index| self.item_element(ItemSlot::Content(index)))
            .map_or(anchor, |el| anchor_rect(&el));

        // Laid out but not painted while it is measured and placed.
        let style = popup.style();
        let _ = style.set_property("visibility", "hidden");
        let _ = popup.class_list().add_1("show");

        let measured = popup.get_bounding_client_rect();
        let size = Size::new(measured.width(), measured.height());
        let viewport = viewport_size();
        let pos = place_popup(anchor, size, viewport, edge_offset);

        let _ = style.set_property("left", &format!("{}px", pos.x));
        let _ = style.set_property("top", &format!("{}px", pos.y));
        let _ = style.remove_property("visibility");
    }
}

impl Presenter for DomPresenter {
    fn apply(&mut self, changes: &ViewChanges) {
        let content = self.elements.content.clone();
        let mut content_len = content.child_element_count() as usize;

        for change in changes {
            match change {
                ViewChange::ReplaceContent(items) => {
                    let fragment = self.emoji_fragment(items, 0);
                    let _ = content.replace_children_with_node_1(&fragment);
                    content_len = items.len();
                }
                ViewChange::AppendContent(items) => {
                    let fragment = self.emoji_fragment(items, content_len);
                    let _ = content.append_child(&fragment);
                    content_len += items.len();
                }
                ViewChange::ClearContent => {
                    let _ = content.replace_children_with_node_0();
                    content_len = 0;
                }
                ViewChange::SetContentActive(on) => {
                    let _ = content.class_list().toggle_with_force("active", *on);
                }
                ViewChange::SelectHeader(selected) => {
                    for (index, header) in self.headers.iter().enumerate() {
                        let on = selected.is_some_and(|id: CategoryId| id.index() == index);
                        let _ = header.class_list().toggle_with_force("active", on);
                    }
                }
                ViewChange::ScrollContentIntoView(behavior) => {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(scroll_behavior(*behavior));
                    options.set_block(web_sys::ScrollLogicalPosition::Nearest);
                    content.scroll_into_view_with_scroll_into_view_options(&options);
                }
                ViewChange::MountPopup(items) => {
                    let fragment = self.variant_fragment(items);
                    let _ = self.elements.popup.replace_children_with_node_1(&fragment);
                }
                ViewChange::ShowPopup {
                    anchor,
                    item,
                    edge_offset,
                } => self.show_popup(*anchor, *item, *edge_offset),
                ViewChange::HidePopup => {
                    let _ = self.elements.popup.class_list().remove_1("show");
                }
                ViewChange::WriteClipboard(request) => {
                    self.copy_requests.push(request.clone());
                }
                ViewChange::SetCopied { slot, on } => {
                    if let Some(el) = self.item_element(*slot) {
                        let _ = el.class_list().toggle_with_force("copied", *on);
                    }
                }
                ViewChange::ShowToast { message, kind } => {
                    let toast = &self.elements.toast;
                    toast.set_text_content(Some(message.as_str()));
                    let classes = toast.class_list();
                    let _ = classes.toggle_with_force("error", *kind == ToastKind::Error);
                    let _ = classes.add_1("show");
                }
                ViewChange::HideToast => {
                    let _ = self.elements.toast.class_list().remove_1("show");
                }
            }
        }
    }
}

/// Measures an element in viewport coordinates.
#[must_use]
pub fn anchor_rect(el: &Element) -> Rect {
    dom_rect(&el.get_bounding_client_rect())
}

fn viewport_size() -> Size {
    let Some(window) = web_sys::window() else {
        return Size::ZERO;
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Size::new(width, height)
}

fn scroll_behavior(behavior: ScrollBehavior) -> web_sys::ScrollBehavior {
    match behavior {
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
    }
}

fn create_element(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = document.create_element(tag)?.unchecked_into();
    el.set_class_name(class);
    Ok(el)
}

fn create_div(document: &Document, class: &str) -> Result<HtmlElement, JsValue> {
    create_element(document, "div", class)
}

fn find_or_create(document: &Document, id: &str, class: &str) -> Result<HtmlElement, JsValue> {
    if let Some(el) = document.get_element_by_id(id) {
        return Ok(el.unchecked_into());
    }
    let el = create_div(document, class)?;
    el.set_id(id);
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no <body>"))?;
    body.append_child(&el)?;
    Ok(el)
}

fn create_emoji_element(
    document: &Document,
    item: &EmojiItem,
    index: usize,
) -> Result<HtmlElement, JsValue> {
    let el = create_div(document, ITEM_CLASS)?;
    el.set_attribute(SYMBOL_ATTR, &item.symbol)?;
    el.set_attribute(INDEX_ATTR, &format!("{index}"))?;
    el.set_title(ITEM_TITLE);

    let symbol = create_element(document, "span", "emoji-char")?;
    symbol.set_text_content(Some(&item.symbol));
    el.append_child(&symbol)?;

    if let Some(label) = &item.label {
        let span = create_element(document, "span", "emoji-label")?;
        span.set_text_content(Some(label));
        el.append_child(&span)?;
    }

    if item.has_variants {
        el.append_child(&create_div(document, "emoji-variant-badge")?.into())?;
    }

    Ok(el)
}

fn create_variant_element(
    document: &Document,
    item: &VariantItem,
    index: usize,
) -> Result<HtmlElement, JsValue> {
    let el = create_div(document, VARIANT_CLASS)?;
    el.set_attribute(INDEX_ATTR, &format!("{index}"))?;
    el.set_text_content(Some(&item.symbol));
    el.set_title(VARIANT_TITLE);
    Ok(el)
}

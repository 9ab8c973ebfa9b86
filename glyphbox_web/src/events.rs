// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delegated DOM event wiring.
//!
//! [`Listeners::install`] attaches one listener per surface instead of one
//! per item: the header grid, the content area (`click` and
//! `contextmenu`), the popup, the document (outside clicks and keys) and,
//! where the browser has one, the window's `memorywarning` event. Each
//! listener resolves its target to an [`InputEvent`] and hands it to the
//! host's handler; [`InputEvent::dispatch`] forwards it to the picker.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use glyphbox_core::item::ItemHit;
use glyphbox_core::picker::Picker;
use glyphbox_core::taxonomy::CategoryId;
use glyphbox_core::time::HostTime;
use kurbo::Rect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Element, Event, EventTarget, KeyboardEvent, Node};

use crate::presenter::{
    CATEGORY_ATTR, HEADER_CLASS, INDEX_ATTR, ITEM_CLASS, PickerElements, SYMBOL_ATTR,
    VARIANT_CLASS, anchor_rect,
};

/// A user input resolved from a DOM event.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A category header was clicked.
    Header(CategoryId),
    /// An emoji item was clicked.
    Primary(ItemHit),
    /// An emoji item was right-clicked.
    Secondary {
        /// The item.
        hit: ItemHit,
        /// The item's bounding box in viewport coordinates.
        anchor: Rect,
    },
    /// A popup entry was clicked.
    Variant(usize),
    /// A click landed outside the popup and every emoji item.
    Outside,
    /// A key was pressed (a `KeyboardEvent.key` value).
    Key(String),
    /// The browser signalled memory pressure.
    MemoryWarning,
}

impl InputEvent {
    /// Forwards the event to the matching picker input.
    pub fn dispatch(self, picker: &mut Picker, now: HostTime) {
        match self {
            Self::Header(id) => picker.select_category(id, now),
            Self::Primary(hit) => picker.primary_click(hit),
            Self::Secondary { hit, anchor } => picker.secondary_click(hit, anchor, now),
            Self::Variant(index) => {
                picker.variant_click(index);
            }
            Self::Outside => {
                picker.outside_click();
            }
            Self::Key(key) => {
                picker.key_down(&key);
            }
            Self::MemoryWarning => picker.memory_pressure(now),
        }
    }
}

type Handler = Rc<RefCell<Box<dyn FnMut(InputEvent)>>>;
type Listener = Closure<dyn FnMut(Event)>;

/// Installed event listeners. Dropping this removes them.
pub struct Listeners {
    installed: Vec<(EventTarget, &'static str, Listener)>,
}

impl core::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("installed", &self.installed.len())
            .finish()
    }
}

impl Listeners {
    /// Attaches delegated listeners to the picker's surfaces.
    pub fn install(
        elements: &PickerElements,
        handler: impl FnMut(InputEvent) + 'static,
    ) -> Result<Self, JsValue> {
        let handler: Handler = Rc::new(RefCell::new(Box::new(handler)));
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let mut listeners = Self {
            installed: Vec::new(),
        };

        listeners.listen(&elements.grid, "click", &handler, |event| {
            let header = closest(&event, HEADER_CLASS)?;
            let index = header.get_attribute(CATEGORY_ATTR)?.parse::<u32>().ok()?;
            Some(InputEvent::Header(CategoryId(index)))
        })?;

        listeners.listen(&elements.content, "click", &handler, |event| {
            let item = closest(&event, ITEM_CLASS)?;
            Some(InputEvent::Primary(item_hit(&item)?))
        })?;

        listeners.listen(&elements.content, "contextmenu", &handler, |event| {
            event.prevent_default();
            let item = closest(&event, ITEM_CLASS)?;
            let hit = item_hit(&item)?;
            Some(InputEvent::Secondary {
                hit,
                anchor: anchor_rect(&item),
            })
        })?;

        listeners.listen(&elements.popup, "click", &handler, |event| {
            let entry = closest(&event, VARIANT_CLASS)?;
            let index = entry.get_attribute(INDEX_ATTR)?.parse().ok()?;
            Some(InputEvent::Variant(index))
        })?;

        let popup: Node = elements.popup.clone().into();
        listeners.listen(&document, "click", &handler, move |event| {
            let target = event.target()?;
            let node = target.dyn_ref::<Node>()?;
            let in_popup = popup.contains(Some(node));
            let on_item = closest(&event, ITEM_CLASS).is_some();
            (!in_popup && !on_item).then_some(InputEvent::Outside)
        })?;

        listeners.listen(&document, "keydown", &handler, |event| {
            let key = event.dyn_ref::<KeyboardEvent>()?.key();
            Some(InputEvent::Key(key))
        })?;

        let has_memory_warning =
            js_sys::Reflect::has(&window, &JsValue::from_str("onmemorywarning")).unwrap_or(false);
        if has_memory_warning {
            listeners.listen(&window, "memorywarning", &handler, |_| {
                Some(InputEvent::MemoryWarning)
            })?;
        }

        Ok(listeners)
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: &Handler,
        resolve: impl Fn(Event) -> Option<InputEvent> + 'static,
    ) -> Result<(), JsValue> {
        let handler = Rc::clone(handler);
        let closure = Closure::wrap(Box::new(move |event: Event| {
            if let Some(input) = resolve(event) {
                handler.borrow_mut()(input);
            }
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.installed.push((target.clone(), kind, closure));
        Ok(())
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for (target, kind, closure) in self.installed.drain(..) {
            let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }
}

/// Finds the nearest ancestor-or-self of the event target with `class`.
fn closest(event: &Event, class: &str) -> Option<Element> {
    let target = event.target()?;
    // Text nodes have no `closest`; start from their parent element.
    let start = match target.dyn_ref::<Element>() {
        Some(el) => el.clone(),
        None => target.dyn_ref::<Node>()?.parent_element()?,
    };
    start.closest(&format!(".{class}")).ok().flatten()
}

fn item_hit(item: &Element) -> Option<ItemHit> {
    let symbol = item.get_attribute(SYMBOL_ATTR)?;
    let index = item.get_attribute(INDEX_ATTR)?.parse().ok()?;
    Some(ItemHit::new(symbol, index))
}

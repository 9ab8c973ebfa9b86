// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: an emoji picker driven by `glyphbox_web`.
//!
//! Loads the bundled taxonomy, mounts the picker into `#picker`, wires the
//! delegated listeners and runs [`RafLoop`] to advance batches, debounced
//! popups and timers. Clipboard writes run as browser promises and report
//! back into the picker when they settle.
//!
//! Build with: `wasm-pack build --target web demos/web_picker`
//!
//! Then serve `demos/web_picker/` and open `index.html` in a browser. Build
//! with `--features trace` to log render and cache activity to the console.
//!
//! [`RafLoop`]: glyphbox_web::RafLoop

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use glyphbox_core::config::PickerConfig;
use glyphbox_core::picker::Picker;
use glyphbox_core::taxonomy::Taxonomy;
use glyphbox_core::trace::Tracer;
use glyphbox_web::{ConsoleSink, DomPresenter, InputEvent, Listeners, Presenter as _, RafLoop};

const EMOJI_DATA: &str = include_str!("../data/emoji.json");
const CONTAINER_ID: &str = "picker";

struct App {
    picker: Picker,
    presenter: DomPresenter,
}

type Shared = Rc<RefCell<App>>;

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let container: HtmlElement = document
        .get_element_by_id(CONTAINER_ID)
        .ok_or_else(|| JsValue::from_str("missing #picker container"))?
        .dyn_into()?;

    let taxonomy = load_taxonomy()?;
    let presenter = DomPresenter::mount(&document, &container, &taxonomy)?;
    let elements = presenter.elements().clone();

    let mut picker = Picker::new(taxonomy, PickerConfig::web());
    picker.set_tracer(Tracer::new(Box::new(ConsoleSink)));

    let app: Shared = Rc::new(RefCell::new(App { picker, presenter }));

    let app_input = Rc::clone(&app);
    let listeners = Listeners::install(&elements, move |event: InputEvent| {
        event.dispatch(&mut app_input.borrow_mut().picker, glyphbox_web::now());
        flush(&app_input);
    })?;

    let app_frame = Rc::clone(&app);
    let raf = RafLoop::new(move |now| {
        app_frame.borrow_mut().picker.tick(now);
        flush(&app_frame);
    });
    raf.start();

    // Keep the loop and listeners alive; there is no graceful shutdown on the web.
    core::mem::forget(raf);
    core::mem::forget(listeners);

    Ok(())
}

fn load_taxonomy() -> Result<Taxonomy, JsValue> {
    serde_json::from_str(EMOJI_DATA)
        .map_err(|err| JsValue::from_str(&format!("invalid emoji data: {err}")))
}

/// Applies pending changes and starts any clipboard writes they requested.
fn flush(app: &Shared) {
    let requests = {
        let mut guard = app.borrow_mut();
        let App { picker, presenter } = &mut *guard;
        presenter.apply(&picker.take_changes());
        presenter.take_copy_requests()
    };
    for request in requests {
        let app = Rc::clone(app);
        glyphbox_web::clipboard::spawn_copy(request, move |request, result| {
            app.borrow_mut()
                .picker
                .finish_copy(request, result, glyphbox_web::now());
            flush(&app);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_data_loads() {
        let taxonomy = load_taxonomy().unwrap();
        assert!(!taxonomy.is_empty());
        let people = taxonomy.find("People").unwrap();
        assert!(taxonomy.category(people).len() > 1);
        assert!(taxonomy.variants_of("👍").has_alternates());
        assert_eq!(taxonomy.label_of("🇫🇷"), Some("France"));
    }
}

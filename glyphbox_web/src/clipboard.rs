// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-tier clipboard writes.
//!
//! [`write_text`] tries the async Clipboard API first. When it is missing or
//! the browser rejects the write, a temporary off-screen `<textarea>` is
//! selected and copied with the legacy `execCommand("copy")`.

use glyphbox_core::clipboard::{ClipboardError, CopyPath, CopyRequest, CopyResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

#[wasm_bindgen]
extern "C" {
    // Throws synchronously when `navigator.clipboard` is undefined.
    #[wasm_bindgen(catch, js_namespace = ["navigator", "clipboard"], js_name = "writeText")]
    fn clipboard_write_text(text: &str) -> Result<js_sys::Promise, JsValue>;
}

/// Writes `text` to the system clipboard.
pub async fn write_text(text: &str) -> CopyResult {
    let primary_missing = match clipboard_write_text(text) {
        Ok(promise) => match JsFuture::from(promise).await {
            Ok(_) => return Ok(CopyPath::Primary),
            Err(_) => false,
        },
        Err(_) => true,
    };

    match fallback_copy(text) {
        Ok(true) => Ok(CopyPath::Fallback),
        Ok(false) | Err(FallbackError::Failed) => Err(ClipboardError::Both),
        Err(FallbackError::NoDocument) if primary_missing => Err(ClipboardError::Unavailable),
        Err(FallbackError::NoDocument) => Err(ClipboardError::Rejected),
    }
}

/// Performs `request` in the background and reports its outcome.
pub fn spawn_copy(request: CopyRequest, on_done: impl FnOnce(CopyRequest, CopyResult) + 'static) {
    wasm_bindgen_futures::spawn_local(async move {
        let result = write_text(&request.text).await;
        on_done(request, result);
    });
}

enum FallbackError {
    /// There is no document to host the temporary element.
    NoDocument,
    /// A DOM call threw.
    Failed,
}

impl From<JsValue> for FallbackError {
    fn from(_: JsValue) -> Self {
        Self::Failed
    }
}

fn fallback_copy(text: &str) -> Result<bool, FallbackError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(FallbackError::NoDocument)?;
    let body = document.body().ok_or(FallbackError::NoDocument)?;

    let textarea: HtmlTextAreaElement = document.create_element("textarea")?.unchecked_into();
    textarea.set_value(text);
    let style = textarea.style();
    style.set_property("position", "fixed")?;
    style.set_property("opacity", "0")?;
    body.append_child(&textarea)?;
    textarea.select();

    let copied = document
        .dyn_ref::<HtmlDocument>()
        .map(|html| html.exec_command("copy"))
        .unwrap_or(Ok(false));
    textarea.remove();
    copied.map_err(FallbackError::from)
}

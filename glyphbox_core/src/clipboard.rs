// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipboard request and outcome types.
//!
//! The picker never writes to the clipboard itself. It emits a
//! [`CopyRequest`] and the host reports which tier completed it (or why both
//! failed) through [`Picker::finish_copy`](crate::picker::Picker::finish_copy).

use alloc::string::String;
use core::fmt;

use crate::item::ItemSlot;

/// A pending clipboard write.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CopyRequest {
    /// Text to copy.
    pub text: String,
    /// The item that receives the "copied" pulse on success.
    pub target: ItemSlot,
    /// Mount generation of the surface holding `target` when the copy was
    /// requested. Hosts hand it back unchanged; the pulse is dropped once
    /// that surface has been remounted.
    pub mount: u64,
}

/// Which tier of the clipboard capability completed a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CopyPath {
    /// The platform clipboard API.
    Primary,
    /// The legacy select-and-copy fallback.
    Fallback,
}

/// Why a clipboard write failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClipboardError {
    /// The primary API is missing and no fallback could run.
    Unavailable,
    /// The platform refused the write.
    Rejected,
    /// Both the primary API and the fallback failed.
    Both,
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unavailable => "clipboard is unavailable",
            Self::Rejected => "clipboard write was rejected",
            Self::Both => "clipboard API and fallback copy both failed",
        })
    }
}

impl core::error::Error for ClipboardError {}

/// Result of a clipboard write.
pub type CopyResult = Result<CopyPath, ClipboardError>;

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Clipboard, generated-tree ingestion and JSON import/export.

pub mod ai_tree;
pub mod export;
pub mod paste;
pub mod remap;

use async_trait::async_trait;

use crate::model::NodeId;

pub use ai_tree::{convert_ai_tree, is_ai_tree, parse_ai_tree, AiTreeItem, ConvertedTree};
pub use export::{
    document_from_value, document_schema, export_document, export_to_json, import_from_json,
    validate_document, ExportDocument, ExportMetadata, ExportOptions, EXPORT_VERSION,
};
pub use paste::{
    copy_selection, paste_payload, ClipboardPayload, PasteState, Pasted,
    DEFAULT_PASTE_OFFSET_STEP,
};
pub use remap::{relevel, remap_document, IdTable};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard access was denied")]
    PermissionDenied,
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard backend failed: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("malformed JSON: {0}")]
    Malformed(String),
    #[error("document needs a `nodes` or `edges` array")]
    MissingArrays,
    #[error("invalid document: {0}")]
    InvalidPayload(String),
    #[error("node id {0} appears more than once")]
    DuplicateNode(NodeId),
    #[error("more than one edge from {from} to {to}")]
    DuplicateEdge { from: NodeId, to: NodeId },
    #[error("parent links through {0} form a cycle")]
    ParentCycle(NodeId),
}

/// Text access to a clipboard. Reads may be refused by the host.
#[async_trait]
pub trait ClipboardBackend: Send {
    async fn read_text(&mut self) -> Result<String, ClipboardError>;
    async fn write_text(&mut self, text: String) -> Result<(), ClipboardError>;
}

/// Process-local clipboard for tests and headless hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: String,
    deny_reads: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            deny_reads: false,
        }
    }

    /// Makes every read fail with [`ClipboardError::PermissionDenied`].
    pub fn deny_reads(mut self) -> Self {
        self.deny_reads = true;
        self
    }

    pub fn contents(&self) -> &str {
        &self.text
    }
}

#[async_trait]
impl ClipboardBackend for MemoryClipboard {
    async fn read_text(&mut self) -> Result<String, ClipboardError> {
        if self.deny_reads {
            return Err(ClipboardError::PermissionDenied);
        }
        Ok(self.text.clone())
    }

    async fn write_text(&mut self, text: String) -> Result<(), ClipboardError> {
        self.text = text;
        Ok(())
    }
}

/// The OS clipboard. A handle is opened per call.
#[cfg(feature = "system-clipboard")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    fn open() -> Result<arboard::Clipboard, ClipboardError> {
        arboard::Clipboard::new().map_err(map_arboard_error)
    }
}

#[cfg(feature = "system-clipboard")]
fn map_arboard_error(err: arboard::Error) -> ClipboardError {
    match err {
        arboard::Error::ClipboardNotSupported => {
            ClipboardError::Unavailable("not supported on this platform".to_owned())
        }
        arboard::Error::ClipboardOccupied => {
            ClipboardError::Unavailable("occupied by another process".to_owned())
        }
        other => ClipboardError::Backend(other.to_string()),
    }
}

#[cfg(feature = "system-clipboard")]
#[async_trait]
impl ClipboardBackend for SystemClipboard {
    async fn read_text(&mut self) -> Result<String, ClipboardError> {
        match Self::open()?.get_text() {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(err) => Err(map_arboard_error(err)),
        }
    }

    async fn write_text(&mut self, text: String) -> Result<(), ClipboardError> {
        Self::open()?.set_text(text).map_err(map_arboard_error)
    }
}

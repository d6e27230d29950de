// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::model::{
    Document, EdgeId, IdGenerator, LayoutType, Node, NodeData, NodeId, NodeKind, PathType,
    Position, Side,
};
use crate::ops::EditError;
use crate::store::Graph;

use super::ai_tree::{convert_ai_tree, parse_ai_tree, AiTreeItem};
use super::export::document_from_value;
use super::remap::remap_document;

pub const DEFAULT_PASTE_OFFSET_STEP: f64 = 20.0;

/// What the clipboard text turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardPayload {
    /// This editor's own `{nodes, edges}` shape.
    Document(Document),
    /// The generated-tree format.
    AiTree(Vec<AiTreeItem>),
    Text(String),
}

impl ClipboardPayload {
    /// Classifies clipboard text. Anything that is not one of the JSON shapes is plain text.
    pub fn classify(text: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(text) else {
            return Self::Text(text.to_owned());
        };
        if value.is_object() && (value.get("nodes").is_some() || value.get("edges").is_some()) {
            if let Ok(document) = document_from_value(value.clone()) {
                return Self::Document(document);
            }
        }
        match parse_ai_tree(&value) {
            Some(items) => Self::AiTree(items),
            None => Self::Text(text.to_owned()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Document(_) => "document",
            Self::AiTree(_) => "ai-tree",
            Self::Text(_) => "text",
        }
    }
}

/// Pointer tracking for repeated pastes at the same spot.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteState {
    pointer: Position,
    offset: f64,
    step: f64,
}

impl Default for PasteState {
    fn default() -> Self {
        Self::new(DEFAULT_PASTE_OFFSET_STEP)
    }
}

impl PasteState {
    pub fn new(step: f64) -> Self {
        Self {
            pointer: Position::ORIGIN,
            offset: 0.0,
            step,
        }
    }

    pub fn pointer(&self) -> Position {
        self.pointer
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Moving the pointer resets the offset.
    pub fn set_pointer(&mut self, pointer: Position) {
        if pointer != self.pointer {
            self.pointer = pointer;
            self.offset = 0.0;
        }
    }

    /// Where the next paste lands; each call shifts the following one by one step.
    pub fn next_anchor(&mut self) -> Position {
        let anchor = self.pointer.offset(self.offset, self.offset);
        self.offset += self.step;
        anchor
    }
}

/// Nodes and edges a paste inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pasted {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
    /// Roots that want an auto-layout once inserted.
    pub auto_layout_roots: Vec<NodeId>,
}

impl Pasted {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Inserts `payload` at `anchor` and selects exactly the inserted nodes.
///
/// Blank text pastes nothing.
pub fn paste_payload(
    graph: &mut Graph,
    ids: &mut dyn IdGenerator,
    payload: ClipboardPayload,
    anchor: Position,
    layout_type: LayoutType,
) -> Result<Pasted, EditError> {
    let kind = payload.kind();
    let (document, auto_layout_roots) = match payload {
        ClipboardPayload::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(Pasted::default());
            }
            (text_node(ids, text, anchor), Vec::new())
        }
        ClipboardPayload::AiTree(items) => {
            let converted = convert_ai_tree(&items, anchor, layout_type, ids);
            (converted.document, converted.roots)
        }
        ClipboardPayload::Document(document) => {
            let (mut document, _) = remap_document(document, ids);
            translate_to(&mut document, anchor);
            (document, Vec::new())
        }
    };
    let pasted = insert(graph, document)?;
    debug!(
        kind,
        nodes = pasted.nodes.len(),
        edges = pasted.edges.len(),
        "pasted clipboard payload"
    );
    Ok(Pasted {
        auto_layout_roots,
        ..pasted
    })
}

fn text_node(ids: &mut dyn IdGenerator, text: &str, anchor: Position) -> Document {
    let data = NodeData {
        content: text.to_owned(),
        side: Side::Mid,
        path_type: Some(PathType::default()),
        ..NodeData::default()
    };
    Document::new(
        vec![Node::new(ids.node_id(), NodeKind::Root, anchor, data)],
        Vec::new(),
    )
}

/// Moves the first node onto `anchor`; everything else keeps its offset to it.
fn translate_to(document: &mut Document, anchor: Position) {
    let Some(first) = document.nodes.first() else {
        return;
    };
    let (dx, dy) = first.position.delta_to(anchor);
    for node in &mut document.nodes {
        node.position = node.position.offset(dx, dy);
    }
}

fn insert(graph: &mut Graph, document: Document) -> Result<Pasted, EditError> {
    let mut pasted = Pasted::default();
    for mut node in document.nodes {
        node.selected = false;
        pasted.nodes.push(node.id.clone());
        graph.add_node(node)?;
    }
    for mut edge in document.edges {
        edge.selected = false;
        pasted.edges.push(edge.id.clone());
        graph.add_edge(edge)?;
    }
    let selection: HashSet<NodeId> = pasted.nodes.iter().cloned().collect();
    graph.select_only(&selection);
    Ok(pasted)
}

/// The selected nodes plus every edge that is selected or runs between two selected nodes.
pub fn copy_selection(graph: &Graph) -> Document {
    let selected: HashSet<&NodeId> = graph
        .nodes()
        .iter()
        .filter(|node| node.selected)
        .map(|node| &node.id)
        .collect();
    let nodes = graph
        .nodes()
        .iter()
        .filter(|node| selected.contains(&node.id))
        .cloned()
        .collect();
    let edges = graph
        .edges()
        .iter()
        .filter(|edge| {
            edge.selected || (selected.contains(&edge.source) && selected.contains(&edge.target))
        })
        .cloned()
        .collect();
    Document::new(nodes, edges)
}

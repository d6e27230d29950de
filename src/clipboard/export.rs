// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, HashSet};

use chrono::{SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Document, Edge, IdGenerator, Node, NodeId, Position};
use crate::store::Graph;

use super::remap::remap_document;
use super::ImportError;

pub const EXPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub version: String,
    /// RFC 3339, UTC.
    pub exported_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The saved/exported document: `{nodes, edges, metadata}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub metadata: ExportMetadata,
}

impl ExportDocument {
    pub fn into_document(self) -> Document {
        Document::new(self.nodes, self.edges)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// When `false`, positions are zeroed and measured sizes dropped.
    pub include_layout: bool,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_layout: true,
            title: None,
            description: None,
        }
    }
}

pub fn export_document(graph: &Graph, options: &ExportOptions) -> ExportDocument {
    let mut nodes = graph.nodes().to_vec();
    if !options.include_layout {
        for node in &mut nodes {
            node.position = Position::ORIGIN;
            node.measured = None;
        }
    }
    ExportDocument {
        nodes,
        edges: graph.edges().to_vec(),
        metadata: ExportMetadata {
            version: EXPORT_VERSION.to_owned(),
            exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            title: options.title.clone(),
            description: options.description.clone(),
        },
    }
}

pub fn export_to_json(graph: &Graph, options: &ExportOptions) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&export_document(graph, options))
}

/// Accepts `{nodes}`, `{edges}` or `{nodes, edges}` with optional metadata.
pub fn validate_document(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    let nodes = object.get("nodes");
    let edges = object.get("edges");
    if nodes.is_none() && edges.is_none() {
        return false;
    }
    nodes.map_or(true, Value::is_array) && edges.map_or(true, Value::is_array)
}

/// Decodes a validated `{nodes, edges}` value. Missing positions default to the origin.
///
/// Node ids and `(source, target)` pairs must be unique. Legacy `collapsedChildren` caches are
/// re-inflated, and the resulting `parentId` links must not form a cycle.
pub fn document_from_value(value: Value) -> Result<Document, ImportError> {
    if !validate_document(&value) {
        return Err(ImportError::MissingArrays);
    }
    let document: Document = serde_json::from_value(value)
        .map_err(|err| ImportError::InvalidPayload(err.to_string()))?;
    check_unique(&document)?;

    let mut graph = Graph::from_document(document)
        .map_err(|err| ImportError::InvalidPayload(err.to_string()))?;
    graph.migrate_legacy_collapse();
    let document = graph.to_document();
    check_parent_links(&document)?;
    Ok(document)
}

fn check_unique(document: &Document) -> Result<(), ImportError> {
    let mut nodes = HashSet::with_capacity(document.nodes.len());
    for node in &document.nodes {
        if !nodes.insert(&node.id) {
            return Err(ImportError::DuplicateNode(node.id.clone()));
        }
    }
    let mut pairs = HashSet::with_capacity(document.edges.len());
    for edge in &document.edges {
        if !pairs.insert((&edge.source, &edge.target)) {
            return Err(ImportError::DuplicateEdge {
                from: edge.source.clone(),
                to: edge.target.clone(),
            });
        }
    }
    Ok(())
}

/// Parents outside the document are fine; they turn the child into a root on import.
fn check_parent_links(document: &Document) -> Result<(), ImportError> {
    let parents: HashMap<&NodeId, &NodeId> = document
        .nodes
        .iter()
        .filter_map(|node| node.data.parent_id.as_ref().map(|parent| (&node.id, parent)))
        .collect();
    let mut settled: HashSet<&NodeId> = HashSet::with_capacity(document.nodes.len());
    for node in &document.nodes {
        let mut path = HashSet::new();
        let mut current = &node.id;
        while !settled.contains(current) {
            if !path.insert(current) {
                return Err(ImportError::ParentCycle(current.clone()));
            }
            match parents.get(current) {
                Some(parent) => current = *parent,
                None => break,
            }
        }
        settled.extend(path);
    }
    Ok(())
}

/// Parses an exported or minimal document and gives every node and edge a fresh id.
///
/// Selection is cleared. The caller decides whether to replace or extend its graph.
pub fn import_from_json(text: &str, ids: &mut dyn IdGenerator) -> Result<Document, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| ImportError::Malformed(err.to_string()))?;
    let document = document_from_value(value)?;
    let (mut document, _) = remap_document(document, ids);
    for node in &mut document.nodes {
        node.selected = false;
    }
    for edge in &mut document.edges {
        edge.selected = false;
    }
    Ok(document)
}

/// JSON schema of the export format.
pub fn document_schema() -> schemars::Schema {
    schemars::schema_for!(ExportDocument)
}

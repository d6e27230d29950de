// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, VecDeque};

use crate::model::{
    handle_id, parse_handle, Document, IdGenerator, NodeId, NodeKind, PathType, Side,
};

/// Old-to-new node ids produced by [`remap_document`].
pub type IdTable = HashMap<NodeId, NodeId>;

/// Gives every node and edge of `document` a fresh id.
///
/// Parent, owner and endpoint references are rewritten through the same table, and anchor
/// handles that embed a node id are re-pointed. Edges with an endpoint outside the document are
/// dropped. A node whose parent is not part of the document becomes a root, and levels are
/// recomputed from the new structure.
pub fn remap_document(document: Document, ids: &mut dyn IdGenerator) -> (Document, IdTable) {
    let table: IdTable = document
        .nodes
        .iter()
        .map(|node| (node.id.clone(), ids.node_id()))
        .collect();

    let mut nodes = document.nodes;
    for node in &mut nodes {
        if let Some(new_id) = table.get(&node.id) {
            node.id = new_id.clone();
        }
        match node.data.parent_id.as_ref().and_then(|parent| table.get(parent)) {
            Some(parent) => node.data.parent_id = Some(parent.clone()),
            None => {
                node.data.parent_id = None;
                if !node.is_root() {
                    node.kind = NodeKind::Root;
                    node.data.side = Side::Mid;
                    node.data.path_type.get_or_insert(PathType::default());
                }
            }
        }
        node.data.collapsed_by = node
            .data
            .collapsed_by
            .as_ref()
            .and_then(|owner| table.get(owner))
            .cloned();
        if node.data.collapsed_by.is_none() {
            node.data.is_collapsed = false;
        }
        node.data.collapsed_children = None;
        node.data.is_deleting = false;
    }

    let edges = document
        .edges
        .into_iter()
        .filter_map(|mut edge| {
            let source = table.get(&edge.source)?.clone();
            let target = table.get(&edge.target)?.clone();
            edge.id = ids.edge_id();
            edge.source_handle = edge
                .source_handle
                .as_deref()
                .and_then(|handle| remap_handle(handle, &source));
            edge.target_handle = edge
                .target_handle
                .as_deref()
                .and_then(|handle| remap_handle(handle, &target));
            edge.source = source;
            edge.target = target;
            edge.data.is_deleting = false;
            Some(edge)
        })
        .collect();

    let mut document = Document::new(nodes, edges);
    relevel(&mut document);
    (document, table)
}

fn remap_handle(handle: &str, node_id: &NodeId) -> Option<String> {
    let parsed = parse_handle(handle)?;
    Some(handle_id(parsed.position, parsed.role, node_id))
}

/// Sets every node's `level` to its depth below its root.
pub fn relevel(document: &mut Document) {
    let index: HashMap<NodeId, usize> = document
        .nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id.clone(), idx))
        .collect();
    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut queue = VecDeque::new();
    for (idx, node) in document.nodes.iter().enumerate() {
        match node.data.parent_id.as_ref().and_then(|parent| index.get(parent)) {
            Some(&parent_idx) => children.entry(parent_idx).or_default().push(idx),
            None => queue.push_back((idx, 0)),
        }
    }
    while let Some((idx, level)) = queue.pop_front() {
        document.nodes[idx].data.level = level;
        if let Some(kids) = children.remove(&idx) {
            queue.extend(kids.into_iter().map(|kid| (kid, level + 1)));
        }
    }
}

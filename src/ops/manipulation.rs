// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::model::{IdGenerator, NodeId, NodeKind, PathType, Side};
use crate::store::Graph;

use super::{missing, EditError};

/// Collapses (`collapse = true`) or expands the `side` descendants of `node_id`.
///
/// Collapse flags each matching descendant and records `node_id` as its owner unless another
/// ancestor already owns it. Expand only clears nodes owned by `node_id`. Edges mirror the new
/// flag of their target. Returns the number of nodes whose flag changed.
pub fn toggle_collapse(
    graph: &mut Graph,
    node_id: &NodeId,
    side: Side,
    collapse: bool,
) -> Result<usize, EditError> {
    graph.require_node(node_id).map_err(|_| missing(node_id))?;

    let affected: HashSet<NodeId> = graph
        .descendants(node_id)
        .into_iter()
        .filter(|id| graph.node(id).is_some_and(|node| node.data.side == side))
        .collect();

    let mut changed = 0usize;
    for node in graph.nodes_mut() {
        if !affected.contains(&node.id) {
            continue;
        }
        if collapse {
            if !node.data.is_collapsed {
                changed += 1;
            }
            node.data.is_collapsed = true;
            if node.data.collapsed_by.is_none() {
                node.data.collapsed_by = Some(node_id.clone());
            }
        } else if node.data.collapsed_by.as_ref() == Some(node_id) {
            node.data.is_collapsed = false;
            node.data.collapsed_by = None;
            changed += 1;
        }
    }

    let flags: Vec<(NodeId, bool)> = graph
        .nodes()
        .iter()
        .filter(|node| affected.contains(&node.id))
        .map(|node| (node.id.clone(), node.data.is_collapsed))
        .collect();
    for edge in graph.edges_mut() {
        if let Some((_, flag)) = flags.iter().find(|(id, _)| id == &edge.target) {
            edge.data.is_collapsed = *flag;
        }
    }

    debug!(node_id = %node_id, %side, collapse, changed, "toggled collapse");
    Ok(changed)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub side: Side,
    pub level_delta: i64,
    pub moved: usize,
}

/// Reparents `source_id` (with its whole subtree) under `target_id`.
///
/// `side` is only honored when the target is a root; otherwise the target's side is inherited.
/// Rejects self-moves and moves into the source's own subtree without touching the graph.
pub fn move_to_child(
    graph: &mut Graph,
    source_id: &NodeId,
    target_id: &NodeId,
    side: Option<Side>,
    ids: &mut dyn IdGenerator,
) -> Result<MoveOutcome, EditError> {
    if source_id == target_id {
        warn!(node_id = %source_id, "rejected move onto itself");
        return Err(EditError::MoveOntoSelf {
            node_id: source_id.clone(),
        });
    }
    let source = graph.require_node(source_id).map_err(|_| missing(source_id))?;
    let target = graph.require_node(target_id).map_err(|_| missing(target_id))?;
    if graph.is_descendant(source_id, target_id) {
        warn!(source = %source_id, target = %target_id, "rejected move into own descendant");
        return Err(EditError::MoveIntoDescendant {
            moved: source_id.clone(),
            into: target_id.clone(),
        });
    }

    let source_was_root = source.is_root();
    let old_level = source.data.level;
    let old_side = source.data.side;
    let new_level = target.data.level + 1;
    let new_side = if target.is_root() {
        side.unwrap_or(Side::Left)
    } else {
        target.data.side
    };
    let old_orientation = graph.layout_type_of(source_id).orientation();
    let new_orientation = graph.layout_type_of(target_id).orientation();
    let descendants = graph.descendants(source_id);
    let subtree: HashSet<NodeId> = descendants.iter().cloned().collect();
    let side_changed = new_side != old_side || source_was_root;

    if let Some(node) = graph.node_mut(source_id) {
        if source_was_root {
            node.kind = NodeKind::Text;
            node.data.layout_type = None;
            node.data.is_auto_layout_enabled = None;
            node.data.path_type = None;
            node.data.edge_color = None;
        }
        node.data.parent_id = Some(target_id.clone());
        node.data.level = new_level;
        node.data.side = new_side;
    }
    for node in graph.nodes_mut() {
        if subtree.contains(&node.id) {
            node.data.level = (node.data.level + new_level).saturating_sub(old_level);
            if side_changed {
                node.data.side = new_side;
            }
        }
    }

    match graph.incoming_edge_mut(source_id) {
        Some(edge) => {
            edge.source = target_id.clone();
            edge.route_for_side(new_side, new_orientation);
        }
        None => {
            graph.on_connect(target_id, source_id, ids)?;
        }
    }

    if side_changed || old_orientation != new_orientation {
        for edge in graph.edges_mut() {
            if subtree.contains(&edge.target) {
                edge.route_for_side(new_side, new_orientation);
            }
        }
    }

    debug!(
        source = %source_id,
        target = %target_id,
        side = %new_side,
        moved = descendants.len() + 1,
        "moved subtree"
    );
    Ok(MoveOutcome {
        side: new_side,
        level_delta: i64::from(new_level) - i64::from(old_level),
        moved: descendants.len() + 1,
    })
}

/// Sets the path type for every edge inside the subtree of `root_id`.
///
/// The attribute itself is only stored when `root_id` is a root node. Returns the number of
/// updated edges.
pub fn update_subtree_edge_path_type(
    graph: &mut Graph,
    root_id: &NodeId,
    path_type: PathType,
) -> Result<usize, EditError> {
    let subtree = subtree_of(graph, root_id)?;
    if let Some(node) = graph.node_mut(root_id).filter(|node| node.is_root()) {
        node.data.path_type = Some(path_type);
    }
    let mut updated = 0;
    for edge in graph.edges_mut() {
        if subtree.contains(&edge.source) && subtree.contains(&edge.target) {
            edge.data.path_type = path_type;
            updated += 1;
        }
    }
    Ok(updated)
}

/// Sets the stroke color for every edge inside the subtree of `root_id`.
pub fn update_subtree_edge_color(
    graph: &mut Graph,
    root_id: &NodeId,
    color: &str,
) -> Result<usize, EditError> {
    let subtree = subtree_of(graph, root_id)?;
    if let Some(node) = graph.node_mut(root_id).filter(|node| node.is_root()) {
        node.data.edge_color = Some(color.to_owned());
    }
    let mut updated = 0;
    for edge in graph.edges_mut() {
        if subtree.contains(&edge.source) && subtree.contains(&edge.target) {
            edge.data.stroke_color = color.to_owned();
            updated += 1;
        }
    }
    Ok(updated)
}

fn subtree_of(graph: &Graph, root_id: &NodeId) -> Result<HashSet<NodeId>, EditError> {
    graph.require_node(root_id).map_err(|_| missing(root_id))?;
    Ok(graph.subtree_ids(root_id))
}

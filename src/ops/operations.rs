// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rand::Rng;
use tracing::debug;

use crate::layout::Spacing;
use crate::model::{
    EdgeId, IdGenerator, Node, NodeData, NodeDataPatch, NodeId, NodeKind, PathType, Position,
    Rect, Side, Size,
};
use crate::store::Graph;

use super::placement::position_after_last_sibling;
use super::{missing, EditError};

pub const SHAPE_DEFAULT_KIND: &str = "rectangle";
pub const SHAPE_DEFAULT_SIZE: Size = Size {
    width: 120.0,
    height: 60.0,
};
pub const IMAGE_DEFAULT_SIZE: Size = Size {
    width: 250.0,
    height: 180.0,
};
pub const IMAGE_DEFAULT_ALT: &str = "Image";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewNodeRequest {
    pub content: Option<String>,
    pub position: Option<Position>,
}

/// Adds a standalone root node.
///
/// Without an explicit position the node lands somewhere inside `window`.
pub fn add_node<R: Rng>(
    graph: &mut Graph,
    ids: &mut dyn IdGenerator,
    rng: &mut R,
    window: Rect,
    request: NewNodeRequest,
) -> Result<NodeId, EditError> {
    let position = request.position.unwrap_or_else(|| {
        Position::new(
            window.x + rng.gen_range(0.0..=window.width.max(0.0)),
            window.y + rng.gen_range(0.0..=window.height.max(0.0)),
        )
    });
    let content = request
        .content
        .unwrap_or_else(|| format!("New Node {}", graph.node_count() + 1));
    let data = NodeData {
        content,
        side: Side::Mid,
        path_type: Some(PathType::default()),
        ..NodeData::default()
    };
    let node_id = ids.node_id();
    graph.add_node(Node::new(node_id.clone(), NodeKind::Root, position, data))?;
    debug!(node_id = %node_id, "added root node");
    Ok(node_id)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChildRequest {
    pub parent_id: NodeId,
    pub side: Side,
    pub kind: NodeKind,
    /// Explicit placement; computed from the siblings when absent.
    pub position: Option<Position>,
}

impl ChildRequest {
    pub fn text(parent_id: NodeId, side: Side) -> Self {
        Self {
            parent_id,
            side,
            kind: NodeKind::Text,
            position: None,
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddedChild {
    pub node_id: NodeId,
    pub edge_id: EdgeId,
    /// The subtree root, when it has auto-layout enabled.
    pub auto_layout_root: Option<NodeId>,
}

/// Adds one child under `request.parent_id` plus the connecting edge.
pub fn add_child_node(
    graph: &mut Graph,
    ids: &mut dyn IdGenerator,
    request: ChildRequest,
    spacing: Spacing,
) -> Result<AddedChild, EditError> {
    let parent_id = &request.parent_id;
    let parent = graph.require_node(parent_id).map_err(|_| missing(parent_id))?;
    let layout_type = graph.layout_type_of(parent_id);
    let auto_layout_root = graph
        .root_of(parent_id)
        .filter(|root| root.auto_layout_enabled())
        .map(|root| root.id.clone());

    let all_children = graph.children(parent_id);
    let child_number = all_children.len() + 1;
    let siblings: Vec<&Node> = if layout_type.is_balanced() {
        all_children
            .into_iter()
            .filter(|child| child.data.side == request.side)
            .collect()
    } else {
        all_children
    };
    let position = request.position.unwrap_or_else(|| {
        position_after_last_sibling(parent, &siblings, request.side, layout_type, spacing)
    });

    let kind = match request.kind {
        NodeKind::Root => NodeKind::Text,
        other => other,
    };
    let mut data = NodeData {
        level: parent.data.level + 1,
        parent_id: Some(parent_id.clone()),
        side: request.side,
        content: format!("New node {child_number}"),
        ..NodeData::default()
    };
    match kind {
        NodeKind::Shape => {
            data.shape = Some(SHAPE_DEFAULT_KIND.to_owned());
            data.width = Some(SHAPE_DEFAULT_SIZE.width);
            data.height = Some(SHAPE_DEFAULT_SIZE.height);
        }
        NodeKind::Image => {
            data.width = Some(IMAGE_DEFAULT_SIZE.width);
            data.height = Some(IMAGE_DEFAULT_SIZE.height);
            data.alt = Some(IMAGE_DEFAULT_ALT.to_owned());
        }
        NodeKind::Root | NodeKind::Text => {}
    }

    let node_id = ids.node_id();
    let mut node = Node::new(node_id.clone(), kind, position, data);
    node.measured = Some(Size::default());
    graph.add_node(node)?;
    let edge_id = graph.on_connect(parent_id, &node_id, ids)?;

    debug!(parent = %parent_id, node_id = %node_id, side = %request.side, "added child node");
    Ok(AddedChild {
        node_id,
        edge_id,
        auto_layout_root,
    })
}

/// Shallow-merges `patch` into the node's data.
pub fn update_node_data(
    graph: &mut Graph,
    node_id: &NodeId,
    patch: &NodeDataPatch,
) -> Result<(), EditError> {
    let node = graph.node_mut(node_id).ok_or_else(|| missing(node_id))?;
    patch.apply(&mut node.data);
    Ok(())
}

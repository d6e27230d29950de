// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{EdgeId, LayoutType, NodeId, Position, Side};
use crate::store::Graph;

/// Computed target state for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePlacement {
    pub id: NodeId,
    pub position: Position,
    pub side: Side,
    pub sibling_order: Option<u32>,
}

/// Recomputed anchor ids for one tree edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRoute {
    pub id: EdgeId,
    pub source_handle: String,
    pub target_handle: String,
}

/// The result of a layout computation, not yet written to any graph.
///
/// Structure (sides, sibling order, anchors) and positions are applied separately: the editor
/// writes structure right away and lets the animator own the move to the final positions.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub layout_type: LayoutType,
    pub root_id: NodeId,
    pub placements: Vec<NodePlacement>,
    pub routes: Vec<EdgeRoute>,
}

impl LayoutPlan {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn target_of(&self, node_id: &NodeId) -> Option<Position> {
        self.placements
            .iter()
            .find(|placement| &placement.id == node_id)
            .map(|placement| placement.position)
    }

    /// True when some placed node is not already at its target.
    pub fn moves_any(&self, graph: &Graph) -> bool {
        self.placements.iter().any(|placement| {
            graph
                .node(&placement.id)
                .is_some_and(|node| node.position != placement.position)
        })
    }

    /// Writes sides, sibling order and edge anchors. Ids missing from the graph are skipped.
    pub fn apply_structure(&self, graph: &mut Graph) {
        for placement in &self.placements {
            if let Some(node) = graph.node_mut(&placement.id) {
                node.data.side = placement.side;
                node.data.sibling_order = placement.sibling_order;
            }
        }
        for route in &self.routes {
            if let Some(edge) = graph.edge_mut(&route.id) {
                edge.source_handle = Some(route.source_handle.clone());
                edge.target_handle = Some(route.target_handle.clone());
            }
        }
    }

    /// Writes the exact target positions.
    pub fn apply_positions(&self, graph: &mut Graph) {
        for placement in &self.placements {
            if let Some(node) = graph.node_mut(&placement.id) {
                node.position = placement.position;
            }
        }
    }

    pub fn apply(&self, graph: &mut Graph) {
        self.apply_structure(graph);
        self.apply_positions(graph);
    }

    /// Folds `other` into `self`; entries with the same id are replaced by `other`'s.
    pub fn merge(&mut self, other: LayoutPlan) {
        for placement in other.placements {
            match self.placements.iter_mut().find(|p| p.id == placement.id) {
                Some(existing) => *existing = placement,
                None => self.placements.push(placement),
            }
        }
        for route in other.routes {
            match self.routes.iter_mut().find(|r| r.id == route.id) {
                Some(existing) => *existing = route,
                None => self.routes.push(route),
            }
        }
    }
}

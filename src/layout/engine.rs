// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::debug;

use crate::model::{handle_id, HandlePosition, HandleRole, LayoutType, NodeId};
use crate::store::Graph;

use super::options::LayoutOptions;
use super::plan::{EdgeRoute, LayoutPlan, NodePlacement};
use super::strategy::StrategyRegistry;
use super::tree::LayoutTree;
use super::LayoutError;

/// Computes a plan for `{root_id} ∪ descendants(root_id)` and the tree edges between them.
///
/// `layout_type` defaults to the layout type stored on the subtree's root.
pub fn plan_subtree(
    graph: &Graph,
    root_id: &NodeId,
    layout_type: Option<LayoutType>,
    registry: &StrategyRegistry,
    options: &LayoutOptions,
) -> Result<LayoutPlan, LayoutError> {
    let mut tree = LayoutTree::build(graph, root_id).ok_or_else(|| LayoutError::MissingNode {
        node_id: root_id.clone(),
    })?;
    let layout_type = layout_type.unwrap_or_else(|| graph.layout_type_of(root_id));
    let strategy = registry.get(layout_type)?;

    strategy.prepare(&mut tree);
    let positions = strategy.compute(&tree, options)?;
    if positions.len() != tree.len() {
        return Err(LayoutError::PositionCount {
            expected: tree.len(),
            found: positions.len(),
        });
    }

    let orientation = layout_type.orientation();
    let mut placements = Vec::with_capacity(tree.len());
    let mut routes = Vec::with_capacity(tree.len().saturating_sub(1));
    for (idx, node) in tree.iter() {
        placements.push(NodePlacement {
            id: node.id.clone(),
            position: positions[idx],
            side: node.side,
            sibling_order: node.sibling_order,
        });
        let Some(parent_idx) = node.parent else {
            continue;
        };
        let parent_id = &tree.node(parent_idx).id;
        if let Some(edge) = graph.edge_between(parent_id, &node.id) {
            let (source_pos, target_pos) = HandlePosition::pair_for_side(node.side, orientation);
            routes.push(EdgeRoute {
                id: edge.id.clone(),
                source_handle: handle_id(source_pos, HandleRole::Source, parent_id),
                target_handle: handle_id(target_pos, HandleRole::Target, &node.id),
            });
        }
    }

    debug!(
        root = %root_id,
        layout_type = %layout_type,
        nodes = placements.len(),
        edges = routes.len(),
        "computed layout plan"
    );
    Ok(LayoutPlan {
        layout_type,
        root_id: root_id.clone(),
        placements,
        routes,
    })
}

/// Whole-document layout. Only defined for a forest with exactly one root.
pub fn plan_single_root(
    graph: &Graph,
    layout_type: Option<LayoutType>,
    registry: &StrategyRegistry,
    options: &LayoutOptions,
) -> Result<LayoutPlan, LayoutError> {
    let roots = graph.root_ids();
    match roots.as_slice() {
        [root_id] => plan_subtree(graph, root_id, layout_type, registry, options),
        _ => Err(LayoutError::RootCount { found: roots.len() }),
    }
}

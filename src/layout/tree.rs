// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::model::{NodeId, Position, Side, Size};
use crate::store::Graph;

/// One node of a [`LayoutTree`].
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: NodeId,
    pub size: Size,
    /// Position before layout.
    pub position: Position,
    pub side: Side,
    pub sibling_order: Option<u32>,
    pub is_root_kind: bool,
    pub parent: Option<usize>,
    pub children: SmallVec<[usize; 4]>,
}

/// An index-based copy of one subtree, detached from the store.
///
/// Index 0 is the layout root. Children are kept in sibling order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTree {
    nodes: Vec<TreeNode>,
}

impl LayoutTree {
    /// Copies `{root_id} ∪ descendants(root_id)` out of the graph.
    pub fn build(graph: &Graph, root_id: &NodeId) -> Option<Self> {
        let root = graph.node(root_id)?;
        let mut nodes = vec![TreeNode {
            id: root.id.clone(),
            size: root.size(),
            position: root.position,
            side: root.data.side,
            sibling_order: root.data.sibling_order,
            is_root_kind: root.is_root(),
            parent: None,
            children: SmallVec::new(),
        }];
        let mut index: HashMap<NodeId, usize> = HashMap::from([(root.id.clone(), 0)]);

        // Descendants come back breadth-first, so every parent is indexed before its children.
        for id in graph.descendants(root_id) {
            let Some(node) = graph.node(&id) else {
                continue;
            };
            let Some(parent_idx) = node
                .data
                .parent_id
                .as_ref()
                .and_then(|parent| index.get(parent).copied())
            else {
                continue;
            };
            let idx = nodes.len();
            nodes.push(TreeNode {
                id: node.id.clone(),
                size: node.size(),
                position: node.position,
                side: node.data.side,
                sibling_order: node.data.sibling_order,
                is_root_kind: node.is_root(),
                parent: Some(parent_idx),
                children: SmallVec::new(),
            });
            nodes[parent_idx].children.push(idx);
            index.insert(node.id.clone(), idx);
        }

        let mut tree = Self { nodes };
        tree.sort_children_by_order();
        Some(tree)
    }

    pub const ROOT: usize = 0;

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, idx: usize) -> &TreeNode {
        &self.nodes[idx]
    }

    pub fn node_mut(&mut self, idx: usize) -> &mut TreeNode {
        &mut self.nodes[idx]
    }

    pub fn children(&self, idx: usize) -> &[usize] {
        &self.nodes[idx].children
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &TreeNode)> {
        self.nodes.iter().enumerate()
    }

    /// Whether the layout root is a root-typed node, i.e. the centre of a balanced layout.
    pub fn is_centered(&self) -> bool {
        self.root().is_root_kind
    }

    /// Stable sort of every child list by `sibling_order`; unordered children go last.
    pub fn sort_children_by_order(&mut self) {
        for idx in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[idx].children);
            children.sort_by_key(|&child| self.nodes[child].sibling_order.unwrap_or(u32::MAX));
            self.nodes[idx].children = children;
        }
    }

    /// Pre-order walk starting at `idx`.
    pub fn subtree(&self, idx: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current].children.iter().rev().copied());
        }
        out
    }
}

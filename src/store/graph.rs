// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, HashSet, VecDeque};

use smallvec::SmallVec;

use crate::model::{
    Document, Edge, EdgeData, EdgeId, IdGenerator, LayoutType, Node, NodeId, PathType, Side,
    DEFAULT_EDGE_COLOR,
};

use super::StoreError;

/// The canonical node/edge lists of one editor.
///
/// Nodes are kept in insertion order (the order renderers and exports see) with an id-keyed index
/// next to them. Structure lives in `data.parent_id`; the store itself never validates acyclicity.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_index: HashMap<NodeId, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a loaded document, rejecting duplicate node ids.
    pub fn from_document(document: Document) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(document.nodes.len());
        for node in &document.nodes {
            if !seen.insert(node.id.clone()) {
                return Err(StoreError::DuplicateNode {
                    node_id: node.id.clone(),
                });
            }
        }
        let mut graph = Self {
            nodes: document.nodes,
            edges: document.edges,
            node_index: HashMap::new(),
        };
        graph.reindex();
        Ok(graph)
    }

    pub fn to_document(&self) -> Document {
        Document::new(self.nodes.clone(), self.edges.clone())
    }

    /// Replaces the live state wholesale. Used by undo/redo.
    pub fn restore(&mut self, document: Document) {
        self.nodes = document.nodes;
        self.edges = document.edges;
        self.reindex();
    }

    fn reindex(&mut self) {
        self.node_index.clear();
        for (idx, node) in self.nodes.iter().enumerate() {
            self.node_index.insert(node.id.clone(), idx);
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Mutable access to every node. Node ids must not be changed through this slice.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
        self.reindex();
    }

    pub fn set_edges(&mut self, edges: Vec<Edge>) {
        self.edges = edges;
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.node_index.contains_key(node_id)
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.node_index.get(node_id).map(|&idx| &self.nodes[idx])
    }

    /// Node ids must not be changed through the returned reference.
    pub fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut Node> {
        let idx = *self.node_index.get(node_id)?;
        self.nodes.get_mut(idx)
    }

    pub fn require_node(&self, node_id: &NodeId) -> Result<&Node, StoreError> {
        self.node(node_id).ok_or_else(|| StoreError::MissingNode {
            node_id: node_id.clone(),
        })
    }

    pub fn edge(&self, edge_id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| &edge.id == edge_id)
    }

    pub fn edge_mut(&mut self, edge_id: &EdgeId) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|edge| &edge.id == edge_id)
    }

    pub fn edge_between(&self, source: &NodeId, target: &NodeId) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|edge| &edge.source == source && &edge.target == target)
    }

    /// The edge that enters `node_id`, i.e. the link from its parent.
    pub fn incoming_edge_mut(&mut self, node_id: &NodeId) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|edge| &edge.target == node_id)
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), StoreError> {
        if self.contains_node(&node.id) {
            return Err(StoreError::DuplicateNode { node_id: node.id });
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Adds an edge, keeping at most one edge per ordered `(source, target)` pair.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), StoreError> {
        if self.edge(&edge.id).is_some() {
            return Err(StoreError::DuplicateEdge { edge_id: edge.id });
        }
        if self.edge_between(&edge.source, &edge.target).is_some() {
            return Err(StoreError::DuplicateEdgePair {
                from: edge.source,
                to: edge.target,
            });
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Removes the given nodes and every edge touching one of them.
    ///
    /// Returns the number of removed nodes.
    pub fn remove_nodes(&mut self, node_ids: &HashSet<NodeId>) -> usize {
        if node_ids.is_empty() {
            return 0;
        }
        let before = self.nodes.len();
        self.nodes.retain(|node| !node_ids.contains(&node.id));
        self.edges
            .retain(|edge| !node_ids.contains(&edge.source) && !node_ids.contains(&edge.target));
        self.reindex();
        before - self.nodes.len()
    }

    pub fn remove_edge(&mut self, edge_id: &EdgeId) -> Option<Edge> {
        let idx = self.edges.iter().position(|edge| &edge.id == edge_id)?;
        Some(self.edges.remove(idx))
    }

    pub fn children(&self, node_id: &NodeId) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|node| node.data.parent_id.as_ref() == Some(node_id))
            .collect()
    }

    pub fn has_left_children(&self, node_id: &NodeId) -> bool {
        self.has_children_on(node_id, Side::Left)
    }

    pub fn has_right_children(&self, node_id: &NodeId) -> bool {
        self.has_children_on(node_id, Side::Right)
    }

    fn has_children_on(&self, node_id: &NodeId, side: Side) -> bool {
        self.nodes
            .iter()
            .any(|node| node.data.parent_id.as_ref() == Some(node_id) && node.data.side == side)
    }

    fn children_map(&self) -> HashMap<&NodeId, SmallVec<[&NodeId; 4]>> {
        let mut map: HashMap<&NodeId, SmallVec<[&NodeId; 4]>> = HashMap::new();
        for node in &self.nodes {
            if let Some(parent_id) = &node.data.parent_id {
                map.entry(parent_id).or_default().push(&node.id);
            }
        }
        map
    }

    /// Every transitive descendant of `node_id` in breadth-first order, excluding the node itself.
    pub fn descendants(&self, node_id: &NodeId) -> Vec<NodeId> {
        let children = self.children_map();
        let mut out = Vec::new();
        let mut seen: HashSet<&NodeId> = HashSet::new();
        seen.insert(node_id);
        let mut queue: VecDeque<&NodeId> = VecDeque::from([node_id]);
        while let Some(current) = queue.pop_front() {
            let Some(kids) = children.get(current) else {
                continue;
            };
            for &kid in kids {
                if seen.insert(kid) {
                    out.push(kid.clone());
                    queue.push_back(kid);
                }
            }
        }
        out
    }

    /// `{node_id} ∪ descendants(node_id)`.
    pub fn subtree_ids(&self, node_id: &NodeId) -> HashSet<NodeId> {
        let mut ids: HashSet<NodeId> = self.descendants(node_id).into_iter().collect();
        ids.insert(node_id.clone());
        ids
    }

    /// Whether `candidate` sits somewhere below `ancestor`.
    pub fn is_descendant(&self, ancestor: &NodeId, candidate: &NodeId) -> bool {
        let mut current = self.node(candidate).and_then(|n| n.data.parent_id.as_ref());
        let mut steps = 0;
        while let Some(parent_id) = current {
            if parent_id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                return false;
            }
            current = self.node(parent_id).and_then(|n| n.data.parent_id.as_ref());
        }
        false
    }

    /// Walks the `parent_id` chain until a root-typed node or a node without parent.
    pub fn root_of(&self, node_id: &NodeId) -> Option<&Node> {
        let mut current = self.node(node_id)?;
        for _ in 0..=self.nodes.len() {
            if current.is_root() {
                return Some(current);
            }
            let parent_id = current.data.parent_id.as_ref()?;
            current = self.node(parent_id)?;
        }
        None
    }

    pub fn all_roots(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.is_root())
    }

    pub fn root_ids(&self) -> Vec<NodeId> {
        self.all_roots().map(|node| node.id.clone()).collect()
    }

    /// The layout type of the tree containing `node_id`, or the default.
    pub fn layout_type_of(&self, node_id: &NodeId) -> LayoutType {
        self.root_of(node_id)
            .map(Node::layout_type)
            .unwrap_or_default()
    }

    pub fn path_type_of(&self, node_id: &NodeId) -> PathType {
        self.root_of(node_id).map(Node::path_type).unwrap_or_default()
    }

    /// Edge style for a new link inside the tree containing `node_id`.
    pub fn edge_style_for(&self, node_id: &NodeId) -> EdgeData {
        match self.root_of(node_id) {
            Some(root) => EdgeData {
                path_type: root.path_type(),
                stroke_color: root
                    .data
                    .edge_color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_EDGE_COLOR.to_owned()),
                ..EdgeData::default()
            },
            None => EdgeData::default(),
        }
    }

    /// Synthesizes a styled edge between two existing nodes.
    ///
    /// The style comes from the subtree root of either endpoint. An edge for the same ordered
    /// pair is reused instead of duplicated.
    pub fn on_connect(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        ids: &mut dyn IdGenerator,
    ) -> Result<EdgeId, StoreError> {
        self.require_node(source)?;
        let target_node = self.require_node(target)?;
        if let Some(existing) = self.edge_between(source, target) {
            return Ok(existing.id.clone());
        }
        let side = target_node.data.side;

        let style_anchor = if self.root_of(source).is_some() {
            source
        } else {
            target
        };
        let data = self.edge_style_for(style_anchor);
        let orientation = self.layout_type_of(style_anchor).orientation();

        let mut edge = Edge::new(ids.edge_id(), source.clone(), target.clone(), data);
        edge.route_for_side(side, orientation);
        let edge_id = edge.id.clone();
        self.edges.push(edge);
        Ok(edge_id)
    }

    pub fn selected_node_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|node| node.selected)
            .map(|node| node.id.clone())
            .collect()
    }

    pub fn select_all(&mut self) {
        self.nodes.iter_mut().for_each(|node| node.selected = true);
        self.edges.iter_mut().for_each(|edge| edge.selected = true);
    }

    pub fn deselect_all(&mut self) {
        self.nodes.iter_mut().for_each(|node| node.selected = false);
        self.edges.iter_mut().for_each(|edge| edge.selected = false);
    }

    /// Selects exactly the given nodes and deselects everything else.
    pub fn select_only(&mut self, node_ids: &HashSet<NodeId>) {
        for node in &mut self.nodes {
            node.selected = node_ids.contains(&node.id);
        }
        for edge in &mut self.edges {
            edge.selected = false;
        }
    }
}

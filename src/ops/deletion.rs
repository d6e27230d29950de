// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::model::NodeId;
use crate::store::Graph;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeletionOutcome {
    pub removed: usize,
    /// Roots of the trees that lost nodes and still exist afterwards.
    pub surviving_roots: Vec<NodeId>,
}

/// Pending ids of the two-phase delete.
///
/// `mark` flags nodes and edges `isDeleting` so the renderer can play an exit animation;
/// `finalize` removes them.
#[derive(Debug, Clone, Default)]
pub struct DeletionQueue {
    pending: HashSet<NodeId>,
}

impl DeletionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &HashSet<NodeId> {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Marks `{id} ∪ descendants(id)` for every given id. Unknown ids are skipped.
    ///
    /// Returns the number of newly marked nodes.
    pub fn mark(&mut self, graph: &mut Graph, node_ids: &[NodeId]) -> usize {
        let doomed = collect_subtrees(graph, node_ids);
        let before = self.pending.len();
        self.pending.extend(doomed.iter().cloned());

        for node in graph.nodes_mut() {
            if doomed.contains(&node.id) {
                node.data.is_deleting = true;
            }
        }
        for edge in graph.edges_mut() {
            if doomed.contains(&edge.source) || doomed.contains(&edge.target) {
                edge.data.is_deleting = true;
            }
        }
        let marked = self.pending.len() - before;
        debug!(marked, pending = self.pending.len(), "marked nodes for deletion");
        marked
    }

    pub fn mark_selected(&mut self, graph: &mut Graph) -> usize {
        let selected = graph.selected_node_ids();
        self.mark(graph, &selected)
    }

    /// Clears the `is_deleting` flags of pending nodes and their edges, keeping them pending.
    pub fn clear_flags(&self, graph: &mut Graph) {
        for node in graph.nodes_mut() {
            if self.pending.contains(&node.id) {
                node.data.is_deleting = false;
            }
        }
        for edge in graph.edges_mut() {
            if self.pending.contains(&edge.source) || self.pending.contains(&edge.target) {
                edge.data.is_deleting = false;
            }
        }
    }

    /// Abandons the pending deletion and unflags everything it marked.
    pub fn cancel(&mut self, graph: &mut Graph) -> usize {
        self.clear_flags(graph);
        std::mem::take(&mut self.pending).len()
    }

    /// Removes every pending node and its edges, then clears the pending set.
    pub fn finalize(&mut self, graph: &mut Graph) -> DeletionOutcome {
        if self.pending.is_empty() {
            return DeletionOutcome::default();
        }
        let pending = std::mem::take(&mut self.pending);
        remove_with_roots(graph, pending)
    }
}

/// Removes the given nodes and their descendants in one step, without the marking phase.
pub fn delete_nodes_instant(graph: &mut Graph, node_ids: &[NodeId]) -> DeletionOutcome {
    let doomed = collect_subtrees(graph, node_ids);
    remove_with_roots(graph, doomed)
}

fn collect_subtrees(graph: &Graph, node_ids: &[NodeId]) -> HashSet<NodeId> {
    let mut doomed = HashSet::new();
    for node_id in node_ids {
        if graph.contains_node(node_id) {
            doomed.extend(graph.subtree_ids(node_id));
        }
    }
    doomed
}

fn remove_with_roots(graph: &mut Graph, doomed: HashSet<NodeId>) -> DeletionOutcome {
    let roots: BTreeSet<NodeId> = doomed
        .iter()
        .filter_map(|id| graph.root_of(id).map(|root| root.id.clone()))
        .collect();
    let removed = graph.remove_nodes(&doomed);
    let surviving_roots = roots
        .into_iter()
        .filter(|root_id| graph.contains_node(root_id))
        .collect();
    debug!(removed, "removed nodes");
    DeletionOutcome {
        removed,
        surviving_roots,
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Folding of the legacy `collapsedChildren` removal cache into flag-based collapse.

use tracing::debug;

use super::Graph;

impl Graph {
    /// Re-inflates every `collapsedChildren` cache into the live lists.
    ///
    /// Cached nodes come back flagged `isCollapsed` and owned by the node that cached them
    /// (unless an owner was already recorded); cached edges come back collapsed. The cache field
    /// is dropped afterwards. Nested caches are handled because re-inflated nodes are scanned too.
    ///
    /// Returns the number of nodes brought back.
    pub fn migrate_legacy_collapse(&mut self) -> usize {
        let mut restored = 0;
        loop {
            let Some(owner_node) = self
                .nodes_mut()
                .iter_mut()
                .find(|node| node.data.collapsed_children.is_some())
            else {
                break;
            };
            let owner = owner_node.id.clone();
            let Some(cache) = owner_node.data.collapsed_children.take() else {
                continue;
            };
            if cache.is_empty() {
                continue;
            }

            let mut owner_restored = 0usize;
            for mut node in cache.left_nodes.into_iter().chain(cache.right_nodes) {
                node.data.is_collapsed = true;
                if node.data.collapsed_by.is_none() {
                    node.data.collapsed_by = Some(owner.clone());
                }
                if self.add_node(node).is_ok() {
                    owner_restored += 1;
                }
            }
            for mut edge in cache.left_edges.into_iter().chain(cache.right_edges) {
                edge.data.is_collapsed = true;
                // Duplicates of live edges are dropped.
                let _ = self.add_edge(edge);
            }

            debug!(owner = %owner, restored = owner_restored, "migrated legacy collapse cache");
            restored += owner_restored;
        }
        restored
    }
}

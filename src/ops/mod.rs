// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural edits on a [`Graph`](crate::store::Graph).
//!
//! Functions here mutate the store directly and know nothing about history; the editor wraps
//! each call in a transaction. Validation failures leave the graph untouched.

mod deletion;
mod manipulation;
mod operations;
mod placement;

pub use deletion::{delete_nodes_instant, DeletionOutcome, DeletionQueue};
pub use manipulation::{
    move_to_child, toggle_collapse, update_subtree_edge_color, update_subtree_edge_path_type,
    MoveOutcome,
};
pub use operations::{
    add_child_node, add_node, update_node_data, AddedChild, ChildRequest, NewNodeRequest,
    IMAGE_DEFAULT_ALT, IMAGE_DEFAULT_SIZE, SHAPE_DEFAULT_KIND, SHAPE_DEFAULT_SIZE,
};
pub use placement::position_after_last_sibling;

use crate::model::NodeId;
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("node {node_id} does not exist")]
    MissingNode { node_id: NodeId },
    #[error("cannot move node {node_id} onto itself")]
    MoveOntoSelf { node_id: NodeId },
    #[error("cannot move node {moved} into its own descendant {into}")]
    MoveIntoDescendant { moved: NodeId, into: NodeId },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EditError {
    /// Whether the error is a rejected user action (as opposed to a stale reference).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MoveOntoSelf { .. } | Self::MoveIntoDescendant { .. }
        )
    }

    /// Short text for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::MoveOntoSelf { .. } => "A node cannot become its own child.".to_owned(),
            Self::MoveIntoDescendant { .. } => {
                "Cannot move a node into one of its own descendants.".to_owned()
            }
            other => other.to_string(),
        }
    }
}

pub(crate) fn missing(node_id: &NodeId) -> EditError {
    EditError::MissingNode {
        node_id: node_id.clone(),
    }
}

#[cfg(test)]
mod tests;

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The Graph Store: the single owned copy of the node and edge lists.
//!
//! Everything above this layer (manipulation, operations, layout, history) receives an explicit
//! `&mut Graph`; there is no ambient state.

mod graph;
mod legacy;

pub use graph::Graph;

use crate::model::{EdgeId, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("node {node_id} already exists")]
    DuplicateNode { node_id: NodeId },
    #[error("edge {edge_id} already exists")]
    DuplicateEdge { edge_id: EdgeId },
    #[error("an edge from {from} to {to} already exists")]
    DuplicateEdgePair { from: NodeId, to: NodeId },
    #[error("node {node_id} does not exist")]
    MissingNode { node_id: NodeId },
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: nodes, edges, anchor handles and the `{nodes, edges}` document.
//!
//! A document is a forest. Tree structure lives in `data.parentId`; edges only carry styling and
//! anchor routing.

pub mod document;
pub mod edge;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod geometry;
pub mod ids;
pub mod node;

pub use document::Document;
pub use edge::{
    handle_id, parse_handle, Edge, EdgeData, HandlePosition, HandleRef, HandleRole,
    DEFAULT_EDGE_COLOR, DEFAULT_EDGE_WIDTH,
};
pub use geometry::{Position, Rect, Size, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH};
pub use ids::{EdgeId, Id, IdError, IdGenerator, NodeId, SequentialIds, UuidIds};
pub use node::{
    CollapsedChildren, LayoutType, Node, NodeData, NodeDataPatch, NodeKind, Orientation,
    ParseLayoutTypeError, PathType, Side,
};

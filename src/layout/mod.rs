// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout algorithms for mind-map trees.
//!
//! Computing a layout is pure: a strategy turns a [`LayoutTree`] into a [`LayoutPlan`]. Moving
//! the nodes there is the [`Animator`]'s job.

pub mod animation;
pub mod engine;
pub mod options;
pub mod plan;
pub mod sibling_order;
pub mod sides;
pub mod strategy;
pub mod tree;

use crate::model::{LayoutType, NodeId};

pub use animation::{
    ease_cubic_in_out, Animator, FrameOutcome, NodeTween, Tween, DEFAULT_ANIMATION_DURATION,
};
pub use engine::{plan_single_root, plan_subtree};
pub use options::{
    LayoutOptions, ParseSpacingProfileError, Spacing, SpacingProfile, DEFAULT_HORIZONTAL_SPACING,
    DEFAULT_VERTICAL_SPACING,
};
pub use plan::{EdgeRoute, LayoutPlan, NodePlacement};
pub use sibling_order::{infer_sibling_order, order_siblings};
pub use sides::assign_sides;
pub use strategy::{BalancedStrategy, DirectionalStrategy, LayoutStrategy, StrategyRegistry};
pub use tree::{LayoutTree, TreeNode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout root not found: {node_id}")]
    MissingNode { node_id: NodeId },
    #[error("whole-document layout needs exactly one root, found {found}")]
    RootCount { found: usize },
    #[error("no layout strategy registered for {layout_type}")]
    NoStrategy { layout_type: LayoutType },
    #[error("node {node_id} is not on the side required by {layout_type}")]
    SideMismatch {
        node_id: NodeId,
        layout_type: LayoutType,
    },
    #[error("strategy returned {found} positions for {expected} nodes")]
    PositionCount { expected: usize, found: usize },
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::model::{LayoutType, Orientation, Position, Side, Size};

use super::options::{LayoutOptions, Spacing};
use super::sibling_order::infer_sibling_order;
use super::sides::assign_sides;
use super::tree::LayoutTree;
use super::LayoutError;

/// A pluggable position computation for one [`LayoutType`].
pub trait LayoutStrategy: Send + Sync {
    fn layout_type(&self) -> LayoutType;

    /// Normalizes the tree before positions are computed.
    fn prepare(&self, tree: &mut LayoutTree) {
        infer_sibling_order(tree, self.layout_type());
        assign_sides(tree, self.layout_type());
    }

    /// Returns one position per tree index. The layout root keeps its current position.
    fn compute(&self, tree: &LayoutTree, options: &LayoutOptions)
        -> Result<Vec<Position>, LayoutError>;
}

/// Two-sided tree: left children grow against the flow, right children with it.
#[derive(Debug, Clone, Copy)]
pub struct BalancedStrategy {
    orientation: Orientation,
}

impl BalancedStrategy {
    pub fn horizontal() -> Self {
        Self {
            orientation: Orientation::Horizontal,
        }
    }

    pub fn vertical() -> Self {
        Self {
            orientation: Orientation::Vertical,
        }
    }
}

impl LayoutStrategy for BalancedStrategy {
    fn layout_type(&self) -> LayoutType {
        match self.orientation {
            Orientation::Horizontal => LayoutType::HorizontalBalanced,
            Orientation::Vertical => LayoutType::VerticalBalanced,
        }
    }

    fn compute(
        &self,
        tree: &LayoutTree,
        options: &LayoutOptions,
    ) -> Result<Vec<Position>, LayoutError> {
        Ok(place_tree(tree, Axes::new(self.orientation, options.spacing)))
    }
}

/// One-sided tree for `left-only`, `right-only`, `top-only` and `bottom-only`.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalStrategy {
    layout_type: LayoutType,
}

impl DirectionalStrategy {
    pub fn new(layout_type: LayoutType) -> Option<Self> {
        layout_type
            .forced_side()
            .map(|_| Self { layout_type })
    }
}

impl LayoutStrategy for DirectionalStrategy {
    fn layout_type(&self) -> LayoutType {
        self.layout_type
    }

    fn compute(
        &self,
        tree: &LayoutTree,
        options: &LayoutOptions,
    ) -> Result<Vec<Position>, LayoutError> {
        let forced = self.layout_type.forced_side();
        if let Some((_, stray)) = tree
            .iter()
            .skip(1)
            .find(|(_, node)| Some(node.side) != forced)
        {
            return Err(LayoutError::SideMismatch {
                node_id: stray.id.clone(),
                layout_type: self.layout_type,
            });
        }
        Ok(place_tree(
            tree,
            Axes::new(self.layout_type.orientation(), options.spacing),
        ))
    }
}

/// Maps flow-relative coordinates (`depth` away from the parent, `cross` between siblings)
/// onto x/y.
#[derive(Debug, Clone, Copy)]
struct Axes {
    orientation: Orientation,
    depth_gap: f64,
    sibling_gap: f64,
}

impl Axes {
    fn new(orientation: Orientation, spacing: Spacing) -> Self {
        let (depth_gap, sibling_gap) = match orientation {
            Orientation::Horizontal => (spacing.horizontal, spacing.vertical),
            Orientation::Vertical => (spacing.vertical, spacing.horizontal),
        };
        Self {
            orientation,
            depth_gap,
            sibling_gap,
        }
    }

    fn depth_len(&self, size: Size) -> f64 {
        match self.orientation {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    fn cross_len(&self, size: Size) -> f64 {
        match self.orientation {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }

    fn depth(&self, pos: Position) -> f64 {
        match self.orientation {
            Orientation::Horizontal => pos.x,
            Orientation::Vertical => pos.y,
        }
    }

    fn cross(&self, pos: Position) -> f64 {
        match self.orientation {
            Orientation::Horizontal => pos.y,
            Orientation::Vertical => pos.x,
        }
    }

    fn compose(&self, depth: f64, cross: f64) -> Position {
        match self.orientation {
            Orientation::Horizontal => Position::new(depth, cross),
            Orientation::Vertical => Position::new(cross, depth),
        }
    }
}

/// Band each subtree occupies along the cross axis.
fn subtree_extents(tree: &LayoutTree, axes: Axes) -> Vec<f64> {
    let mut extents = vec![0.0; tree.len()];
    // Children always have larger indices than their parent.
    for idx in (0..tree.len()).rev() {
        let children = tree.children(idx);
        let own = axes.cross_len(tree.node(idx).size);
        let stacked = block_len(children, &extents, axes.sibling_gap);
        extents[idx] = own.max(stacked);
    }
    extents
}

fn block_len(children: &[usize], extents: &[f64], gap: f64) -> f64 {
    if children.is_empty() {
        return 0.0;
    }
    let bands: f64 = children.iter().map(|&child| extents[child]).sum();
    bands + gap * (children.len() - 1) as f64
}

/// Places every node relative to its parent, keeping the layout root where it is.
///
/// Each side's children form one block centred on the parent along the cross axis; every child
/// is centred in its own band.
fn place_tree(tree: &LayoutTree, axes: Axes) -> Vec<Position> {
    let extents = subtree_extents(tree, axes);
    let mut positions = vec![tree.root().position; tree.len()];

    for parent_idx in 0..tree.len() {
        let parent = tree.node(parent_idx);
        let parent_pos = positions[parent_idx];
        let parent_center = axes.cross(parent_pos) + axes.cross_len(parent.size) / 2.0;

        let (before, after): (Vec<usize>, Vec<usize>) = tree
            .children(parent_idx)
            .iter()
            .partition(|&&child| tree.node(child).side == Side::Left);

        for (group, side) in [(before, Side::Left), (after, Side::Right)] {
            let mut cursor = parent_center - block_len(&group, &extents, axes.sibling_gap) / 2.0;
            for child_idx in group {
                let child = tree.node(child_idx);
                let band = extents[child_idx];
                let cross = cursor + (band - axes.cross_len(child.size)) / 2.0;
                let depth = match side {
                    Side::Left => {
                        axes.depth(parent_pos) - axes.depth_len(child.size) - axes.depth_gap
                    }
                    Side::Right | Side::Mid => {
                        axes.depth(parent_pos) + axes.depth_len(parent.size) + axes.depth_gap
                    }
                };
                positions[child_idx] = axes.compose(depth, cross);
                cursor += band + axes.sibling_gap;
            }
        }
    }
    positions
}

/// Strategies by layout type.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: HashMap<LayoutType, Arc<dyn LayoutStrategy>>,
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.strategies.keys().map(|t| t.as_str()).collect();
        types.sort_unstable();
        f.debug_struct("StrategyRegistry")
            .field("layout_types", &types)
            .finish()
    }
}

impl StrategyRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with a built-in strategy for every [`LayoutType`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(BalancedStrategy::horizontal()));
        registry.register(Arc::new(BalancedStrategy::vertical()));
        for layout_type in LayoutType::ALL {
            if let Some(strategy) = DirectionalStrategy::new(layout_type) {
                registry.register(Arc::new(strategy));
            }
        }
        registry
    }

    /// Registers `strategy`, replacing any previous one for the same layout type.
    pub fn register(&mut self, strategy: Arc<dyn LayoutStrategy>) {
        self.strategies.insert(strategy.layout_type(), strategy);
    }

    pub fn get(&self, layout_type: LayoutType) -> Result<Arc<dyn LayoutStrategy>, LayoutError> {
        self.strategies
            .get(&layout_type)
            .cloned()
            .ok_or(LayoutError::NoStrategy { layout_type })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::StrategyRegistry;
    use crate::layout::tree::LayoutTree;
    use crate::layout::{LayoutError, LayoutOptions};
    use crate::model::fixtures::{balanced_tree, chain, nid};
    use crate::model::{LayoutType, Position};
    use crate::store::Graph;

    fn run(graph: &Graph, root: &str, layout_type: LayoutType) -> (LayoutTree, Vec<Position>) {
        let registry = StrategyRegistry::with_defaults();
        let strategy = registry.get(layout_type).expect("strategy");
        let mut tree = LayoutTree::build(graph, &nid(root)).expect("tree");
        strategy.prepare(&mut tree);
        let positions = strategy
            .compute(&tree, &LayoutOptions::default())
            .expect("positions");
        (tree, positions)
    }

    fn position_of(tree: &LayoutTree, positions: &[Position], id: &str) -> Position {
        let (idx, _) = tree
            .iter()
            .find(|(_, node)| node.id == nid(id))
            .expect("node in tree");
        positions[idx]
    }

    #[rstest]
    #[case(LayoutType::RightOnly, 380.0, 0.0)]
    #[case(LayoutType::LeftOnly, -380.0, 0.0)]
    #[case(LayoutType::BottomOnly, 0.0, 130.0)]
    #[case(LayoutType::TopOnly, 0.0, -130.0)]
    fn directional_chain_steps_by_size_plus_gap(
        #[case] layout_type: LayoutType,
        #[case] dx: f64,
        #[case] dy: f64,
    ) {
        let graph = Graph::from_document(chain()).expect("graph");
        let (tree, positions) = run(&graph, "a", layout_type);
        let a = position_of(&tree, &positions, "a");
        let b = position_of(&tree, &positions, "b");
        let c = position_of(&tree, &positions, "c");
        assert_eq!(a, graph.node(&nid("a")).expect("a").position);
        assert_eq!(b, a.offset(dx, dy));
        assert_eq!(c, b.offset(dx, dy));
    }

    #[test]
    fn balanced_layout_splits_children_around_the_root() {
        let graph = Graph::from_document(balanced_tree()).expect("graph");
        let (tree, positions) = run(&graph, "root", LayoutType::HorizontalBalanced);
        let root = position_of(&tree, &positions, "root");
        let l1 = position_of(&tree, &positions, "l1");
        let l2 = position_of(&tree, &positions, "l2");
        let r1 = position_of(&tree, &positions, "r1");
        let r2 = position_of(&tree, &positions, "r2");

        assert_eq!(l1.x, root.x - 180.0 - 200.0);
        assert_eq!(r1.x, root.x + 180.0 + 200.0);
        assert!(l1.y < l2.y);
        assert!(r1.y < r2.y);
        // Siblings never overlap along the cross axis.
        assert!(l2.y - l1.y >= 50.0 + 80.0);
        // Each side's block is centred on the root.
        let left_mid = (l1.y + l2.y + 50.0) / 2.0;
        assert!((left_mid - (root.y + 25.0)).abs() < 1e-9);
    }

    #[test]
    fn registry_reports_missing_strategies() {
        let mut registry = StrategyRegistry::empty();
        assert!(matches!(
            registry.get(LayoutType::TopOnly),
            Err(LayoutError::NoStrategy {
                layout_type: LayoutType::TopOnly
            })
        ));
        registry.register(Arc::new(super::BalancedStrategy::vertical()));
        assert!(registry.get(LayoutType::VerticalBalanced).is_ok());
        assert!(super::DirectionalStrategy::new(LayoutType::HorizontalBalanced).is_none());
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Re-deriving sibling order from what the user currently sees.
//!
//! Run before every layout so that dragging a node above its sibling survives a relayout.

use std::cmp::Ordering;

use crate::model::{LayoutType, Position};

use super::tree::LayoutTree;

/// Orders sibling positions for `layout_type`, relative to their parent's position.
///
/// - left/right-only: top to bottom
/// - top/bottom-only: left to right
/// - horizontal-balanced: nodes left of the parent first, each group top to bottom
/// - vertical-balanced: nodes above the parent first, each group left to right
pub fn order_siblings(
    siblings: &[(usize, Position)],
    parent: Position,
    layout_type: LayoutType,
) -> Vec<usize> {
    let mut keyed: Vec<(u8, f64, usize)> = siblings
        .iter()
        .map(|&(idx, pos)| {
            let (group, key) = match layout_type {
                LayoutType::LeftOnly | LayoutType::RightOnly => (0, pos.y),
                LayoutType::TopOnly | LayoutType::BottomOnly => (0, pos.x),
                LayoutType::HorizontalBalanced => (u8::from(pos.x >= parent.x), pos.y),
                LayoutType::VerticalBalanced => (u8::from(pos.y >= parent.y), pos.x),
            };
            (group, key, idx)
        })
        .collect();
    keyed.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then(a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
    });
    keyed.into_iter().map(|(_, _, idx)| idx).collect()
}

/// Rewrites `sibling_order` for every child list and re-sorts the tree accordingly.
pub fn infer_sibling_order(tree: &mut LayoutTree, layout_type: LayoutType) {
    for parent_idx in 0..tree.len() {
        let children = tree.children(parent_idx).to_vec();
        if children.is_empty() {
            continue;
        }
        let parent_pos = tree.node(parent_idx).position;
        let siblings: Vec<(usize, Position)> = children
            .iter()
            .map(|&child| (child, tree.node(child).position))
            .collect();
        for (order, child) in order_siblings(&siblings, parent_pos, layout_type)
            .into_iter()
            .enumerate()
        {
            tree.node_mut(child).sibling_order = u32::try_from(order).ok();
        }
    }
    tree.sort_children_by_order();
}

#[cfg(test)]
mod tests {
    use super::order_siblings;
    use crate::model::{LayoutType, Position};

    fn at(x: f64, y: f64) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn directional_layouts_sort_along_the_cross_axis() {
        let siblings = [(1, at(300.0, 90.0)), (2, at(310.0, -40.0)), (3, at(290.0, 10.0))];
        assert_eq!(
            order_siblings(&siblings, at(0.0, 0.0), LayoutType::RightOnly),
            vec![2, 3, 1]
        );
        let siblings = [(1, at(90.0, 300.0)), (2, at(-40.0, 300.0))];
        assert_eq!(
            order_siblings(&siblings, at(0.0, 0.0), LayoutType::BottomOnly),
            vec![2, 1]
        );
    }

    #[test]
    fn balanced_layout_lists_left_group_first() {
        let siblings = [
            (1, at(300.0, -50.0)),
            (2, at(-300.0, 60.0)),
            (3, at(-300.0, -60.0)),
            (4, at(300.0, 50.0)),
        ];
        assert_eq!(
            order_siblings(&siblings, at(0.0, 0.0), LayoutType::HorizontalBalanced),
            vec![3, 2, 1, 4]
        );
        let siblings = [(1, at(50.0, 200.0)), (2, at(-50.0, -200.0)), (3, at(-80.0, 200.0))];
        assert_eq!(
            order_siblings(&siblings, at(0.0, 0.0), LayoutType::VerticalBalanced),
            vec![2, 3, 1]
        );
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{LayoutType, Side};

use super::tree::LayoutTree;

/// Normalizes every node's side for `layout_type`.
///
/// One-sided layouts force all non-centre nodes onto their side. Balanced layouts keep the
/// left/right choice of each root child, move `mid` children to the lighter side, and make every
/// deeper node inherit its root child's side. A centred root is always `mid`.
pub fn assign_sides(tree: &mut LayoutTree, layout_type: LayoutType) {
    let centered = tree.is_centered();

    if let Some(forced) = layout_type.forced_side() {
        for idx in 0..tree.len() {
            let side = if idx == LayoutTree::ROOT && centered {
                Side::Mid
            } else {
                forced
            };
            tree.node_mut(idx).side = side;
        }
        return;
    }

    if !centered {
        // Subtree layout under a non-root node: the whole branch follows its head.
        let side = match tree.root().side {
            Side::Mid => Side::Right,
            side => side,
        };
        for idx in tree.subtree(LayoutTree::ROOT) {
            tree.node_mut(idx).side = side;
        }
        return;
    }

    tree.node_mut(LayoutTree::ROOT).side = Side::Mid;
    let root_children = tree.children(LayoutTree::ROOT).to_vec();
    let mut left = root_children
        .iter()
        .filter(|&&idx| tree.node(idx).side == Side::Left)
        .count();
    let mut right = root_children
        .iter()
        .filter(|&&idx| tree.node(idx).side == Side::Right)
        .count();

    for child in root_children {
        let side = match tree.node(child).side {
            Side::Mid => {
                if left < right {
                    left += 1;
                    Side::Left
                } else {
                    right += 1;
                    Side::Right
                }
            }
            side => side,
        };
        for idx in tree.subtree(child) {
            tree.node_mut(idx).side = side;
        }
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::layout::Spacing;
use crate::model::{
    LayoutType, Node, Orientation, Position, Side, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH,
};

/// Where a freshly added child of `parent` should appear before any relayout.
///
/// Horizontal flows stack below the lowest sibling; right children align their left edges with
/// the leftmost sibling, left children align their right edges one spacing left of the parent.
/// Vertical flows continue to the right of the rightmost sibling, one spacing above (left/top)
/// or below (right/bottom) the parent.
pub fn position_after_last_sibling(
    parent: &Node,
    siblings: &[&Node],
    side: Side,
    layout_type: LayoutType,
    spacing: Spacing,
) -> Position {
    let vertical = layout_type.orientation() == Orientation::Vertical;
    let parent_pos = parent.position;

    if siblings.is_empty() {
        return first_child_position(parent, side, vertical, spacing);
    }

    if vertical {
        let right_edge = siblings
            .iter()
            .map(|sibling| sibling.position.x + sibling.width())
            .fold(f64::NEG_INFINITY, f64::max);
        return Position::new(
            right_edge + spacing.vertical,
            parent_pos.y + vertical_offset(parent, side, spacing),
        );
    }

    let bottom_edge = siblings
        .iter()
        .map(|sibling| sibling.position.y + sibling.height())
        .fold(f64::NEG_INFINITY, f64::max);
    let x = match side {
        Side::Left => parent_pos.x - spacing.horizontal - DEFAULT_NODE_WIDTH,
        Side::Right | Side::Mid => siblings
            .iter()
            .map(|sibling| sibling.position.x)
            .fold(f64::INFINITY, f64::min),
    };
    Position::new(x, bottom_edge + spacing.vertical)
}

fn first_child_position(parent: &Node, side: Side, vertical: bool, spacing: Spacing) -> Position {
    let parent_pos = parent.position;
    if vertical {
        return Position::new(parent_pos.x, parent_pos.y + vertical_offset(parent, side, spacing));
    }
    let dx = match side {
        Side::Left => -spacing.horizontal - DEFAULT_NODE_WIDTH,
        Side::Right | Side::Mid => spacing.horizontal + parent.width(),
    };
    Position::new(parent_pos.x + dx, parent_pos.y)
}

fn vertical_offset(parent: &Node, side: Side, spacing: Spacing) -> f64 {
    match side {
        Side::Left => -spacing.vertical - DEFAULT_NODE_HEIGHT,
        Side::Right | Side::Mid => spacing.vertical + parent.height(),
    }
}

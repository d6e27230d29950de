// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::document::Document;
use super::edge::{Edge, EdgeData};
use super::geometry::Position;
use super::ids::{EdgeId, NodeId};
use super::node::{Node, NodeData, NodeKind, Orientation, Side};

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

pub(crate) fn root(id: &str, x: f64, y: f64) -> Node {
    let data = NodeData {
        content: id.to_uppercase(),
        ..NodeData::default()
    };
    Node::new(nid(id), NodeKind::Root, Position::new(x, y), data)
}

pub(crate) fn child(id: &str, parent: &Node, side: Side, x: f64, y: f64) -> Node {
    let data = NodeData {
        level: parent.data.level + 1,
        parent_id: Some(parent.id.clone()),
        side,
        content: id.to_uppercase(),
        ..NodeData::default()
    };
    Node::new(nid(id), NodeKind::Text, Position::new(x, y), data)
}

pub(crate) fn link(parent: &Node, child: &Node) -> Edge {
    let mut edge = Edge::new(
        eid(&format!("e-{}-{}", parent.id, child.id)),
        parent.id.clone(),
        child.id.clone(),
        EdgeData::default(),
    );
    edge.route_for_side(child.data.side, Orientation::Horizontal);
    edge
}

/// One root with two children per side and a grandchild under `l1` and `r1`.
///
/// ```text
///   l1a - l1 \        / r1 - r1a
///              root
///         l2 /        \ r2
/// ```
pub(crate) fn balanced_tree() -> Document {
    let root = root("root", 0.0, 0.0);
    let l1 = child("l1", &root, Side::Left, -380.0, -65.0);
    let l2 = child("l2", &root, Side::Left, -380.0, 65.0);
    let r1 = child("r1", &root, Side::Right, 380.0, -65.0);
    let r2 = child("r2", &root, Side::Right, 380.0, 65.0);
    let l1a = child("l1a", &l1, Side::Left, -760.0, -65.0);
    let r1a = child("r1a", &r1, Side::Right, 760.0, -65.0);

    let edges = vec![
        link(&root, &l1),
        link(&root, &l2),
        link(&root, &r1),
        link(&root, &r2),
        link(&l1, &l1a),
        link(&r1, &r1a),
    ];
    Document::new(vec![root, l1, l2, r1, r2, l1a, r1a], edges)
}

/// A chain `a -> b -> c -> d`, all on the right side.
pub(crate) fn chain() -> Document {
    let a = root("a", 0.0, 0.0);
    let b = child("b", &a, Side::Right, 380.0, 0.0);
    let c = child("c", &b, Side::Right, 760.0, 0.0);
    let d = child("d", &c, Side::Right, 1140.0, 0.0);
    let edges = vec![link(&a, &b), link(&b, &c), link(&c, &d)];
    Document::new(vec![a, b, c, d], edges)
}

/// Two independent single-child trees.
pub(crate) fn two_roots() -> Document {
    let a = root("a", 0.0, 0.0);
    let a1 = child("a1", &a, Side::Right, 300.0, 0.0);
    let b = root("b", 0.0, 600.0);
    let b1 = child("b1", &b, Side::Left, -300.0, 600.0);
    let edges = vec![link(&a, &a1), link(&b, &b1)];
    Document::new(vec![a, a1, b, b1], edges)
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic mind-map fixtures (no RNG). Every node starts at the origin so a layout pass
// has real work to do.

use mindgraph::model::{
    Document, Edge, EdgeData, EdgeId, Node, NodeData, NodeId, NodeKind, Orientation, Position,
    Side,
};

pub struct MapSize {
    pub name: &'static str,
    pub depth: u32,
    pub fanout: usize,
}

pub const SIZES: &[MapSize] = &[
    MapSize {
        name: "small",
        depth: 2,
        fanout: 4,
    },
    MapSize {
        name: "medium",
        depth: 3,
        fanout: 6,
    },
    MapSize {
        name: "large",
        depth: 4,
        fanout: 7,
    },
];

fn node_id(raw: String) -> NodeId {
    NodeId::new(raw).expect("node id")
}

fn edge_id(raw: String) -> EdgeId {
    EdgeId::new(raw).expect("edge id")
}

/// One root whose children alternate sides, `fanout` children per node down to `depth`.
pub fn balanced_map(depth: u32, fanout: usize) -> Document {
    let root_data = NodeData {
        content: "root".to_owned(),
        side: Side::Mid,
        ..NodeData::default()
    };
    let root = Node::new(
        node_id("n0".to_owned()),
        NodeKind::Root,
        Position::ORIGIN,
        root_data,
    );
    let mut nodes = vec![root];
    let mut edges = Vec::new();
    let mut frontier = vec![0usize];

    for level in 1..=depth {
        let mut next = Vec::new();
        for parent_idx in frontier {
            for child in 0..fanout {
                let parent = &nodes[parent_idx];
                let side = match parent.data.side {
                    Side::Mid if child % 2 == 0 => Side::Left,
                    Side::Mid => Side::Right,
                    inherited => inherited,
                };
                let id = node_id(format!("n{}", nodes.len()));
                let data = NodeData {
                    level,
                    parent_id: Some(parent.id.clone()),
                    side,
                    content: format!("node {}", nodes.len()),
                    ..NodeData::default()
                };
                let mut edge = Edge::new(
                    edge_id(format!("e{}", edges.len())),
                    parent.id.clone(),
                    id.clone(),
                    EdgeData::default(),
                );
                edge.route_for_side(side, Orientation::Horizontal);
                edges.push(edge);
                next.push(nodes.len());
                nodes.push(Node::new(id, NodeKind::Text, Position::ORIGIN, data));
            }
        }
        frontier = next;
    }
    Document::new(nodes, edges)
}

/// A generated-tree clipboard payload with the same shape as [`balanced_map`].
pub fn ai_tree_json(depth: u32, fanout: usize) -> String {
    fn item(depth: u32, fanout: usize, label: &str) -> serde_json::Value {
        let children: Vec<serde_json::Value> = if depth == 0 {
            Vec::new()
        } else {
            (0..fanout)
                .map(|idx| item(depth - 1, fanout, &format!("{label}.{idx}")))
                .collect()
        };
        serde_json::json!({ "data": label, "children": children })
    }
    serde_json::Value::Array(vec![item(depth, fanout, "idea")]).to_string()
}

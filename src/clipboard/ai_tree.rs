// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The externally generated tree format: `[{ "data": "...", "children": [...] }, ...]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{
    Document, Edge, EdgeData, IdGenerator, LayoutType, Node, NodeData, NodeId, NodeKind,
    PathType, Position, Side, DEFAULT_EDGE_COLOR,
};

/// One item of a generated tree. `content` is accepted as an alias of `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AiTreeItem {
    #[serde(alias = "content")]
    pub data: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AiTreeItem>,
}

impl AiTreeItem {
    pub fn leaf(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(data: impl Into<String>, children: Vec<AiTreeItem>) -> Self {
        Self {
            data: data.into(),
            children,
        }
    }

    /// Number of items in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(AiTreeItem::count).sum::<usize>()
    }
}

fn is_valid_item(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    let has_text = object.get("data").is_some_and(Value::is_string)
        || object.get("content").is_some_and(Value::is_string);
    if !has_text {
        return false;
    }
    match object.get("children") {
        None => true,
        Some(Value::Array(children)) => children.iter().all(is_valid_item),
        Some(_) => false,
    }
}

/// Structural check on already-parsed JSON. A single object counts as a one-item array; an
/// empty top level does not.
pub fn is_ai_tree(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty() && items.iter().all(is_valid_item),
        Value::Object(_) => is_valid_item(value),
        _ => false,
    }
}

/// Parses generated-tree JSON, or `None` if `value` is not in that shape.
///
/// When an item carries both `content` and `data`, `content` wins.
pub fn parse_ai_tree(value: &Value) -> Option<Vec<AiTreeItem>> {
    if !is_ai_tree(value) {
        return None;
    }
    match value {
        Value::Array(items) => items.iter().map(item_from_value).collect(),
        _ => item_from_value(value).map(|item| vec![item]),
    }
}

fn item_from_value(value: &Value) -> Option<AiTreeItem> {
    let object = value.as_object()?;
    let data = object
        .get("content")
        .and_then(Value::as_str)
        .or_else(|| object.get("data").and_then(Value::as_str))?;
    let children = match object.get("children") {
        Some(Value::Array(children)) => children
            .iter()
            .map(item_from_value)
            .collect::<Option<Vec<_>>>()?,
        _ => Vec::new(),
    };
    Some(AiTreeItem::with_children(data, children))
}

/// A converted tree, ready to be inserted into a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedTree {
    pub document: Document,
    pub roots: Vec<NodeId>,
}

/// Turns generated items into nodes and edges.
///
/// Top-level items become root nodes at `anchor` with auto-layout enabled. A root's children
/// take the layout's forced side, or alternate left/right by index in balanced layouts; deeper
/// items inherit their parent's side. Non-root nodes start at the anchor and are expected to be
/// laid out afterwards.
pub fn convert_ai_tree(
    items: &[AiTreeItem],
    anchor: Position,
    layout_type: LayoutType,
    ids: &mut dyn IdGenerator,
) -> ConvertedTree {
    let mut converter = Converter {
        anchor,
        layout_type,
        ids,
        nodes: Vec::new(),
        edges: Vec::new(),
    };
    let roots = items
        .iter()
        .map(|item| converter.visit(item, None, Side::Mid, 0))
        .collect();
    ConvertedTree {
        document: Document::new(converter.nodes, converter.edges),
        roots,
    }
}

struct Converter<'a> {
    anchor: Position,
    layout_type: LayoutType,
    ids: &'a mut dyn IdGenerator,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Converter<'_> {
    fn visit(
        &mut self,
        item: &AiTreeItem,
        parent: Option<&NodeId>,
        side: Side,
        level: u32,
    ) -> NodeId {
        let node_id = self.ids.node_id();
        let is_root = parent.is_none();
        let mut data = NodeData {
            level,
            parent_id: parent.cloned(),
            side: if is_root { Side::Mid } else { side },
            content: item.data.clone(),
            path_type: Some(PathType::default()),
            ..NodeData::default()
        };
        if is_root {
            data.edge_color = Some(DEFAULT_EDGE_COLOR.to_owned());
            data.layout_type = Some(self.layout_type);
            data.is_auto_layout_enabled = Some(true);
        }
        let kind = if is_root { NodeKind::Root } else { NodeKind::Text };
        self.nodes
            .push(Node::new(node_id.clone(), kind, self.anchor, data));

        if let Some(parent_id) = parent {
            let mut edge = Edge::new(
                self.ids.edge_id(),
                parent_id.clone(),
                node_id.clone(),
                EdgeData::default(),
            );
            edge.route_for_side(side, self.layout_type.orientation());
            self.edges.push(edge);
        }

        for (index, child) in item.children.iter().enumerate() {
            let child_side = if is_root {
                self.root_child_side(index)
            } else {
                side
            };
            self.visit(child, Some(&node_id), child_side, level + 1);
        }
        node_id
    }

    fn root_child_side(&self, index: usize) -> Side {
        self.layout_type.forced_side().unwrap_or(if index % 2 == 0 {
            Side::Left
        } else {
            Side::Right
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{convert_ai_tree, is_ai_tree, parse_ai_tree, AiTreeItem};
    use crate::model::{LayoutType, NodeKind, Position, SequentialIds, Side};

    #[rstest]
    #[case(json!([{"data": "A", "children": [{"data": "B"}]}]), true)]
    #[case(json!([{"content": "A", "children": []}]), true)]
    #[case(json!({"content": "single"}), true)]
    #[case(json!([]), false)]
    #[case(json!([{"data": 3}]), false)]
    #[case(json!([{"data": "A", "children": {"data": "B"}}]), false)]
    #[case(json!({"nodes": [], "edges": []}), false)]
    #[case(json!("plain"), false)]
    fn recognizes_generated_trees(#[case] value: serde_json::Value, #[case] expected: bool) {
        assert_eq!(is_ai_tree(&value), expected);
    }

    #[test]
    fn single_object_becomes_one_item() {
        let items = parse_ai_tree(&json!({"content": "Topic", "children": [{"data": "Sub"}]}))
            .expect("tree");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].data, "Topic");
        assert_eq!(items[0].count(), 2);
    }

    #[test]
    fn root_children_alternate_and_descendants_inherit() {
        let items = vec![AiTreeItem::with_children(
            "Root",
            vec![
                AiTreeItem::with_children("first", vec![AiTreeItem::leaf("first.1")]),
                AiTreeItem::with_children("second", vec![AiTreeItem::leaf("second.1")]),
            ],
        )];
        let mut ids = SequentialIds::new("ai");
        let converted = convert_ai_tree(
            &items,
            Position::new(10.0, 20.0),
            LayoutType::HorizontalBalanced,
            &mut ids,
        );
        let doc = &converted.document;
        assert_eq!(doc.nodes.len(), 5);
        assert_eq!(doc.edges.len(), 4);
        assert_eq!(converted.roots.len(), 1);

        let by_content = |content: &str| {
            doc.nodes
                .iter()
                .find(|node| node.data.content == content)
                .expect("node")
        };
        let root = by_content("Root");
        assert_eq!(root.kind, NodeKind::Root);
        assert_eq!(root.position, Position::new(10.0, 20.0));
        assert_eq!(root.data.is_auto_layout_enabled, Some(true));
        assert_eq!(by_content("first").data.side, Side::Left);
        assert_eq!(by_content("first.1").data.side, Side::Left);
        assert_eq!(by_content("second").data.side, Side::Right);
        assert_eq!(by_content("second.1").data.side, Side::Right);
        assert_eq!(by_content("second.1").data.level, 2);
        assert_eq!(by_content("second.1").kind, NodeKind::Text);
    }

    #[test]
    fn directional_layout_forces_the_side() {
        let items = vec![AiTreeItem::with_children(
            "Root",
            vec![AiTreeItem::leaf("a"), AiTreeItem::leaf("b")],
        )];
        let mut ids = SequentialIds::new("ai");
        let converted = convert_ai_tree(&items, Position::ORIGIN, LayoutType::TopOnly, &mut ids);
        assert!(converted
            .document
            .nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Text)
            .all(|node| node.data.side == Side::Left));
        let edge = converted.document.edges.first().expect("edge");
        assert!(edge
            .source_handle
            .as_deref()
            .is_some_and(|handle| handle.starts_with("top-source-")));
    }
}

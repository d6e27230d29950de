// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use mindgraph::clipboard::ExportOptions;
use mindgraph::model::{Document, NodeId, Position, SequentialIds, Side};
use mindgraph::ops::{ChildRequest, EditError};
use mindgraph::{Editor, EditorConfig};

fn id(raw: &str) -> NodeId {
    NodeId::new(raw).expect("node id")
}

fn editor_from_json(raw: &str) -> Editor {
    let document: Document = serde_json::from_str(raw).expect("document json");
    let mut editor =
        Editor::with_ids(EditorConfig::default(), Box::new(SequentialIds::new("it")));
    editor.load(document).expect("load");
    editor
}

fn single_root() -> Editor {
    editor_from_json(
        r#"{"nodes": [{"id": "r", "type": "root", "position": {"x": 0, "y": 0},
            "data": {"content": "R", "side": "mid"}}], "edges": []}"#,
    )
}

fn settle(editor: &mut Editor, start: Instant) {
    let mut frame = 0u32;
    while !editor.is_idle() && frame < 500 {
        editor.tick(start + Duration::from_millis(16) * frame);
        frame += 1;
    }
    assert!(editor.is_idle(), "editor did not settle");
}

#[test]
fn children_on_both_sides_of_a_single_root() {
    let mut editor = single_root();
    editor
        .add_child_node(ChildRequest::text(id("r"), Side::Left))
        .expect("left child");
    editor
        .add_child_node(ChildRequest::text(id("r"), Side::Right))
        .expect("right child");

    let graph = editor.graph();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.has_left_children(&id("r")));
    assert!(graph.has_right_children(&id("r")));
}

#[test]
fn collapse_then_expand_restores_left_side_exactly() {
    let mut editor = single_root();
    for side in [Side::Left, Side::Left, Side::Right] {
        editor
            .add_child_node(ChildRequest::text(id("r"), side))
            .expect("child");
    }
    let before = editor.document();

    editor
        .toggle_collapse(&id("r"), Side::Left, true)
        .expect("collapse");
    for node in editor.graph().nodes().iter().filter(|node| !node.is_root()) {
        let hidden = node.data.side == Side::Left;
        assert_eq!(node.data.is_collapsed, hidden);
        assert_eq!(node.data.collapsed_by.is_some(), hidden);
    }

    editor
        .toggle_collapse(&id("r"), Side::Left, false)
        .expect("expand");
    assert_eq!(editor.document(), before);
}

#[test]
fn pasting_a_generated_tree_lands_at_the_pointer() {
    let mut editor = single_root();
    let pointer = Position::new(640.0, 320.0);
    editor.set_pointer(pointer);

    let pasted = editor
        .paste_text(r#"[{"data": "A", "children": [{"data": "B"}]}]"#)
        .expect("paste");

    assert_eq!(pasted.nodes.len(), 2);
    assert_eq!(pasted.edges.len(), 1);
    let a = editor.graph().node(&pasted.nodes[0]).expect("A");
    assert_eq!(a.data.content, "A");
    assert_eq!(a.position, pointer);
    let b = editor.graph().node(&pasted.nodes[1]).expect("B");
    assert_eq!(b.data.content, "B");
    assert_eq!(b.data.parent_id.as_ref(), Some(&a.id));
}

#[test]
fn auto_layout_works_inside_a_forest() {
    let mut editor = editor_from_json(
        r#"{"nodes": [
            {"id": "a", "type": "root", "position": {"x": 0, "y": 0},
             "data": {"content": "A", "side": "mid", "isAutoLayoutEnabled": true}},
            {"id": "a1", "type": "text", "position": {"x": 999, "y": 999},
             "data": {"level": 1, "parentId": "a", "side": "right", "content": "A1"}},
            {"id": "b", "type": "root", "position": {"x": 0, "y": 600},
             "data": {"content": "B", "side": "mid"}},
            {"id": "b1", "type": "text", "position": {"x": -10, "y": 610},
             "data": {"level": 1, "parentId": "b", "side": "left", "content": "B1"}}
        ], "edges": [
            {"id": "ea", "source": "a", "target": "a1"},
            {"id": "eb", "source": "b", "target": "b1"}
        ]}"#,
    );

    let added = editor
        .add_child_node(ChildRequest::text(id("a"), Side::Right))
        .expect("child")
        .expect("added");
    assert_eq!(added.auto_layout_root, Some(id("a")));
    settle(&mut editor, Instant::now());

    let graph = editor.graph();
    let a1 = graph.node(&id("a1")).expect("a1").position;
    let fresh = graph.node(&added.node_id).expect("new child").position;
    assert_eq!(a1.x, 380.0);
    assert_eq!(fresh.x, 380.0);
    assert_eq!((fresh.y - a1.y).abs(), 130.0);
    assert_eq!(
        graph.node(&id("b1")).expect("b1").position,
        Position::new(-10.0, 610.0)
    );

    // The whole-document layout still refuses a forest.
    assert_eq!(editor.update_layout(None), Ok(false));
}

#[test]
fn undo_and_redo_walk_exact_snapshots() {
    let mut editor = single_root();
    let mut snapshots = vec![editor.document()];

    let left = editor
        .add_child_node(ChildRequest::text(id("r"), Side::Left))
        .expect("left")
        .expect("added");
    snapshots.push(editor.document());
    let right = editor
        .add_child_node(ChildRequest::text(id("r"), Side::Right))
        .expect("right")
        .expect("added");
    snapshots.push(editor.document());
    editor
        .move_to_child(&right.node_id, &left.node_id, None)
        .expect("move");
    snapshots.push(editor.document());
    editor.delete_nodes_instant(&[left.node_id.clone()]);
    snapshots.push(editor.document());

    for expected in snapshots.iter().rev().skip(1) {
        assert!(editor.undo());
        assert_eq!(&editor.document(), expected);
    }
    assert!(!editor.undo());
    for expected in snapshots.iter().skip(1) {
        assert!(editor.redo());
        assert_eq!(&editor.document(), expected);
    }
    assert!(!editor.redo());

    editor.undo();
    editor
        .add_child_node(ChildRequest::text(id("r"), Side::Right))
        .expect("fresh edit");
    assert!(!editor.history().can_redo());
}

#[test]
fn no_sequence_of_moves_creates_a_cycle() {
    let mut editor = single_root();
    let mut ids = vec![id("r")];
    for idx in 0..6 {
        let parent = ids[idx / 2].clone();
        let side = if idx % 2 == 0 { Side::Left } else { Side::Right };
        let added = editor
            .add_child_node(ChildRequest::text(parent, side))
            .expect("child")
            .expect("added");
        ids.push(added.node_id);
    }

    for (step, source) in ids.iter().enumerate().skip(1) {
        for target in ids.iter().skip(step % 3) {
            let before = editor.document();
            match editor.move_to_child(source, target, Some(Side::Right)) {
                Ok(_) => {}
                Err(EditError::MoveOntoSelf { .. } | EditError::MoveIntoDescendant { .. }) => {
                    assert_eq!(editor.document(), before);
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
            for node in editor.graph().nodes() {
                assert!(
                    editor.graph().root_of(&node.id).is_some(),
                    "{} lost its root",
                    node.id
                );
                assert!(!editor.graph().is_descendant(&node.id, &node.id));
            }
        }
    }
    assert!(!editor.take_notices().is_empty());
}

#[test]
fn import_accepts_a_minimal_document_and_regenerates_ids() {
    let mut editor = single_root();
    let nodes = editor
        .import_json(
            r#"{"nodes": [{"id": "x", "type": "root", "selected": true,
                "data": {"content": "X"}}]}"#,
        )
        .expect("import");

    assert_eq!(nodes, 1);
    let node = &editor.graph().nodes()[0];
    assert_ne!(node.id, id("x"));
    assert_eq!(node.position, Position::ORIGIN);
    assert!(!node.selected);

    let exported = editor
        .export_json(&ExportOptions::default())
        .expect("export");
    let value: serde_json::Value = serde_json::from_str(&exported).expect("json");
    assert_eq!(value["metadata"]["version"], "1.0.0");
    assert!(editor.import_json(r#"{"nodes": 3}"#).is_err());
    assert!(editor.import_json("{}").is_err());
}

#[test]
fn legacy_map_imports_like_it_loads() {
    let legacy = r#"{"nodes": [{"id": "r", "type": "root", "data": {"content": "R",
        "collapsedChildren": {
            "rightNodes": [{"id": "h", "type": "text", "position": {"x": 380, "y": 0},
                "data": {"content": "H", "parentId": "r", "side": "right", "level": 1}}],
            "rightEdges": [{"id": "e-r-h", "source": "r", "target": "h"}]}}}],
        "edges": []}"#;

    let loaded = editor_from_json(legacy);
    let mut imported = single_root();
    let nodes = imported.import_json(legacy).expect("import");

    assert_eq!(loaded.graph().node_count(), 2);
    assert_eq!(nodes, loaded.graph().node_count());
    assert_eq!(imported.graph().edge_count(), loaded.graph().edge_count());
    assert!(imported
        .graph()
        .nodes()
        .iter()
        .filter(|node| !node.is_root())
        .all(|node| node.data.is_collapsed));
}

#[test]
fn import_refuses_repeated_ids() {
    let mut editor = single_root();
    let result = editor.import_json(
        r#"{"nodes": [{"id": "a", "type": "root", "data": {}},
                      {"id": "a", "type": "root", "data": {}}]}"#,
    );

    assert!(result.is_err());
    assert_eq!(editor.graph().node_count(), 1);
    assert!(editor.graph().node(&id("r")).is_some());
}

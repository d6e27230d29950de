// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::{fixture, rstest};

use crate::layout::Spacing;
use crate::model::fixtures::{balanced_tree, chain, nid, root};
use crate::model::{
    Document, LayoutType, NodeDataPatch, NodeKind, PathType, Position, Rect, SequentialIds,
    Side,
};
use crate::store::Graph;

use super::{
    add_child_node, add_node, delete_nodes_instant, move_to_child, toggle_collapse,
    update_node_data, update_subtree_edge_color, update_subtree_edge_path_type, ChildRequest,
    DeletionQueue, EditError, NewNodeRequest,
};

#[fixture]
fn tree() -> Graph {
    Graph::from_document(balanced_tree()).expect("graph")
}

#[fixture]
fn ids() -> SequentialIds {
    SequentialIds::new("new")
}

#[rstest]
fn adding_left_and_right_children_to_a_single_root(mut ids: SequentialIds) {
    let mut graph =
        Graph::from_document(Document::new(vec![root("r", 0.0, 0.0)], Vec::new())).expect("graph");

    add_child_node(
        &mut graph,
        &mut ids,
        ChildRequest::text(nid("r"), Side::Left),
        Spacing::default(),
    )
    .expect("left child");
    add_child_node(
        &mut graph,
        &mut ids,
        ChildRequest::text(nid("r"), Side::Right),
        Spacing::default(),
    )
    .expect("right child");

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.has_left_children(&nid("r")));
    assert!(graph.has_right_children(&nid("r")));
}

#[rstest]
fn child_edge_uses_side_handles_and_root_style(mut tree: Graph, mut ids: SequentialIds) {
    tree.node_mut(&nid("root")).expect("root").data.edge_color = Some("#123456".to_owned());
    let added = add_child_node(
        &mut tree,
        &mut ids,
        ChildRequest::text(nid("l1"), Side::Left),
        Spacing::default(),
    )
    .expect("child");

    let edge = tree.edge(&added.edge_id).expect("edge");
    assert_eq!(edge.source_handle.as_deref(), Some("left-source-l1"));
    assert_eq!(
        edge.target_handle,
        Some(format!("right-target-{}", added.node_id))
    );
    assert_eq!(edge.data.stroke_color, "#123456");

    let node = tree.node(&added.node_id).expect("node");
    assert_eq!(node.data.level, 2);
    assert_eq!(node.data.content, "New node 2");
    assert!(added.auto_layout_root.is_none());
}

#[rstest]
#[case(NodeKind::Shape, Some(120.0), Some(60.0), None)]
#[case(NodeKind::Image, Some(250.0), Some(180.0), Some("Image"))]
#[case(NodeKind::Text, None, None, None)]
fn child_variants_get_default_dimensions(
    mut tree: Graph,
    mut ids: SequentialIds,
    #[case] kind: NodeKind,
    #[case] width: Option<f64>,
    #[case] height: Option<f64>,
    #[case] alt: Option<&str>,
) {
    let added = add_child_node(
        &mut tree,
        &mut ids,
        ChildRequest::text(nid("root"), Side::Right).with_kind(kind),
        Spacing::default(),
    )
    .expect("child");
    let node = tree.node(&added.node_id).expect("node");
    assert_eq!(node.kind, kind);
    assert_eq!(node.data.width, width);
    assert_eq!(node.data.height, height);
    assert_eq!(node.data.alt.as_deref(), alt);
}

#[rstest]
fn add_child_reports_auto_layout_root(mut tree: Graph, mut ids: SequentialIds) {
    tree.node_mut(&nid("root"))
        .expect("root")
        .data
        .is_auto_layout_enabled = Some(true);
    let added = add_child_node(
        &mut tree,
        &mut ids,
        ChildRequest::text(nid("r1a"), Side::Right).at(Position::new(5.0, 5.0)),
        Spacing::default(),
    )
    .expect("child");
    assert_eq!(added.auto_layout_root, Some(nid("root")));
    assert_eq!(
        tree.node(&added.node_id).expect("node").position,
        Position::new(5.0, 5.0)
    );
}

#[rstest]
fn add_node_places_root_inside_window(mut ids: SequentialIds) {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(7);
    let window = Rect::new(100.0, 100.0, 500.0, 400.0);

    let node_id = add_node(
        &mut graph,
        &mut ids,
        &mut rng,
        window,
        NewNodeRequest::default(),
    )
    .expect("add");

    let node = graph.node(&node_id).expect("node");
    assert!(node.is_root());
    assert!(window.contains(node.position));
    assert_eq!(node.data.content, "New Node 1");
    assert_eq!(node.data.level, 0);
    assert!(node.data.parent_id.is_none());
}

#[rstest]
fn collapse_hides_only_the_requested_side(mut tree: Graph) {
    let before = tree.to_document();
    let changed = toggle_collapse(&mut tree, &nid("root"), Side::Left, true).expect("collapse");
    assert_eq!(changed, 3);

    for id in ["l1", "l2", "l1a"] {
        let node = tree.node(&nid(id)).expect("node");
        assert!(node.data.is_collapsed, "{id} collapsed");
        assert_eq!(node.data.collapsed_by, Some(nid("root")));
    }
    for id in ["r1", "r2", "r1a"] {
        assert!(!tree.node(&nid(id)).expect("node").data.is_collapsed);
    }
    let collapsed_edges = tree.edges().iter().filter(|e| e.data.is_collapsed).count();
    assert_eq!(collapsed_edges, 3);

    toggle_collapse(&mut tree, &nid("root"), Side::Left, false).expect("expand");
    assert_eq!(tree.to_document(), before);
}

#[rstest]
fn expand_by_another_node_keeps_original_owner(mut tree: Graph) {
    toggle_collapse(&mut tree, &nid("l1"), Side::Left, true).expect("collapse l1");
    toggle_collapse(&mut tree, &nid("root"), Side::Left, true).expect("collapse root");

    let l1a = tree.node(&nid("l1a")).expect("l1a");
    assert_eq!(l1a.data.collapsed_by, Some(nid("l1")));

    toggle_collapse(&mut tree, &nid("root"), Side::Left, false).expect("expand root");
    assert!(tree.node(&nid("l1a")).expect("l1a").data.is_collapsed);
    assert!(!tree.node(&nid("l1")).expect("l1").data.is_collapsed);

    toggle_collapse(&mut tree, &nid("l1"), Side::Left, false).expect("expand l1");
    assert!(!tree.node(&nid("l1a")).expect("l1a").data.is_collapsed);
}

#[rstest]
fn collapse_of_missing_node_is_an_error(mut tree: Graph) {
    let err = toggle_collapse(&mut tree, &nid("ghost"), Side::Left, true).expect_err("missing");
    assert!(matches!(err, EditError::MissingNode { .. }));
    assert!(!err.is_validation());
}

#[rstest]
fn move_into_descendant_is_rejected_without_mutation(mut ids: SequentialIds) {
    let mut graph = Graph::from_document(chain()).expect("graph");
    let before = graph.to_document();

    let err = move_to_child(&mut graph, &nid("b"), &nid("d"), None, &mut ids).expect_err("cycle");
    assert!(err.is_validation());
    let err = move_to_child(&mut graph, &nid("c"), &nid("c"), None, &mut ids).expect_err("self");
    assert!(matches!(err, EditError::MoveOntoSelf { .. }));

    assert_eq!(graph.to_document(), before);
}

#[rstest]
fn move_redirects_edge_and_shifts_subtree(mut tree: Graph, mut ids: SequentialIds) {
    let outcome =
        move_to_child(&mut tree, &nid("l1"), &nid("r2"), None, &mut ids).expect("move");
    assert_eq!(outcome.side, Side::Right);
    assert_eq!(outcome.level_delta, 1);
    assert_eq!(outcome.moved, 2);

    let l1 = tree.node(&nid("l1")).expect("l1");
    assert_eq!(l1.data.parent_id, Some(nid("r2")));
    assert_eq!(l1.data.level, 2);
    assert_eq!(l1.data.side, Side::Right);
    let l1a = tree.node(&nid("l1a")).expect("l1a");
    assert_eq!(l1a.data.level, 3);
    assert_eq!(l1a.data.side, Side::Right);

    let incoming: Vec<_> = tree.edges().iter().filter(|e| e.target == nid("l1")).collect();
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0].source, nid("r2"));
    assert_eq!(incoming[0].source_handle.as_deref(), Some("right-source-r2"));
    assert_eq!(incoming[0].target_handle.as_deref(), Some("left-target-l1"));

    let deep = tree.edge_between(&nid("l1"), &nid("l1a")).expect("deep edge");
    assert_eq!(deep.source_handle.as_deref(), Some("right-source-l1"));
    assert_eq!(tree.edge_count(), 6);
}

#[rstest]
fn moving_a_root_turns_it_into_a_child_and_synthesizes_an_edge(mut ids: SequentialIds) {
    let mut dest = root("dest", 0.0, 0.0);
    dest.data.path_type = Some(PathType::Step);
    let mut loose = root("loose", 500.0, 500.0);
    loose.data.layout_type = Some(LayoutType::RightOnly);
    loose.data.is_auto_layout_enabled = Some(true);
    loose.data.path_type = Some(PathType::default());
    loose.data.edge_color = Some("#ff0000".into());
    let mut graph =
        Graph::from_document(Document::new(vec![dest, loose], Vec::new())).expect("graph");

    move_to_child(&mut graph, &nid("loose"), &nid("dest"), Some(Side::Right), &mut ids)
        .expect("move");

    let moved = graph.node(&nid("loose")).expect("loose");
    assert_eq!(moved.kind, NodeKind::Text);
    assert_eq!(moved.data.level, 1);
    assert_eq!(moved.data.side, Side::Right);
    assert_eq!(moved.data.layout_type, None);
    assert_eq!(moved.data.is_auto_layout_enabled, None);
    assert_eq!(moved.data.path_type, None);
    assert_eq!(moved.data.edge_color, None);
    let edge = graph.edge_between(&nid("dest"), &nid("loose")).expect("edge");
    assert_eq!(edge.data.path_type, PathType::Step);
}

#[rstest]
fn repeated_moves_never_create_a_cycle(mut tree: Graph, mut ids: SequentialIds) {
    let names = ["root", "l1", "l2", "r1", "r2", "l1a", "r1a"];
    for (i, source) in names.iter().enumerate() {
        for target in names.iter().skip(i % 3) {
            let _ = move_to_child(&mut tree, &nid(source), &nid(target), None, &mut ids);
        }
    }
    for node in tree.nodes() {
        assert!(
            !tree.is_descendant(&node.id, &node.id),
            "{} is its own ancestor",
            node.id
        );
        let mut seen = HashSet::new();
        let mut cur = node.data.parent_id.clone();
        while let Some(parent) = cur {
            assert!(seen.insert(parent.clone()), "cycle through {parent}");
            cur = tree.node(&parent).and_then(|n| n.data.parent_id.clone());
        }
    }
}

#[rstest]
fn subtree_style_updates_only_touch_internal_edges(mut tree: Graph) {
    let updated =
        update_subtree_edge_path_type(&mut tree, &nid("l1"), PathType::Bezier).expect("path");
    assert_eq!(updated, 1);
    let root_to_l1 = tree.edge_between(&nid("root"), &nid("l1")).expect("edge");
    assert_eq!(root_to_l1.data.path_type, PathType::Smoothstep);
    assert!(tree.node(&nid("l1")).expect("l1").data.path_type.is_none());

    let updated = update_subtree_edge_color(&mut tree, &nid("root"), "#00FF00").expect("color");
    assert_eq!(updated, 6);
    assert_eq!(
        tree.node(&nid("root")).expect("root").data.edge_color.as_deref(),
        Some("#00FF00")
    );
}

#[rstest]
fn update_node_data_merges_shallowly(mut tree: Graph) {
    update_node_data(&mut tree, &nid("r1"), &NodeDataPatch::content("hello")).expect("update");
    let r1 = tree.node(&nid("r1")).expect("r1");
    assert_eq!(r1.data.content, "hello");
    assert_eq!(r1.data.side, Side::Right);

    assert!(update_node_data(&mut tree, &nid("ghost"), &NodeDataPatch::default()).is_err());
}

#[rstest]
fn two_phase_delete_removes_exactly_the_subtree(mut tree: Graph) {
    let mut queue = DeletionQueue::new();
    assert_eq!(queue.mark(&mut tree, &[nid("l1")]), 2);

    assert_eq!(tree.node_count(), 7);
    assert!(tree.node(&nid("l1a")).expect("l1a").data.is_deleting);
    assert!(!tree.node(&nid("l2")).expect("l2").data.is_deleting);
    let flagged_edges = tree.edges().iter().filter(|e| e.data.is_deleting).count();
    assert_eq!(flagged_edges, 2);

    let outcome = queue.finalize(&mut tree);
    assert_eq!(outcome.removed, 2);
    assert_eq!(outcome.surviving_roots, vec![nid("root")]);
    assert!(queue.is_empty());

    let remaining: HashSet<String> = tree.nodes().iter().map(|n| n.id.to_string()).collect();
    let expected: HashSet<String> = ["root", "l2", "r1", "r2", "r1a"]
        .into_iter()
        .map(str::to_owned)
        .collect();
    assert_eq!(remaining, expected);
    assert!(tree
        .edges()
        .iter()
        .all(|e| e.source != nid("l1") && e.target != nid("l1") && e.target != nid("l1a")));
    assert_eq!(tree.edge_count(), 4);

    assert_eq!(queue.finalize(&mut tree).removed, 0);
}

#[rstest]
fn marking_the_selection_covers_descendants(mut tree: Graph) {
    tree.node_mut(&nid("r1")).expect("r1").selected = true;
    tree.node_mut(&nid("l2")).expect("l2").selected = true;
    let mut queue = DeletionQueue::new();
    assert_eq!(queue.mark_selected(&mut tree), 3);
    assert_eq!(queue.pending().len(), 3);
}

#[rstest]
fn deleting_a_root_reports_no_surviving_root(mut tree: Graph) {
    let outcome = delete_nodes_instant(&mut tree, &[nid("root"), nid("ghost")]);
    assert_eq!(outcome.removed, 7);
    assert!(outcome.surviving_roots.is_empty());
    assert!(tree.is_empty());
    assert_eq!(tree.edge_count(), 0);
}

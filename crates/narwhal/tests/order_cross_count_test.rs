use narwhal::order::{
    CrossingCounts, count_crossings, count_top_crossings, count_visible_crossings,
    visible_bottom_edges,
};
use narwhal::{EdgeSpec, HierarchyGraph, NodeKind, NodeSpec};

fn node(id: &str, kind: NodeKind, parent: Option<&str>) -> NodeSpec {
    NodeSpec {
        id: id.to_string(),
        kind,
        parent: parent.map(str::to_string),
    }
}

fn edge(source: &str, target: &str) -> EdgeSpec {
    EdgeSpec {
        source: source.to_string(),
        target: target.to_string(),
    }
}

fn layout(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn edges(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(u, v)| (u.to_string(), v.to_string()))
        .collect()
}

#[test]
fn returns_0_without_edges_or_layout() {
    assert_eq!(count_crossings(&[], &edges(&[("a", "b")])), 0);
    assert_eq!(count_crossings(&layout(&["a", "b"]), &[]), 0);
}

#[test]
fn interleaved_spans_cross() {
    let l = layout(&["a", "b", "c", "d"]);
    assert_eq!(count_crossings(&l, &edges(&[("a", "c"), ("b", "d")])), 1);
}

#[test]
fn nested_spans_do_not_cross() {
    let l = layout(&["a", "b", "d", "c"]);
    assert_eq!(count_crossings(&l, &edges(&[("a", "c"), ("b", "d")])), 0);
}

#[test]
fn disjoint_spans_do_not_cross() {
    let l = layout(&["a", "b", "c", "d"]);
    assert_eq!(count_crossings(&l, &edges(&[("a", "b"), ("c", "d")])), 0);
}

#[test]
fn shared_endpoints_never_cross() {
    let l = layout(&["a", "b", "c", "d"]);
    assert_eq!(count_crossings(&l, &edges(&[("a", "c"), ("a", "d")])), 0);
    assert_eq!(count_crossings(&l, &edges(&[("a", "b"), ("b", "d")])), 0);
}

#[test]
fn edges_with_missing_endpoints_are_ignored() {
    let l = layout(&["a", "b", "c", "d"]);
    let e = edges(&[("a", "c"), ("b", "ghost"), ("b", "d")]);
    assert_eq!(count_crossings(&l, &e), 1);
}

#[test]
fn counting_is_symmetric_in_edge_and_endpoint_order() {
    let l = layout(&["a", "b", "c", "d", "e", "f"]);
    let forward = edges(&[("a", "d"), ("b", "e"), ("c", "f")]);
    let shuffled = edges(&[("f", "c"), ("a", "d"), ("e", "b")]);
    assert_eq!(count_crossings(&l, &forward), 3);
    assert_eq!(count_crossings(&l, &forward), count_crossings(&l, &shuffled));
}

#[test]
fn visible_mode_skips_intra_cluster_edges() {
    let g = HierarchyGraph::new(
        vec![
            node("root", NodeKind::Node, None),
            node("c1", NodeKind::Cluster, Some("root")),
            node("c2", NodeKind::Cluster, Some("root")),
            node("a", NodeKind::Leaf, Some("c1")),
            node("b", NodeKind::Leaf, Some("c1")),
            node("c", NodeKind::Leaf, Some("c2")),
            node("d", NodeKind::Leaf, Some("c2")),
        ],
        vec![edge("a", "c"), edge("b", "d"), edge("a", "b")],
    )
    .expect("valid graph");

    let l = layout(&["root", "c1", "a", "b", "c2", "c", "d"]);
    let visible = visible_bottom_edges(&g);
    assert_eq!(visible.len(), 2);
    assert!(!visible.contains(&("a".to_string(), "b".to_string())));

    let counts = CrossingCounts::of(&g, &l);
    assert_eq!(counts, CrossingCounts { visible: 1, all: 1 });
    assert_eq!(count_visible_crossings(&g, &l), 1);
}

#[test]
fn top_edges_cross_only_when_contiguity_is_broken() {
    let g = HierarchyGraph::new(
        vec![
            node("root", NodeKind::Node, None),
            node("c1", NodeKind::Cluster, Some("root")),
            node("c2", NodeKind::Cluster, Some("root")),
            node("a", NodeKind::Leaf, Some("c1")),
            node("b", NodeKind::Leaf, Some("c1")),
            node("c", NodeKind::Leaf, Some("c2")),
            node("d", NodeKind::Leaf, Some("c2")),
        ],
        Vec::new(),
    )
    .expect("valid graph");

    let contiguous = layout(&["root", "c1", "a", "b", "c2", "c", "d"]);
    assert_eq!(count_top_crossings(&g, &contiguous), 0);

    // b was torn out of c1's block.
    let broken = layout(&["root", "c1", "a", "c2", "b", "c", "d"]);
    assert!(count_top_crossings(&g, &broken) > 0);
}

#[test]
fn counts_compare_visible_first_then_all() {
    let a = CrossingCounts { visible: 0, all: 5 };
    let b = CrossingCounts { visible: 1, all: 0 };
    let c = CrossingCounts { visible: 1, all: 2 };
    assert!(a < b);
    assert!(b < c);
    assert!(!a.is_zero());
    assert!(CrossingCounts { visible: 0, all: 0 }.is_zero());
}

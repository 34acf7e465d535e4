use strata::graph::{Graph, NodeId};
use strata::{LayoutConfig, LayoutError, Size, layout};

fn build(n: usize, edges: &[(usize, usize)]) -> (Graph<Size, ()>, Vec<NodeId>) {
    let mut g: Graph<Size, ()> = Graph::new();
    let nodes: Vec<NodeId> = (0..n)
        .map(|_| g.new_node(Size::new(20.0, 10.0)).unwrap())
        .collect();
    for &(v, w) in edges {
        g.new_edge(nodes[v], nodes[w], ()).unwrap();
    }
    (g, nodes)
}

#[test]
fn layout_chain_gets_one_band_per_rank() {
    let (mut g, n) = build(3, &[(0, 1), (1, 2)]);
    let out = layout(&mut g, &LayoutConfig::default()).unwrap();

    assert_eq!(out.max_rank, 2);
    let ys: Vec<f64> = n.iter().map(|&v| out.node(v).unwrap().y).collect();
    assert_eq!(ys, vec![5.0, 65.0, 125.0]);
    for &v in &n {
        let p = out.node(v).unwrap();
        assert_eq!(p.x, 10.0);
        assert_eq!((p.width, p.height), (20.0, 10.0));
        assert_eq!(p.order, 0);
    }
    assert_eq!(out.width, 20.0);
    assert_eq!(out.height, 130.0);
    assert_eq!(out.nodes().len(), 3);
    assert_eq!(out.edges().len(), 2);
    assert!(out.edges().iter().all(|r| r.points.is_empty() && !r.inverted));
}

#[test]
fn layout_routes_long_edges_through_their_controls() {
    let (mut g, n) = build(4, &[(0, 1), (1, 2), (2, 3), (0, 3)]);
    let long = g.edges_between(n[0], n[3])[0];
    let out = layout(&mut g, &LayoutConfig::default()).unwrap();

    let route = out.edge(long).unwrap();
    assert!(!route.inverted);
    let ys: Vec<f64> = route.points.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![65.0, 125.0]);
}

#[test]
fn layout_reverses_points_of_back_edges() {
    let (mut g, n) = build(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
    let back = g.edges_between(n[3], n[0])[0];
    let out = layout(&mut g, &LayoutConfig::default()).unwrap();

    let route = out.edge(back).unwrap();
    assert!(route.inverted);
    assert!(!route.self_loop);
    // From the edge's predecessor (rank 3) up to its successor (rank 0).
    let ys: Vec<f64> = route.points.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![125.0, 65.0]);
    assert_eq!(out.node(n[3]).unwrap().rank, 3);
}

#[test]
fn layout_reports_self_loops_without_points() {
    let (mut g, n) = build(1, &[(0, 0)]);
    let e = g.edges_between(n[0], n[0])[0];
    let out = layout(&mut g, &LayoutConfig::default()).unwrap();
    let route = out.edge(e).unwrap();
    assert!(route.self_loop);
    assert!(route.inverted);
    assert!(route.points.is_empty());
    assert_eq!(out.max_rank, 0);
}

#[test]
fn layout_of_empty_graph_is_empty() {
    let mut g: Graph<Size, ()> = Graph::new();
    let out = layout(&mut g, &LayoutConfig::default()).unwrap();
    assert!(out.nodes().is_empty());
    assert!(out.edges().is_empty());
    assert_eq!((out.width, out.height, out.max_rank), (0.0, 0.0, 0));
}

#[test]
fn layout_applies_config_parsed_from_json() {
    let config = LayoutConfig::from_json_str(
        r#"{ "simpleSpacing": 10, "rankSpacing": 5, "marginX": 3, "marginY": 4 }"#,
    )
    .unwrap();
    assert_eq!(config.mixed_spacing, 20.0);
    assert_eq!(config.sweeps, 1);

    let (mut g, n) = build(2, &[]);
    let out = layout(&mut g, &config).unwrap();
    assert_eq!(out.node(n[0]).unwrap().x, 13.0);
    assert_eq!(out.node(n[1]).unwrap().x, 43.0);
    assert_eq!(out.node(n[0]).unwrap().y, 9.0);
    assert_eq!(out.width, 56.0);
    assert_eq!(out.height, 18.0);
    let row: Vec<NodeId> = out.rank_nodes(0).iter().map(|p| p.node).collect();
    assert_eq!(row, n);
}

#[test]
fn layout_config_rejects_bad_values() {
    let err = LayoutConfig::from_json_str(r#"{ "rankSpacing": -1 }"#).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidConfig(_)));

    let err = LayoutConfig::from_json_value(&serde_json::json!({ "sweeps": 0 })).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidConfig(_)));

    let err = LayoutConfig::from_json_str(r#"{ "simpleSpacing": "wide" }"#).unwrap_err();
    assert!(matches!(err, LayoutError::ConfigParse { .. }));

    let (mut g, _) = build(1, &[]);
    let config = LayoutConfig {
        control_spacing: f64::NAN,
        ..Default::default()
    };
    assert!(matches!(
        layout(&mut g, &config),
        Err(LayoutError::InvalidConfig(_))
    ));
}

#[test]
fn layout_config_parse_errors_keep_their_position() {
    let text = "{\n  \"marginX\": 4,\n  \"sweeps\": true\n}";
    match LayoutConfig::from_json_str(text).unwrap_err() {
        LayoutError::ConfigParse {
            message,
            line,
            column,
        } => {
            assert_eq!(line, 3);
            assert!(column > 0);
            assert!(message.contains("line 3"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = LayoutConfig::from_json_value(&serde_json::json!({ "sweeps": "many" })).unwrap_err();
    assert!(matches!(
        err,
        LayoutError::ConfigParse {
            line: 0,
            column: 0,
            ..
        }
    ));
}

#[test]
fn layout_rejects_invalid_node_sizes() {
    let mut g: Graph<Size, ()> = Graph::new();
    let ok = g.new_node(Size::new(10.0, 10.0)).unwrap();
    let bad = g.new_node(Size::new(f64::INFINITY, 10.0)).unwrap();
    g.new_edge(ok, bad, ()).unwrap();
    let err = layout(&mut g, &LayoutConfig::default()).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidNodeSize { node, .. } if node == bad));
}

#[test]
fn layout_accepts_tuple_sizes() {
    let mut g: Graph<(f64, f64), &str> = Graph::new();
    let a = g.new_node((30.0, 12.0)).unwrap();
    let b = g.new_node((10.0, 8.0)).unwrap();
    g.new_edge(a, b, "a-b").unwrap();
    let out = layout(&mut g, &LayoutConfig::default()).unwrap();
    assert_eq!(out.node(a).unwrap().y, 6.0);
    assert_eq!(out.node(b).unwrap().y, 12.0 + 50.0 + 4.0);
}

#[test]
fn layout_leaves_graph_untouched_and_tags_free() {
    let (mut g, _) = build(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 4), (0, 5)]);
    let before: Vec<_> = g.edge_ids().map(|e| g.edge_endpoints(e).unwrap()).collect();
    for _ in 0..3 {
        layout(&mut g, &LayoutConfig::default()).unwrap();
    }
    let after: Vec<_> = g.edge_ids().map(|e| g.edge_endpoints(e).unwrap()).collect();
    assert_eq!(before, after);
    assert_eq!(g.node_count(), 6);
    assert_eq!(g.markers().used_indexes(), 0);
    assert_eq!(g.nums().used_indexes(), 0);
}

#[test]
fn layout_is_deterministic_and_serializes() {
    let edges = [(0, 1), (0, 2), (1, 3), (2, 3), (3, 0), (1, 4)];
    let (mut g, _) = build(5, &edges);
    let first = layout(&mut g, &LayoutConfig::default()).unwrap();
    let second = layout(&mut g, &LayoutConfig::default()).unwrap();
    assert_eq!(first.nodes(), second.nodes());
    assert_eq!(first.edges(), second.edges());

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["maxRank"], serde_json::json!(first.max_rank));
    assert_eq!(json["nodes"].as_array().unwrap().len(), 5);
    assert!(json["nodes"][0]["node"].is_string());
    assert!(json["edges"][0]["selfLoop"].is_boolean());
}

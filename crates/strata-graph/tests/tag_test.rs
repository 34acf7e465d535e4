use strata_graph::{
    Graph, GraphError, MarkerManager, NodeId, NumManager, TAG_CAPACITY, TagError, UNNUMBERED,
};

fn line(n: usize) -> (Graph<usize, ()>, Vec<NodeId>) {
    let mut g: Graph<usize, ()> = Graph::new();
    let nodes: Vec<NodeId> = (0..n).map(|i| g.new_node(i).unwrap()).collect();
    for w in nodes.windows(2) {
        g.new_edge(w[0], w[1], ()).unwrap();
    }
    (g, nodes)
}

#[test]
fn markers_are_independent_of_each_other() {
    let (mut g, nodes) = line(3);
    let m1 = g.new_marker().unwrap();
    let m2 = g.new_marker().unwrap();

    assert_eq!(g.mark_node(nodes[0], &m1), Ok(true));
    assert_eq!(g.mark_node(nodes[0], &m1), Ok(false));
    assert!(g.is_node_marked(nodes[0], &m1));
    assert!(!g.is_node_marked(nodes[0], &m2));

    g.mark_node(nodes[1], &m2).unwrap();
    assert!(!g.is_node_marked(nodes[1], &m1));
    assert!(g.is_node_marked(nodes[1], &m2));

    assert_eq!(g.unmark_node(nodes[0], &m1), Ok(true));
    assert_eq!(g.unmark_node(nodes[0], &m1), Ok(false));
    assert!(!g.is_node_marked(nodes[0], &m1));

    assert!(g.free_marker(m1));
    assert!(g.free_marker(m2));
    assert_eq!(g.markers().used_indexes(), 0);
}

#[test]
fn a_fresh_marker_never_sees_stale_marks() {
    let (mut g, nodes) = line(4);
    let old = g.new_marker().unwrap();
    for &n in &nodes {
        g.mark_node(n, &old).unwrap();
    }
    let first_edge = g.first_edge().unwrap();
    g.mark_edge(first_edge, &old).unwrap();
    let old_index = old.index();
    g.free_marker(old);

    let fresh = g.new_marker().unwrap();
    assert_eq!(fresh.index(), old_index);
    for &n in &nodes {
        assert!(!g.is_node_marked(n, &fresh));
    }
    assert!(!g.is_edge_marked(first_edge, &fresh));
    g.free_marker(fresh);
}

#[test]
fn eleventh_marker_fails_without_disturbing_live_markers() {
    let (mut g, nodes) = line(TAG_CAPACITY);
    let mut held = Vec::new();
    for (i, &n) in nodes.iter().enumerate() {
        let m = g.new_marker().unwrap();
        assert_eq!(m.index(), i);
        g.mark_node(n, &m).unwrap();
        held.push(m);
    }

    assert_eq!(
        g.new_marker(),
        Err(TagError::OutOfIndexes {
            capacity: TAG_CAPACITY
        })
    );

    for (i, m) in held.iter().enumerate() {
        for (j, &n) in nodes.iter().enumerate() {
            assert_eq!(g.is_node_marked(n, m), i == j);
        }
    }
    assert_eq!(g.markers().used_indexes(), TAG_CAPACITY);

    let last = held.pop().unwrap();
    g.free_marker(last);
    let again = g.new_marker().unwrap();
    assert_eq!(again.index(), TAG_CAPACITY - 1);
    g.free_marker(again);
    for m in held {
        g.free_marker(m);
    }
    assert_eq!(g.markers().used_indexes(), 0);
}

#[test]
fn marker_values_wrap_with_a_sweep() {
    let (mut g, nodes) = line(3);
    g.set_tag_value_limit(3);

    let keep = g.new_marker().unwrap();
    g.mark_node(nodes[0], &keep).unwrap();

    // Spend the remaining values, leaving stale marks behind on every node.
    for _ in 0..2 {
        let m = g.new_marker().unwrap();
        for &n in &nodes {
            g.mark_node(n, &m).unwrap();
        }
        g.free_marker(m);
    }

    // The counter is exhausted; this call sweeps and restarts.
    let fresh = g.new_marker().unwrap();
    for &n in &nodes {
        assert!(!g.is_node_marked(n, &fresh));
    }
    assert!(g.is_node_marked(nodes[0], &keep));
    assert!(!g.is_node_marked(nodes[1], &keep));

    g.mark_node(nodes[2], &fresh).unwrap();
    assert!(!g.is_node_marked(nodes[2], &keep));
    g.free_marker(fresh);
    g.free_marker(keep);
}

#[test]
fn manager_reports_out_of_values_until_restarted() {
    let mut mm = MarkerManager::with_value_limit(2);
    let a = mm.new_marker().unwrap();
    let b = mm.new_marker().unwrap();
    mm.free_marker(a);
    assert_eq!(mm.new_marker(), Err(TagError::OutOfValues));
    mm.restart_values();
    let c = mm.new_marker().unwrap();
    assert!(mm.is_live(&c));
    assert!(mm.is_live(&b));
    assert_eq!(mm.used_indexes(), 2);
}

#[test]
fn numerations_store_numbers_per_tag() {
    let (mut g, nodes) = line(3);
    let rank = g.new_num().unwrap();
    let order = g.new_num().unwrap();

    g.set_node_number(nodes[0], &rank, 0).unwrap();
    g.set_node_number(nodes[1], &rank, 1).unwrap();
    g.set_node_number(nodes[1], &order, 7).unwrap();

    assert_eq!(g.node_number(nodes[0], &rank), Some(0));
    assert_eq!(g.node_number(nodes[1], &rank), Some(1));
    assert_eq!(g.node_number(nodes[1], &order), Some(7));
    assert_eq!(g.node_number(nodes[0], &order), None);
    assert_eq!(g.node_number(nodes[2], &rank), None);

    assert_eq!(
        g.set_node_number(nodes[2], &rank, UNNUMBERED),
        Err(GraphError::Tag(TagError::NumberOutOfRange(UNNUMBERED)))
    );
    assert_eq!(g.unnumber_node(nodes[1], &rank), Ok(Some(1)));
    assert_eq!(g.node_number(nodes[1], &rank), None);

    let e = g.first_edge().unwrap();
    g.set_edge_number(e, &order, 3).unwrap();
    assert_eq!(g.edge_number(e, &order), Some(3));
    assert_eq!(g.edge_number(e, &rank), None);

    let rank_index = rank.index();
    g.free_num(rank);
    let next = g.new_num().unwrap();
    assert_eq!(next.index(), rank_index);
    assert_eq!(g.node_number(nodes[0], &next), None);
    g.free_num(next);
    g.free_num(order);
    assert_eq!(g.nums().used_indexes(), 0);
}

#[test]
fn numerations_have_the_same_capacity_and_sweep() {
    let mut nm = NumManager::new();
    let held: Vec<_> = (0..TAG_CAPACITY).map(|_| nm.new_num().unwrap()).collect();
    assert_eq!(
        nm.new_num(),
        Err(TagError::OutOfIndexes {
            capacity: TAG_CAPACITY
        })
    );
    for n in held {
        assert!(nm.free_num(n));
    }

    let (mut g, nodes) = line(2);
    g.set_tag_value_limit(2);
    let a = g.new_num().unwrap();
    g.set_node_number(nodes[0], &a, 5).unwrap();
    g.free_num(a);
    let b = g.new_num().unwrap();
    g.set_node_number(nodes[1], &b, 6).unwrap();
    g.free_num(b);

    let c = g.new_num().unwrap();
    assert_eq!(g.node_number(nodes[0], &c), None);
    assert_eq!(g.node_number(nodes[1], &c), None);
    g.free_num(c);
}

#[test]
fn markers_of_another_graph_are_rejected() {
    let (mut g, _) = line(2);
    let (mut h, h_nodes) = line(2);
    let x = h_nodes[0];

    let mine = h.new_marker().unwrap();
    h.mark_node(x, &mine).unwrap();
    let theirs = g.new_marker().unwrap();
    assert_eq!(theirs.index(), mine.index());

    assert_eq!(
        h.mark_node(x, &theirs),
        Err(GraphError::Tag(TagError::ForeignTag {
            owner: g.id(),
            graph: h.id()
        }))
    );
    assert!(matches!(
        h.unmark_node(x, &theirs),
        Err(GraphError::Tag(TagError::ForeignTag { .. }))
    ));
    assert!(!h.is_node_marked(x, &theirs));
    let e = h.first_edge().unwrap();
    assert!(h.mark_edge(e, &theirs).is_err());

    // Freeing a foreign marker must not release the slot held by `mine`.
    assert!(!h.free_marker(theirs));
    assert_eq!(h.markers().used_indexes(), 1);
    let next = h.new_marker().unwrap();
    assert_ne!(next.index(), mine.index());
    h.mark_node(x, &next).unwrap();
    assert!(h.is_node_marked(x, &mine));

    h.free_marker(next);
    h.free_marker(mine);
    assert_eq!(g.markers().used_indexes(), 1);
}

#[test]
fn numerations_of_another_graph_are_rejected() {
    let (mut g, _) = line(1);
    let (mut h, h_nodes) = line(1);
    let x = h_nodes[0];

    let mine = h.new_num().unwrap();
    h.set_node_number(x, &mine, 4).unwrap();
    let theirs = g.new_num().unwrap();

    assert!(matches!(
        h.set_node_number(x, &theirs, 9),
        Err(GraphError::Tag(TagError::ForeignTag { .. }))
    ));
    assert!(h.unnumber_node(x, &theirs).is_err());
    assert_eq!(h.node_number(x, &theirs), None);
    assert_eq!(h.node_number(x, &mine), Some(4));

    assert!(!h.free_num(theirs));
    assert_eq!(h.nums().used_indexes(), 1);
    h.free_num(mine);
}

#[test]
fn standalone_managers_do_not_accept_each_others_tags() {
    let mut a = MarkerManager::new();
    let mut b = MarkerManager::new();
    let from_a = a.new_marker().unwrap();
    let from_b = b.new_marker().unwrap();
    assert_ne!(a.owner(), b.owner());
    assert!(!b.is_live(&from_a));
    assert!(!b.free_marker(from_a));
    assert!(b.is_live(&from_b));
    assert_eq!(b.used_indexes(), 1);
    assert!(b.free_marker(from_b));
}

//! Helper algorithms built on the graph container.
//!
//! The traversals use a marker as their visited set, so they need `&mut Graph` but never walk
//! the graph to reset state. Every marker is freed before returning, also on error.

use crate::error::Result;
use crate::graph::{EdgeId, Graph, NodeId};
use crate::tag::Marker;
use rustc_hash::FxHashMap as HashMap;
use std::collections::VecDeque;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pre,
    Post,
}

pub fn preorder<N, E>(g: &mut Graph<N, E>, roots: &[NodeId]) -> Result<Vec<NodeId>> {
    let visited = g.new_marker()?;
    let out = dfs(g, roots, &visited, Visit::Pre);
    g.free_marker(visited);
    out
}

pub fn postorder<N, E>(g: &mut Graph<N, E>, roots: &[NodeId]) -> Result<Vec<NodeId>> {
    let visited = g.new_marker()?;
    let out = dfs(g, roots, &visited, Visit::Post);
    g.free_marker(visited);
    out
}

fn dfs<N, E>(
    g: &mut Graph<N, E>,
    roots: &[NodeId],
    visited: &Marker,
    visit: Visit,
) -> Result<Vec<NodeId>> {
    let mut out: Vec<NodeId> = Vec::new();
    let mut stack: Vec<(NodeId, usize)> = Vec::new();

    for &root in roots {
        if !g.mark_node(root, visited)? {
            continue;
        }
        if visit == Visit::Pre {
            out.push(root);
        }
        stack.push((root, 0));

        while let Some((v, next)) = stack.last().copied() {
            let Some(&e) = g.succ_edges(v).get(next) else {
                stack.pop();
                if visit == Visit::Post {
                    out.push(v);
                }
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }
            let (_, w) = g.edge_endpoints(e)?;
            if g.mark_node(w, visited)? {
                if visit == Visit::Pre {
                    out.push(w);
                }
                stack.push((w, 0));
            }
        }
    }
    Ok(out)
}

/// Weakly connected components, each listed in discovery order.
pub fn components<N, E>(g: &mut Graph<N, E>) -> Result<Vec<Vec<NodeId>>> {
    let seen = g.new_marker()?;
    let out = collect_components(g, &seen);
    g.free_marker(seen);
    out
}

fn collect_components<N, E>(g: &mut Graph<N, E>, seen: &Marker) -> Result<Vec<Vec<NodeId>>> {
    let ids: Vec<NodeId> = g.node_ids().collect();
    let mut out: Vec<Vec<NodeId>> = Vec::new();

    for start in ids {
        if !g.mark_node(start, seen)? {
            continue;
        }
        let mut comp: Vec<NodeId> = Vec::new();
        let mut queue: VecDeque<NodeId> = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            comp.push(v);
            let neighbors: Vec<NodeId> = g.successors(v).chain(g.predecessors(v)).collect();
            for w in neighbors {
                if g.mark_node(w, seen)? {
                    queue.push_back(w);
                }
            }
        }
        out.push(comp);
    }
    Ok(out)
}

/// Whether the graph is acyclic once every edge for which `skip` returns `true` is ignored.
pub fn is_acyclic<N, E, F>(g: &Graph<N, E>, skip: F) -> bool
where
    F: Fn(EdgeId) -> bool,
{
    let mut indegree: HashMap<NodeId, usize> = g.node_ids().map(|v| (v, 0)).collect();
    for (e, edge) in g.edges() {
        if skip(e) {
            continue;
        }
        if let Some(d) = indegree.get_mut(&edge.succ()) {
            *d += 1;
        }
    }

    let mut queue: VecDeque<NodeId> = g
        .node_ids()
        .filter(|v| indegree.get(v).copied() == Some(0))
        .collect();
    let mut visited = 0usize;
    while let Some(v) = queue.pop_front() {
        visited += 1;
        for &e in g.succ_edges(v) {
            if skip(e) {
                continue;
            }
            let Ok((_, w)) = g.edge_endpoints(e) else {
                continue;
            };
            if let Some(d) = indegree.get_mut(&w) {
                *d -= 1;
                if *d == 0 {
                    queue.push_back(w);
                }
            }
        }
    }
    visited == g.node_count()
}

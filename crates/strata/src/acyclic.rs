//! Edge classification: find a set of back edges whose reversal makes the graph acyclic.
//!
//! Iterative depth-first search rooted at every source (nodes without predecessors) in graph
//! order, then at every node still unvisited, so cyclic components without a source are
//! covered too. A node is `entered` when first reached and `finished` once all of its successor
//! edges are explored; an edge into a node that is entered but not finished closes a cycle on the
//! current path and is a back edge. Self-loops are always back edges.

use crate::error::Result;
use crate::graph::{EdgeId, Graph, Marker, NodeId, Numeration};
use crate::util::{with_marker, with_num};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[derive(Debug, Clone, Default)]
pub struct Classification {
    back_edges: HashSet<EdgeId>,
    self_loops: HashSet<EdgeId>,
    dfs_order: HashMap<NodeId, u32>,
    roots: Vec<NodeId>,
}

impl Classification {
    pub fn is_back_edge(&self, e: EdgeId) -> bool {
        self.back_edges.contains(&e)
    }

    pub fn is_self_loop(&self, e: EdgeId) -> bool {
        self.self_loops.contains(&e)
    }

    pub fn back_edge_count(&self) -> usize {
        self.back_edges.len()
    }

    pub fn back_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.back_edges.iter().copied()
    }

    /// DFS preorder number of `n`.
    pub fn dfs_number(&self, n: NodeId) -> Option<u32> {
        self.dfs_order.get(&n).copied()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// `(from, to)` of `e` in the acyclic view: back edges are reversed, self-loops have none.
    pub fn logical_endpoints<N, E>(
        &self,
        g: &Graph<N, E>,
        e: EdgeId,
    ) -> Result<Option<(NodeId, NodeId)>> {
        let (pred, succ) = g.edge_endpoints(e)?;
        if pred == succ {
            return Ok(None);
        }
        if self.is_back_edge(e) {
            Ok(Some((succ, pred)))
        } else {
            Ok(Some((pred, succ)))
        }
    }
}

pub fn run<N, E>(g: &mut Graph<N, E>) -> Result<Classification> {
    with_marker(g, |g, entered| {
        with_marker(g, |g, finished| {
            with_num(g, |g, order| classify(g, entered, finished, order))
        })
    })
}

fn classify<N, E>(
    g: &mut Graph<N, E>,
    entered: &Marker,
    finished: &Marker,
    order: &Numeration,
) -> Result<Classification> {
    let mut out = Classification::default();
    let mut next_number: u32 = 0;

    let mut seeds = g.sources();
    seeds.extend(g.node_ids());

    let mut stack: Vec<(NodeId, usize)> = Vec::new();
    for root in seeds {
        if g.is_node_marked(root, entered) {
            continue;
        }
        out.roots.push(root);
        g.mark_node(root, entered)?;
        g.set_node_number(root, order, next_number)?;
        next_number += 1;
        stack.push((root, 0));

        while let Some((v, next)) = stack.last().copied() {
            let Some(&e) = g.succ_edges(v).get(next) else {
                g.mark_node(v, finished)?;
                stack.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }

            let (_, w) = g.edge_endpoints(e)?;
            if w == v {
                out.self_loops.insert(e);
                out.back_edges.insert(e);
            } else if !g.is_node_marked(w, entered) {
                g.mark_node(w, entered)?;
                g.set_node_number(w, order, next_number)?;
                next_number += 1;
                stack.push((w, 0));
            } else if !g.is_node_marked(w, finished) {
                out.back_edges.insert(e);
            }
        }
    }

    out.dfs_order = g
        .node_ids()
        .filter_map(|v| g.node_number(v, order).map(|n| (v, n)))
        .collect();
    Ok(out)
}

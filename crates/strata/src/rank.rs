//! Longest-path ranking over the acyclic view left by [`acyclic`](crate::acyclic).
//!
//! Kahn-style propagation: every node waits until all of its logical predecessors are ranked,
//! then takes `max(rank(pred) + 1)`, or 0 without predecessors. Back edges count in their
//! reversed direction and self-loops are ignored. Remaining in-degrees and ranks live in two
//! numerations for the duration of the pass.

use crate::acyclic::Classification;
use crate::error::{LayoutError, Result};
use crate::graph::{Graph, NodeId, Numeration};
use crate::util::with_num;
use rustc_hash::FxBuildHasher;
use std::collections::VecDeque;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Default)]
pub struct Ranking {
    ranks: HashMap<NodeId, u32>,
    max_rank: u32,
}

impl Ranking {
    pub fn rank(&self, n: NodeId) -> Option<u32> {
        self.ranks.get(&n).copied()
    }

    pub fn max_rank(&self) -> u32 {
        self.max_rank
    }

    pub fn level_count(&self) -> usize {
        if self.ranks.is_empty() {
            0
        } else {
            self.max_rank as usize + 1
        }
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

pub fn run<N, E>(g: &mut Graph<N, E>, classification: &Classification) -> Result<Ranking> {
    with_num(g, |g, indegree| {
        with_num(g, |g, rank| longest_path(g, classification, indegree, rank))
    })
}

/// Logical predecessors and successors of `v`.
fn logical_neighbors<N, E>(
    g: &Graph<N, E>,
    classification: &Classification,
    v: NodeId,
) -> Result<(Vec<NodeId>, Vec<NodeId>)> {
    let mut preds: Vec<NodeId> = Vec::new();
    let mut succs: Vec<NodeId> = Vec::new();
    for &e in g.pred_edges(v).iter().chain(g.succ_edges(v)) {
        let Some((from, to)) = classification.logical_endpoints(g, e)? else {
            continue;
        };
        if to == v {
            preds.push(from);
        } else if from == v {
            succs.push(to);
        }
    }
    Ok((preds, succs))
}

fn longest_path<N, E>(
    g: &mut Graph<N, E>,
    classification: &Classification,
    indegree: &Numeration,
    rank: &Numeration,
) -> Result<Ranking> {
    let nodes: Vec<NodeId> = g.node_ids().collect();
    let total = nodes.len();

    for &v in &nodes {
        g.set_node_number(v, indegree, 0)?;
    }
    let edges: Vec<_> = g.edge_ids().collect();
    for e in edges {
        let Some((_, to)) = classification.logical_endpoints(g, e)? else {
            continue;
        };
        let d = g.node_number(to, indegree).unwrap_or(0);
        g.set_node_number(to, indegree, d + 1)?;
    }

    let mut queue: VecDeque<NodeId> = nodes
        .iter()
        .copied()
        .filter(|&v| g.node_number(v, indegree) == Some(0))
        .collect();

    let mut out = Ranking::default();
    let mut visited = 0usize;
    while let Some(v) = queue.pop_front() {
        visited += 1;
        let (preds, succs) = logical_neighbors(g, classification, v)?;

        let mut r: u32 = 0;
        for p in preds {
            let Some(pr) = g.node_number(p, rank) else {
                return Err(LayoutError::UnrankedNode { node: p });
            };
            r = r.max(pr + 1);
        }
        g.set_node_number(v, rank, r)?;
        out.ranks.insert(v, r);
        out.max_rank = out.max_rank.max(r);

        for w in succs {
            let d = g.node_number(w, indegree).unwrap_or(0);
            let d = d.saturating_sub(1);
            g.set_node_number(w, indegree, d)?;
            if d == 0 {
                queue.push_back(w);
            }
        }
    }

    if visited < total {
        return Err(LayoutError::RankingStalled { visited, total });
    }
    Ok(out)
}

//! Build the auxiliary layout graph.
//!
//! Every input node becomes a simple aux node in the level of its rank. Every edge spanning more
//! than one rank (in its logical direction) becomes a chain through one edge-control node per
//! intermediate rank, so that consecutive levels are only ever joined by rank-adjacent edges.
//! Self-loops get no aux representation.

use crate::acyclic::Classification;
use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::graph::{EdgeId, Graph, NodeId};
use crate::level::Level;
use crate::model::{AuxEdge, AuxNode, NodeSize};
use crate::rank::Ranking;
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Default)]
pub struct AuxGraph {
    pub graph: Graph<AuxNode, AuxEdge>,
    pub levels: Vec<Level>,
    node_map: HashMap<NodeId, NodeId>,
    chains: HashMap<EdgeId, Vec<NodeId>>,
}

impl AuxGraph {
    /// Aux node standing for input node `n`.
    pub fn aux_node(&self, n: NodeId) -> Option<NodeId> {
        self.node_map.get(&n).copied()
    }

    /// Edge-control nodes of input edge `e`, in logical (top to bottom) order.
    pub fn chain(&self, e: EdgeId) -> &[NodeId] {
        self.chains.get(&e).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn control_count(&self) -> usize {
        self.chains.values().map(Vec::len).sum()
    }

    pub fn max_rank(&self) -> u32 {
        self.levels.len().saturating_sub(1) as u32
    }
}

pub fn run<N, E>(
    g: &Graph<N, E>,
    classification: &Classification,
    ranking: &Ranking,
    config: &LayoutConfig,
) -> Result<AuxGraph>
where
    N: NodeSize,
{
    let mut aux = AuxGraph {
        levels: (0..ranking.level_count() as u32).map(Level::new).collect(),
        ..Default::default()
    };

    for (v, node) in g.nodes() {
        let rank = ranking
            .rank(v)
            .ok_or(LayoutError::UnrankedNode { node: v })?;
        let size = node.payload();
        let a = aux
            .graph
            .new_node(AuxNode::simple(v, size.width(), size.height(), rank))?;
        aux.levels[rank as usize].push(&mut aux.graph, a)?;
        aux.node_map.insert(v, a);
    }

    for e in g.edge_ids() {
        let Some((from, to)) = classification.logical_endpoints(g, e)? else {
            continue;
        };
        let inverted = classification.is_back_edge(e);
        let from_rank = ranking.rank(from).ok_or(LayoutError::UnrankedNode { node: from })?;
        let to_rank = ranking.rank(to).ok_or(LayoutError::UnrankedNode { node: to })?;
        let (Some(&aux_from), Some(&aux_to)) = (aux.node_map.get(&from), aux.node_map.get(&to))
        else {
            return Err(LayoutError::UnrankedNode { node: from });
        };

        let label = AuxEdge {
            origin: e,
            inverted,
            fixed: false,
        };
        let mut prev = aux_from;
        let mut chain: Vec<NodeId> = Vec::new();
        for r in from_rank + 1..to_rank {
            let control = aux
                .graph
                .new_node(AuxNode::edge_control(e, config.control_width, r))?;
            aux.levels[r as usize].push(&mut aux.graph, control)?;
            aux.graph.new_edge(prev, control, label)?;
            chain.push(control);
            prev = control;
        }
        aux.graph.new_edge(prev, aux_to, label)?;
        if !chain.is_empty() {
            aux.chains.insert(e, chain);
        }
    }

    Ok(aux)
}

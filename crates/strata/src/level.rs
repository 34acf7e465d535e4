//! One rank worth of auxiliary nodes, kept in left-to-right order.

use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::model::{AuxEdge, AuxNode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    rank: u32,
    nodes: Vec<NodeId>,
}

impl Level {
    pub fn new(rank: u32) -> Self {
        Self {
            rank,
            nodes: Vec::new(),
        }
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends `n` at the right end and records its order.
    pub fn push(&mut self, aux: &mut Graph<AuxNode, AuxEdge>, n: NodeId) -> Result<()> {
        let node = aux.node_mut(n)?.payload_mut();
        node.order = self.nodes.len();
        node.rank = self.rank;
        self.nodes.push(n);
        Ok(())
    }

    /// Replaces the order with `nodes`, a permutation of the current members.
    pub fn reorder(&mut self, aux: &mut Graph<AuxNode, AuxEdge>, nodes: Vec<NodeId>) -> Result<()> {
        debug_assert_eq!(nodes.len(), self.nodes.len());
        for (order, &n) in nodes.iter().enumerate() {
            aux.node_mut(n)?.payload_mut().order = order;
        }
        self.nodes = nodes;
        Ok(())
    }

    /// Height of the tallest member.
    pub fn height(&self, aux: &Graph<AuxNode, AuxEdge>) -> f64 {
        self.nodes
            .iter()
            .filter_map(|&n| aux.payload(n).ok())
            .map(|node| node.height)
            .fold(0.0, f64::max)
    }
}

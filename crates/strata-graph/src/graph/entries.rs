//! Node and edge records stored in a [`Graph`](super::Graph).

use super::{EdgeId, GraphId, NodeId};
use crate::tag::{TagState, Tagged};

#[derive(Debug, Clone)]
pub struct Node<N> {
    pub(in crate::graph) uid: u64,
    pub(in crate::graph) graph: GraphId,
    pub(in crate::graph) preds: Vec<EdgeId>,
    pub(in crate::graph) succs: Vec<EdgeId>,
    pub(in crate::graph) tags: TagState,
    pub(in crate::graph) payload: N,
}

impl<N> Node<N> {
    /// Graph-unique id, increasing in creation order and never reused.
    pub fn uid(&self) -> u64 {
        self.uid
    }

    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn pred_edges(&self) -> &[EdgeId] {
        &self.preds
    }

    pub fn succ_edges(&self) -> &[EdgeId] {
        &self.succs
    }

    pub fn in_degree(&self) -> usize {
        self.preds.len()
    }

    pub fn out_degree(&self) -> usize {
        self.succs.len()
    }

    pub fn payload(&self) -> &N {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut N {
        &mut self.payload
    }
}

impl<N> Tagged for Node<N> {
    fn owner(&self) -> GraphId {
        self.graph
    }

    fn tags(&self) -> &TagState {
        &self.tags
    }

    fn tags_mut(&mut self) -> &mut TagState {
        &mut self.tags
    }
}

#[derive(Debug, Clone)]
pub struct Edge<E> {
    pub(in crate::graph) uid: u64,
    pub(in crate::graph) graph: GraphId,
    pub(in crate::graph) pred: NodeId,
    pub(in crate::graph) succ: NodeId,
    pub(in crate::graph) tags: TagState,
    pub(in crate::graph) payload: E,
}

impl<E> Edge<E> {
    pub fn uid(&self) -> u64 {
        self.uid
    }

    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn pred(&self) -> NodeId {
        self.pred
    }

    pub fn succ(&self) -> NodeId {
        self.succ
    }

    pub fn is_self_loop(&self) -> bool {
        self.pred == self.succ
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut E {
        &mut self.payload
    }
}

impl<E> Tagged for Edge<E> {
    fn owner(&self) -> GraphId {
        self.graph
    }

    fn tags(&self) -> &TagState {
        &self.tags
    }

    fn tags_mut(&mut self) -> &mut TagState {
        &mut self.tags
    }
}

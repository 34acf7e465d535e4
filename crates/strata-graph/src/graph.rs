//! Directed multigraph container.
//!
//! Nodes and edges live in two generational [`Pool`]s and are addressed by `Copy` handles.
//! Adjacency is mirrored: an edge is listed in its predecessor's successor list and in its
//! successor's predecessor list, and in no other node's lists. Every structural mutation keeps
//! that invariant; removing an edge always detaches it from both endpoints.
//!
//! Node and edge specialization is done through the payload types `N` and `E`.

mod entries;
mod ids;

pub use entries::{Edge, Node};
pub use ids::{EdgeId, GraphId, NodeId};

use crate::error::{GraphError, Result, TagError};
use crate::pool::Pool;
use crate::tag::{Marker, MarkerManager, NumManager, Numeration, TagState, Tagged};

#[derive(Debug)]
pub struct Graph<N, E> {
    id: GraphId,
    nodes: Pool<Node<N>>,
    edges: Pool<Edge<E>>,
    next_node_uid: u64,
    next_edge_uid: u64,
    markers: MarkerManager,
    nums: NumManager,
}

/// The copy is a new graph: it gets a fresh id, every node and edge is rebound to it, and it
/// starts with no live tags. Handles of the original are foreign to the copy.
impl<N: Clone, E: Clone> Clone for Graph<N, E> {
    fn clone(&self) -> Self {
        let id = GraphId::fresh();
        let mut nodes = self.nodes.clone();
        for (_, node) in nodes.iter_mut() {
            node.graph = id;
            node.tags = TagState::default();
            for e in node.preds.iter_mut().chain(node.succs.iter_mut()) {
                e.graph = id;
            }
        }
        let mut edges = self.edges.clone();
        for (_, edge) in edges.iter_mut() {
            edge.graph = id;
            edge.tags = TagState::default();
            edge.pred.graph = id;
            edge.succ.graph = id;
        }
        Self {
            id,
            nodes,
            edges,
            next_node_uid: self.next_node_uid,
            next_edge_uid: self.next_edge_uid,
            markers: self.markers.fresh_for(id),
            nums: self.nums.fresh_for(id),
        }
    }
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self::with_pools(Pool::unbounded(), Pool::unbounded())
    }

    /// Builds a graph on caller-provided storage, e.g. [`Pool::bounded`] to cap its size.
    pub fn with_pools(nodes: Pool<Node<N>>, edges: Pool<Edge<E>>) -> Self {
        let id = GraphId::fresh();
        Self {
            id,
            nodes,
            edges,
            next_node_uid: 0,
            next_edge_uid: 0,
            markers: MarkerManager::owned_by(id, u32::MAX),
            nums: NumManager::owned_by(id, u32::MAX),
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    fn check_node(&self, n: NodeId) -> Result<&Node<N>> {
        if n.graph != self.id {
            return Err(GraphError::ForeignNode(n));
        }
        self.nodes.get(n.slot).ok_or(GraphError::StaleNode(n))
    }

    fn check_node_mut(&mut self, n: NodeId) -> Result<&mut Node<N>> {
        if n.graph != self.id {
            return Err(GraphError::ForeignNode(n));
        }
        self.nodes.get_mut(n.slot).ok_or(GraphError::StaleNode(n))
    }

    fn check_edge(&self, e: EdgeId) -> Result<&Edge<E>> {
        if e.graph != self.id {
            return Err(GraphError::ForeignEdge(e));
        }
        self.edges.get(e.slot).ok_or(GraphError::StaleEdge(e))
    }

    fn check_edge_mut(&mut self, e: EdgeId) -> Result<&mut Edge<E>> {
        if e.graph != self.id {
            return Err(GraphError::ForeignEdge(e));
        }
        self.edges.get_mut(e.slot).ok_or(GraphError::StaleEdge(e))
    }

    // ---- structure -------------------------------------------------------------------------

    pub fn new_node(&mut self, payload: N) -> Result<NodeId> {
        let slot = self.nodes.allocate(Node {
            uid: self.next_node_uid,
            graph: self.id,
            preds: Vec::new(),
            succs: Vec::new(),
            tags: TagState::default(),
            payload,
        })?;
        self.next_node_uid += 1;
        Ok(NodeId {
            graph: self.id,
            slot,
        })
    }

    /// Both endpoints are validated before anything is allocated, so a failed call leaves the
    /// graph untouched.
    pub fn new_edge(&mut self, pred: NodeId, succ: NodeId, payload: E) -> Result<EdgeId> {
        self.check_node(pred)?;
        self.check_node(succ)?;

        let slot = self.edges.allocate(Edge {
            uid: self.next_edge_uid,
            graph: self.id,
            pred,
            succ,
            tags: TagState::default(),
            payload,
        })?;
        self.next_edge_uid += 1;
        let e = EdgeId {
            graph: self.id,
            slot,
        };
        self.check_node_mut(pred)?.succs.push(e);
        self.check_node_mut(succ)?.preds.push(e);
        Ok(e)
    }

    /// Detaches `e` from both endpoints and frees it.
    pub fn remove_edge(&mut self, e: EdgeId) -> Result<E> {
        let (pred, succ) = {
            let edge = self.check_edge(e)?;
            (edge.pred, edge.succ)
        };
        if let Some(node) = self.nodes.get_mut(pred.slot) {
            if let Some(pos) = node.succs.iter().position(|x| *x == e) {
                node.succs.remove(pos);
            }
        }
        if let Some(node) = self.nodes.get_mut(succ.slot) {
            if let Some(pos) = node.preds.iter().position(|x| *x == e) {
                node.preds.remove(pos);
            }
        }
        let edge = self.edges.destroy(e.slot).ok_or(GraphError::StaleEdge(e))?;
        Ok(edge.payload)
    }

    /// Removes every incident edge (successor side first), then the node itself.
    pub fn remove_node(&mut self, n: NodeId) -> Result<N> {
        let (succs, preds) = {
            let node = self.check_node(n)?;
            (node.succs.clone(), node.preds.clone())
        };
        for e in succs.into_iter().chain(preds) {
            // A self-loop shows up in both lists; the second attempt finds it gone.
            if self.edges.contains(e.slot) {
                self.remove_edge(e)?;
            }
        }
        let node = self.nodes.destroy(n.slot).ok_or(GraphError::StaleNode(n))?;
        Ok(node.payload)
    }

    /// Removes all nodes and edges. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.edges.clear();
        self.nodes.clear();
    }

    // ---- lookup ----------------------------------------------------------------------------

    pub fn contains_node(&self, n: NodeId) -> bool {
        self.check_node(n).is_ok()
    }

    pub fn contains_edge(&self, e: EdgeId) -> bool {
        self.check_edge(e).is_ok()
    }

    pub fn node(&self, n: NodeId) -> Result<&Node<N>> {
        self.check_node(n)
    }

    pub fn node_mut(&mut self, n: NodeId) -> Result<&mut Node<N>> {
        self.check_node_mut(n)
    }

    pub fn edge(&self, e: EdgeId) -> Result<&Edge<E>> {
        self.check_edge(e)
    }

    pub fn edge_mut(&mut self, e: EdgeId) -> Result<&mut Edge<E>> {
        self.check_edge_mut(e)
    }

    pub fn payload(&self, n: NodeId) -> Result<&N> {
        self.check_node(n).map(Node::payload)
    }

    pub fn edge_payload(&self, e: EdgeId) -> Result<&E> {
        self.check_edge(e).map(Edge::payload)
    }

    pub fn edge_endpoints(&self, e: EdgeId) -> Result<(NodeId, NodeId)> {
        self.check_edge(e).map(|edge| (edge.pred, edge.succ))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ---- traversal -------------------------------------------------------------------------

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        let graph = self.id;
        self.nodes.iter().map(move |(slot, _)| NodeId { graph, slot })
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<N>)> {
        let graph = self.id;
        self.nodes
            .iter()
            .map(move |(slot, node)| (NodeId { graph, slot }, node))
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        let graph = self.id;
        self.edges.iter().map(move |(slot, _)| EdgeId { graph, slot })
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge<E>)> {
        let graph = self.id;
        self.edges
            .iter()
            .map(move |(slot, edge)| (EdgeId { graph, slot }, edge))
    }

    pub fn first_node(&self) -> Option<NodeId> {
        self.nodes.next_after(None).map(|slot| NodeId {
            graph: self.id,
            slot,
        })
    }

    pub fn next_node(&self, n: NodeId) -> Option<NodeId> {
        self.nodes.next_after(Some(n.slot)).map(|slot| NodeId {
            graph: self.id,
            slot,
        })
    }

    pub fn first_edge(&self) -> Option<EdgeId> {
        self.edges.next_after(None).map(|slot| EdgeId {
            graph: self.id,
            slot,
        })
    }

    pub fn next_edge(&self, e: EdgeId) -> Option<EdgeId> {
        self.edges.next_after(Some(e.slot)).map(|slot| EdgeId {
            graph: self.id,
            slot,
        })
    }

    pub fn succ_edges(&self, n: NodeId) -> &[EdgeId] {
        self.check_node(n).map(Node::succ_edges).unwrap_or(&[])
    }

    pub fn pred_edges(&self, n: NodeId) -> &[EdgeId] {
        self.check_node(n).map(Node::pred_edges).unwrap_or(&[])
    }

    pub fn first_succ(&self, n: NodeId) -> Option<EdgeId> {
        self.succ_edges(n).first().copied()
    }

    /// Successor edge of `n` that follows `e`.
    ///
    /// Each step searches for `e` in the successor list, so walking all `d` successors this way
    /// costs O(d²). Iterate [`Graph::succ_edges`] instead when the whole list is needed.
    pub fn next_succ(&self, n: NodeId, e: EdgeId) -> Option<EdgeId> {
        let succs = self.succ_edges(n);
        let pos = succs.iter().position(|x| *x == e)?;
        succs.get(pos + 1).copied()
    }

    pub fn first_pred(&self, n: NodeId) -> Option<EdgeId> {
        self.pred_edges(n).first().copied()
    }

    /// Predecessor edge of `n` that follows `e`. Same O(d) per step as [`Graph::next_succ`];
    /// prefer [`Graph::pred_edges`] for full walks.
    pub fn next_pred(&self, n: NodeId, e: EdgeId) -> Option<EdgeId> {
        let preds = self.pred_edges(n);
        let pos = preds.iter().position(|x| *x == e)?;
        preds.get(pos + 1).copied()
    }

    pub fn successors(&self, n: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.succ_edges(n)
            .iter()
            .filter_map(|e| self.edges.get(e.slot).map(|edge| edge.succ))
    }

    pub fn predecessors(&self, n: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.pred_edges(n)
            .iter()
            .filter_map(|e| self.edges.get(e.slot).map(|edge| edge.pred))
    }

    pub fn edges_between(&self, pred: NodeId, succ: NodeId) -> Vec<EdgeId> {
        self.succ_edges(pred)
            .iter()
            .copied()
            .filter(|e| self.edges.get(e.slot).is_some_and(|edge| edge.succ == succ))
            .collect()
    }

    /// Nodes without predecessor edges, in graph order.
    pub fn sources(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, node)| node.preds.is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn sinks(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, node)| node.succs.is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    // ---- markers ---------------------------------------------------------------------------

    /// Issues a marker, sweeping stale marks from every node and edge if the value counter ran
    /// out.
    pub fn new_marker(&mut self) -> std::result::Result<Marker, TagError> {
        match self.markers.new_marker() {
            Err(TagError::OutOfValues) => {
                let live = *self.markers.live_values();
                for (_, node) in self.nodes.iter_mut() {
                    node.tags.sweep_marks(&live);
                }
                for (_, edge) in self.edges.iter_mut() {
                    edge.tags.sweep_marks(&live);
                }
                self.markers.restart_values();
                self.markers.new_marker()
            }
            other => other,
        }
    }

    /// Returns `false` (and frees nothing) for a marker issued by another graph.
    pub fn free_marker(&mut self, marker: Marker) -> bool {
        self.markers.free_marker(marker)
    }

    pub fn markers(&self) -> &MarkerManager {
        &self.markers
    }

    pub fn mark_node(&mut self, n: NodeId, marker: &Marker) -> Result<bool> {
        Ok(self.check_node_mut(n)?.mark(marker)?)
    }

    pub fn unmark_node(&mut self, n: NodeId, marker: &Marker) -> Result<bool> {
        Ok(self.check_node_mut(n)?.unmark(marker)?)
    }

    pub fn is_node_marked(&self, n: NodeId, marker: &Marker) -> bool {
        self.check_node(n).is_ok_and(|node| node.is_marked(marker))
    }

    pub fn mark_edge(&mut self, e: EdgeId, marker: &Marker) -> Result<bool> {
        Ok(self.check_edge_mut(e)?.mark(marker)?)
    }

    pub fn unmark_edge(&mut self, e: EdgeId, marker: &Marker) -> Result<bool> {
        Ok(self.check_edge_mut(e)?.unmark(marker)?)
    }

    pub fn is_edge_marked(&self, e: EdgeId, marker: &Marker) -> bool {
        self.check_edge(e).is_ok_and(|edge| edge.is_marked(marker))
    }

    // ---- numerations -----------------------------------------------------------------------

    pub fn new_num(&mut self) -> std::result::Result<Numeration, TagError> {
        match self.nums.new_num() {
            Err(TagError::OutOfValues) => {
                let live = *self.nums.live_values();
                for (_, node) in self.nodes.iter_mut() {
                    node.tags.sweep_numbers(&live);
                }
                for (_, edge) in self.edges.iter_mut() {
                    edge.tags.sweep_numbers(&live);
                }
                self.nums.restart_values();
                self.nums.new_num()
            }
            other => other,
        }
    }

    pub fn free_num(&mut self, num: Numeration) -> bool {
        self.nums.free_num(num)
    }

    pub fn nums(&self) -> &NumManager {
        &self.nums
    }

    pub fn set_node_number(&mut self, n: NodeId, num: &Numeration, number: u32) -> Result<()> {
        Ok(self.check_node_mut(n)?.set_number(num, number)?)
    }

    pub fn node_number(&self, n: NodeId, num: &Numeration) -> Option<u32> {
        self.check_node(n).ok().and_then(|node| node.number(num))
    }

    pub fn unnumber_node(&mut self, n: NodeId, num: &Numeration) -> Result<Option<u32>> {
        Ok(self.check_node_mut(n)?.unnumber(num)?)
    }

    pub fn set_edge_number(&mut self, e: EdgeId, num: &Numeration, number: u32) -> Result<()> {
        Ok(self.check_edge_mut(e)?.set_number(num, number)?)
    }

    pub fn edge_number(&self, e: EdgeId, num: &Numeration) -> Option<u32> {
        self.check_edge(e).ok().and_then(|edge| edge.number(num))
    }

    /// Caps the marker and numeration value counters of this graph.
    pub fn set_tag_value_limit(&mut self, limit: u32) {
        self.markers.set_value_limit(limit);
        self.nums.set_value_limit(limit);
    }
}

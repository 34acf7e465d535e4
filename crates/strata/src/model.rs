//! Layout input/output types and the auxiliary node and edge payloads.

use crate::graph::{EdgeId, NodeId};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Size hint of a node payload. The engine treats it as opaque box dimensions.
pub trait NodeSize {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl NodeSize for Size {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

impl NodeSize for (f64, f64) {
    fn width(&self) -> f64 {
        self.0
    }

    fn height(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum NodeKind {
    /// Stands for a node of the input graph.
    #[default]
    Simple,
    /// Dummy node carrying a long edge through an intermediate rank.
    EdgeControl,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuxNode {
    pub origin: Option<NodeId>,
    /// For edge-control nodes, the input edge they belong to.
    pub origin_edge: Option<EdgeId>,
    pub kind: NodeKind,
    pub width: f64,
    pub height: f64,
    pub rank: u32,
    pub order: usize,
    pub x: f64,
}

impl AuxNode {
    pub fn simple(origin: NodeId, width: f64, height: f64, rank: u32) -> Self {
        Self {
            origin: Some(origin),
            origin_edge: None,
            kind: NodeKind::Simple,
            width,
            height,
            rank,
            order: 0,
            x: 0.0,
        }
    }

    pub fn edge_control(origin_edge: EdgeId, width: f64, rank: u32) -> Self {
        Self {
            origin: None,
            origin_edge: Some(origin_edge),
            kind: NodeKind::EdgeControl,
            width,
            height: 0.0,
            rank,
            order: 0,
            x: 0.0,
        }
    }

    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxEdge {
    pub origin: EdgeId,
    /// Copied from the classifier: the input edge runs against this aux edge.
    pub inverted: bool,
    /// Pinned by an interactive editor; ignored by the placement math.
    pub fixed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePlacement {
    pub node: NodeId,
    pub rank: u32,
    pub order: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRoute {
    pub edge: EdgeId,
    /// The edge was classified as a back edge; renderers flip the arrowhead.
    pub inverted: bool,
    pub self_loop: bool,
    /// Edge-control positions from the edge's predecessor towards its successor.
    pub points: Vec<Point>,
}

/// Result of one [`layout`](crate::layout) call.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub max_rank: u32,
    pub width: f64,
    pub height: f64,
    nodes: Vec<NodePlacement>,
    edges: Vec<EdgeRoute>,
    #[serde(skip)]
    node_index: FxHashMap<NodeId, usize>,
    #[serde(skip)]
    edge_index: FxHashMap<EdgeId, usize>,
}

impl Layout {
    pub(crate) fn new(max_rank: u32) -> Self {
        Self {
            max_rank,
            ..Default::default()
        }
    }

    pub(crate) fn push_node(&mut self, placement: NodePlacement) {
        self.node_index.insert(placement.node, self.nodes.len());
        self.nodes.push(placement);
    }

    pub(crate) fn push_edge(&mut self, route: EdgeRoute) {
        self.edge_index.insert(route.edge, self.edges.len());
        self.edges.push(route);
    }

    pub fn node(&self, id: NodeId) -> Option<&NodePlacement> {
        self.node_index.get(&id).map(|&ix| &self.nodes[ix])
    }

    pub fn edge(&self, id: EdgeId) -> Option<&EdgeRoute> {
        self.edge_index.get(&id).map(|&ix| &self.edges[ix])
    }

    /// Placements in input graph order.
    pub fn nodes(&self) -> &[NodePlacement] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeRoute] {
        &self.edges
    }

    /// Nodes of one rank, left to right.
    pub fn rank_nodes(&self, rank: u32) -> Vec<&NodePlacement> {
        let mut out: Vec<&NodePlacement> = self.nodes.iter().filter(|p| p.rank == rank).collect();
        out.sort_by_key(|p| p.order);
        out
    }
}

//! Directed multigraph container with O(1) transient tagging.
//!
//! `strata-graph` provides the [`Graph`] used by the `strata` layout engine: an arena-backed
//! directed multigraph with mirrored adjacency lists, plus markers and numerations that let
//! algorithms tag nodes and edges without resetting the whole graph first.

#![forbid(unsafe_code)]

pub mod alg;
pub mod error;
pub mod graph;
pub mod pool;
pub mod tag;

pub use error::{GraphError, PoolError, Result, TagError};
pub use graph::{Edge, EdgeId, Graph, GraphId, Node, NodeId};
pub use pool::{Pool, Slot};
pub use tag::{
    Marker, MarkerManager, NumManager, Numeration, TAG_CAPACITY, TagState, Tagged, UNNUMBERED,
};

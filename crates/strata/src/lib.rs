//! Layered graph layout.
//!
//! `strata` assigns every node of a directed graph (cycles and disconnected parts allowed) a
//! discrete rank and a horizontal position:
//!
//! 1. [`acyclic`]: DFS edge classification; back edges are reversed for ranking purposes.
//! 2. [`rank`]: longest-path ranking over the resulting DAG.
//! 3. [`normalize`]: auxiliary graph with one edge-control node per rank crossed by a long edge,
//!    partitioned into [`Level`]s.
//! 4. [`position`]: barycenter-driven horizontal placement with merge-on-overlap groups.
//!
//! [`layout`] runs the four passes in order.

#![forbid(unsafe_code)]

pub use strata_graph as graph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod acyclic;
pub mod config;
pub mod error;
pub mod level;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod position;
pub mod rank;
mod util;

pub use config::LayoutConfig;
pub use error::{LayoutError, Result};
pub use level::Level;
pub use model::{
    AuxEdge, AuxNode, EdgeRoute, Layout, NodeKind, NodePlacement, NodeSize, Point, Size,
};
pub use pipeline::layout;

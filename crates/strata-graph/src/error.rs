use crate::{EdgeId, GraphId, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("slot pool exhausted: at most {limit} live values")]
    Exhausted { limit: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    /// Every tag slot is held; some algorithm forgot to free its marker or numeration.
    #[error("all {capacity} tag indexes are in use")]
    OutOfIndexes { capacity: usize },
    #[error("tag values exhausted; a sweep is required before new tags can be issued")]
    OutOfValues,
    #[error("number {0} is reserved as the unnumbered sentinel")]
    NumberOutOfRange(u32),
    #[error("tag issued by {owner:?} used on an object of {graph:?}")]
    ForeignTag { owner: GraphId, graph: GraphId },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("node {0:?} belongs to another graph")]
    ForeignNode(NodeId),
    #[error("edge {0:?} belongs to another graph")]
    ForeignEdge(EdgeId),
    #[error("node {0:?} is not live in this graph")]
    StaleNode(NodeId),
    #[error("edge {0:?} is not live in this graph")]
    StaleEdge(EdgeId),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Tag(#[from] TagError),
}

pub type Result<T> = std::result::Result<T, GraphError>;

//! Node and edge handles.
//!
//! Handles are plain `Copy` values: the issuing graph's id plus a pool slot. A handle stays
//! valid until the object it names is removed; afterwards every checked graph operation rejects
//! it as stale, even once the slot is reused.

use crate::pool::Slot;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static GRAPH_ID_COUNTER: AtomicU32 = AtomicU32::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u32);

impl GraphId {
    pub(crate) fn fresh() -> Self {
        Self(GRAPH_ID_COUNTER.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) graph: GraphId,
    pub(crate) slot: Slot,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    pub(crate) graph: GraphId,
    pub(crate) slot: Slot,
}

impl NodeId {
    pub fn graph(self) -> GraphId {
        self.graph
    }

    pub fn index(self) -> usize {
        self.slot.index()
    }
}

impl EdgeId {
    pub fn graph(self) -> GraphId {
        self.graph
    }

    pub fn index(self) -> usize {
        self.slot.index()
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n{}v{}@g{}",
            self.slot.index(),
            self.slot.generation(),
            self.graph.0
        )
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "e{}v{}@g{}",
            self.slot.index(),
            self.slot.generation(),
            self.graph.0
        )
    }
}

impl serde::Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{self:?}"))
    }
}

impl serde::Serialize for EdgeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{self:?}"))
    }
}

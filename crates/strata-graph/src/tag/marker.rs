//! Boolean tags.

use super::{TagAllocator, TagValue};
use crate::error::TagError;
use crate::graph::GraphId;

/// A live marker. Not `Clone`: hand it back with [`MarkerManager::free_marker`] (or
/// `Graph::free_marker`) when the algorithm that owns it is done.
#[derive(Debug, PartialEq, Eq)]
pub struct Marker {
    owner: GraphId,
    index: u8,
    value: TagValue,
}

impl Marker {
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Graph (or standalone manager) that issued this tag.
    pub fn owner(&self) -> GraphId {
        self.owner
    }

    pub(crate) fn value(&self) -> TagValue {
        self.value
    }
}

#[derive(Debug, Clone)]
pub struct MarkerManager {
    owner: GraphId,
    alloc: TagAllocator,
}

impl Default for MarkerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerManager {
    pub fn new() -> Self {
        Self::with_value_limit(TagValue::MAX)
    }

    /// Caps the value counter. Small limits make the sweep path reachable in tests.
    pub fn with_value_limit(limit: u32) -> Self {
        Self::owned_by(GraphId::fresh(), limit)
    }

    pub(crate) fn owned_by(owner: GraphId, limit: u32) -> Self {
        Self {
            owner,
            alloc: TagAllocator::new(limit),
        }
    }

    /// An empty manager for the copy of a graph, keeping the value limit.
    pub(crate) fn fresh_for(&self, owner: GraphId) -> Self {
        Self {
            owner,
            alloc: self.alloc.reset(),
        }
    }

    pub fn owner(&self) -> GraphId {
        self.owner
    }

    /// Fails with [`TagError::OutOfValues`] when the counter is spent; the owner must sweep its
    /// objects against [`MarkerManager::live_values`] and call
    /// [`MarkerManager::restart_values`] before retrying.
    pub fn new_marker(&mut self) -> Result<Marker, TagError> {
        let (index, value) = self.alloc.acquire()?;
        Ok(Marker {
            owner: self.owner,
            index: index as u8,
            value,
        })
    }

    /// Returns `false` if the marker was not issued by this manager (or already freed).
    pub fn free_marker(&mut self, marker: Marker) -> bool {
        marker.owner == self.owner && self.alloc.release(marker.index(), marker.value)
    }

    pub fn is_live(&self, marker: &Marker) -> bool {
        marker.owner == self.owner && self.alloc.is_live(marker.index(), marker.value)
    }

    pub fn used_indexes(&self) -> usize {
        self.alloc.used()
    }

    pub fn live_values(&self) -> &[Option<u32>; super::TAG_CAPACITY] {
        self.alloc.live()
    }

    pub fn restart_values(&mut self) {
        self.alloc.restart_values();
    }

    pub fn set_value_limit(&mut self, limit: u32) {
        self.alloc.set_value_limit(limit);
    }
}

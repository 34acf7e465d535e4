//! Integer tags.

use super::{TagAllocator, TagValue};
use crate::error::TagError;
use crate::graph::GraphId;

/// Reserved number meaning "not numbered under this numeration".
pub const UNNUMBERED: u32 = u32::MAX;

#[derive(Debug, PartialEq, Eq)]
pub struct Numeration {
    owner: GraphId,
    index: u8,
    value: TagValue,
}

impl Numeration {
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
pub struct NumManager {
    owner: GraphId,
    alloc: TagAllocator,
}

impl Default for NumManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NumManager {
    pub fn new() -> Self {
        Self::with_value_limit(TagValue::MAX)
    }

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

    pub fn new_num(&mut self) -> Result<Numeration, TagError> {
        let (index, value) = self.alloc.acquire()?;
        Ok(Numeration {
            owner: self.owner,
            index: index as u8,
            value,
        })
    }

    /// Returns `false` if the numeration was not issued by this manager.
    pub fn free_num(&mut self, num: Numeration) -> bool {
        num.owner == self.owner && self.alloc.release(num.index(), num.value)
    }

    pub fn is_live(&self, num: &Numeration) -> bool {
        num.owner == self.owner && self.alloc.is_live(num.index(), num.value)
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

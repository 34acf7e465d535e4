//! Transient per-object tags: markers (boolean) and numerations (integer).
//!
//! A tag is an `(index, value)` pair. Every node and edge keeps [`TAG_CAPACITY`] stored values,
//! one per index. An object is tagged by a live tag iff the value stored at the tag's index equals
//! the tag's value. Values are issued from an increasing counter and are never handed out twice
//! while an object may still hold a stale copy, so starting a new algorithm never requires a pass
//! over the graph to reset flags.
//!
//! Markers and numerations remember the graph that issued them. Using one on another graph's
//! objects is rejected rather than silently aliasing a tag of that graph.
//!
//! `TAG_CAPACITY` bounds how many markers (and, separately, how many numerations) can be held at
//! the same time by nested algorithms on one graph. Requesting one more fails with
//! [`TagError::OutOfIndexes`].

pub mod marker;
pub mod numeration;

pub use marker::{Marker, MarkerManager};
pub use numeration::{NumManager, Numeration, UNNUMBERED};

use crate::error::TagError;
use crate::graph::GraphId;

pub const TAG_CAPACITY: usize = 10;

pub(crate) type TagValue = u32;

/// Stored value of an object that no tag has touched (or that a sweep cleared).
pub(crate) const CLEAN: TagValue = 0;

/// Index/value bookkeeping shared by markers and numerations.
#[derive(Debug, Clone)]
pub(crate) struct TagAllocator {
    live: [Option<TagValue>; TAG_CAPACITY],
    // Values that were live at the last sweep. Objects may still store them after the owning tag
    // is freed, so they are skipped until the next sweep.
    reserved: [Option<TagValue>; TAG_CAPACITY],
    last_value: TagValue,
    value_limit: TagValue,
}

impl TagAllocator {
    pub(crate) fn new(value_limit: TagValue) -> Self {
        Self {
            live: [None; TAG_CAPACITY],
            reserved: [None; TAG_CAPACITY],
            last_value: CLEAN,
            value_limit: value_limit.max(1),
        }
    }

    pub(crate) fn acquire(&mut self) -> Result<(usize, TagValue), TagError> {
        let index = self
            .live
            .iter()
            .position(Option::is_none)
            .ok_or(TagError::OutOfIndexes {
                capacity: TAG_CAPACITY,
            })?;
        let value = self.next_value()?;
        self.live[index] = Some(value);
        Ok((index, value))
    }

    fn next_value(&mut self) -> Result<TagValue, TagError> {
        let mut candidate = self.last_value;
        loop {
            if candidate >= self.value_limit {
                return Err(TagError::OutOfValues);
            }
            candidate += 1;
            let taken = self
                .live
                .iter()
                .chain(self.reserved.iter())
                .any(|v| *v == Some(candidate));
            if !taken {
                self.last_value = candidate;
                return Ok(candidate);
            }
        }
    }

    pub(crate) fn release(&mut self, index: usize, value: TagValue) -> bool {
        match self.live.get_mut(index) {
            Some(slot) if *slot == Some(value) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn is_live(&self, index: usize, value: TagValue) -> bool {
        self.live.get(index).copied().flatten() == Some(value)
    }

    pub(crate) fn live(&self) -> &[Option<TagValue>; TAG_CAPACITY] {
        &self.live
    }

    /// Called once every object has been swept against [`TagAllocator::live`].
    pub(crate) fn restart_values(&mut self) {
        self.reserved = self.live;
        self.last_value = CLEAN;
    }

    pub(crate) fn used(&self) -> usize {
        self.live.iter().filter(|v| v.is_some()).count()
    }

    pub(crate) fn set_value_limit(&mut self, limit: TagValue) {
        self.value_limit = limit.max(1);
    }

    /// Same value limit, nothing live or reserved.
    pub(crate) fn reset(&self) -> Self {
        Self::new(self.value_limit)
    }
}

/// Tags are only meaningful on objects of the graph that issued them.
fn check_owner(tag_owner: GraphId, graph: GraphId) -> Result<(), TagError> {
    if tag_owner == graph {
        Ok(())
    } else {
        Err(TagError::ForeignTag {
            owner: tag_owner,
            graph,
        })
    }
}

/// Stored tag values of one node or edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagState {
    marks: [TagValue; TAG_CAPACITY],
    numbers: [(TagValue, u32); TAG_CAPACITY],
}

impl Default for TagState {
    fn default() -> Self {
        Self {
            marks: [CLEAN; TAG_CAPACITY],
            numbers: [(CLEAN, UNNUMBERED); TAG_CAPACITY],
        }
    }
}

impl TagState {
    /// Returns `true` if the object was not marked before.
    pub(crate) fn mark(&mut self, marker: &Marker) -> bool {
        let stored = &mut self.marks[marker.index()];
        if *stored == marker.value() {
            return false;
        }
        *stored = marker.value();
        true
    }

    pub(crate) fn is_marked(&self, marker: &Marker) -> bool {
        self.marks[marker.index()] == marker.value()
    }

    /// Returns `true` if the object was marked before.
    pub(crate) fn unmark(&mut self, marker: &Marker) -> bool {
        let stored = &mut self.marks[marker.index()];
        if *stored != marker.value() {
            return false;
        }
        *stored = CLEAN;
        true
    }

    pub(crate) fn set_number(&mut self, num: &Numeration, number: u32) -> Result<(), TagError> {
        if number == UNNUMBERED {
            return Err(TagError::NumberOutOfRange(number));
        }
        self.numbers[num.index()] = (num.value(), number);
        Ok(())
    }

    pub(crate) fn number(&self, num: &Numeration) -> Option<u32> {
        let (value, number) = self.numbers[num.index()];
        (value == num.value()).then_some(number)
    }

    pub(crate) fn unnumber(&mut self, num: &Numeration) -> Option<u32> {
        let previous = self.number(num);
        if previous.is_some() {
            self.numbers[num.index()] = (CLEAN, UNNUMBERED);
        }
        previous
    }

    pub(crate) fn sweep_marks(&mut self, live: &[Option<TagValue>; TAG_CAPACITY]) {
        for (stored, live) in self.marks.iter_mut().zip(live) {
            if Some(*stored) != *live {
                *stored = CLEAN;
            }
        }
    }

    pub(crate) fn sweep_numbers(&mut self, live: &[Option<TagValue>; TAG_CAPACITY]) {
        for (stored, live) in self.numbers.iter_mut().zip(live) {
            if Some(stored.0) != *live {
                *stored = (CLEAN, UNNUMBERED);
            }
        }
    }
}

/// Objects that carry a [`TagState`].
///
/// Every method first checks that the tag was issued by the object's graph: marking or numbering
/// through a foreign tag fails with [`TagError::ForeignTag`], and queries through one see nothing.
pub trait Tagged {
    /// Graph the object belongs to.
    fn owner(&self) -> GraphId;
    fn tags(&self) -> &TagState;
    fn tags_mut(&mut self) -> &mut TagState;

    /// Returns `true` if the object was not marked before.
    fn mark(&mut self, marker: &Marker) -> Result<bool, TagError> {
        check_owner(marker.owner(), self.owner())?;
        Ok(self.tags_mut().mark(marker))
    }

    fn is_marked(&self, marker: &Marker) -> bool {
        marker.owner() == self.owner() && self.tags().is_marked(marker)
    }

    /// Returns `true` if the object was marked before.
    fn unmark(&mut self, marker: &Marker) -> Result<bool, TagError> {
        check_owner(marker.owner(), self.owner())?;
        Ok(self.tags_mut().unmark(marker))
    }

    fn set_number(&mut self, num: &Numeration, number: u32) -> Result<(), TagError> {
        check_owner(num.owner(), self.owner())?;
        self.tags_mut().set_number(num, number)
    }

    fn number(&self, num: &Numeration) -> Option<u32> {
        if num.owner() != self.owner() {
            return None;
        }
        self.tags().number(num)
    }

    fn unnumber(&mut self, num: &Numeration) -> Result<Option<u32>, TagError> {
        check_owner(num.owner(), self.owner())?;
        Ok(self.tags_mut().unnumber(num))
    }
}

//! Generational slot pool backing node and edge storage.
//!
//! Every graph owns two pools (one for nodes, one for edges). A pool hands out [`Slot`]s that
//! stay valid until the value is destroyed; destroying bumps the slot generation so a stale slot
//! never resolves to a later occupant of the same index.

use crate::error::PoolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Slot {
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32, next_free: Option<u32> },
}

#[derive(Debug, Clone)]
pub struct Pool<T> {
    entries: Vec<Entry<T>>,
    free_head: Option<u32>,
    len: usize,
    limit: Option<usize>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T> Pool<T> {
    pub fn unbounded() -> Self {
        Self {
            entries: Vec::new(),
            free_head: None,
            len: 0,
            limit: None,
        }
    }

    /// A pool that refuses to hold more than `limit` live values at once.
    pub fn bounded(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::unbounded()
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn allocate(&mut self, value: T) -> Result<Slot, PoolError> {
        if let Some(limit) = self.limit {
            if self.len >= limit {
                return Err(PoolError::Exhausted { limit });
            }
        }

        if let Some(index) = self.free_head {
            let entry = &mut self.entries[index as usize];
            let Entry::Vacant {
                generation,
                next_free,
            } = *entry
            else {
                unreachable!("free list points at an occupied slot");
            };
            self.free_head = next_free;
            *entry = Entry::Occupied { generation, value };
            self.len += 1;
            return Ok(Slot { index, generation });
        }

        let index = u32::try_from(self.entries.len()).map_err(|_| PoolError::Exhausted {
            limit: u32::MAX as usize,
        })?;
        self.entries.push(Entry::Occupied {
            generation: 0,
            value,
        });
        self.len += 1;
        Ok(Slot {
            index,
            generation: 0,
        })
    }

    pub fn destroy(&mut self, slot: Slot) -> Option<T> {
        let entry = self.entries.get_mut(slot.index as usize)?;
        match entry {
            Entry::Occupied { generation, .. } if *generation == slot.generation => {}
            _ => return None,
        }
        let next_generation = slot.generation.wrapping_add(1);
        let old = std::mem::replace(
            entry,
            Entry::Vacant {
                generation: next_generation,
                next_free: self.free_head,
            },
        );
        self.free_head = Some(slot.index);
        self.len -= 1;
        match old {
            Entry::Occupied { value, .. } => Some(value),
            Entry::Vacant { .. } => None,
        }
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.get(slot).is_some()
    }

    pub fn get(&self, slot: Slot) -> Option<&T> {
        match self.entries.get(slot.index as usize)? {
            Entry::Occupied { generation, value } if *generation == slot.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        match self.entries.get_mut(slot.index as usize)? {
            Entry::Occupied { generation, value } if *generation == slot.generation => Some(value),
            _ => None,
        }
    }

    /// Live values in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &T)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry {
                Entry::Occupied { generation, value } => Some((
                    Slot {
                        index: index as u32,
                        generation: *generation,
                    },
                    value,
                )),
                Entry::Vacant { .. } => None,
            })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Slot, &mut T)> {
        self.entries
            .iter_mut()
            .enumerate()
            .filter_map(|(index, entry)| match entry {
                Entry::Occupied { generation, value } => Some((
                    Slot {
                        index: index as u32,
                        generation: *generation,
                    },
                    value,
                )),
                Entry::Vacant { .. } => None,
            })
    }

    /// First live slot strictly after `slot.index()`, or the first live slot when `after` is
    /// `None`.
    pub fn next_after(&self, after: Option<Slot>) -> Option<Slot> {
        let start = after.map(|s| s.index as usize + 1).unwrap_or(0);
        self.entries
            .iter()
            .enumerate()
            .skip(start)
            .find_map(|(index, entry)| match entry {
                Entry::Occupied { generation, .. } => Some(Slot {
                    index: index as u32,
                    generation: *generation,
                }),
                Entry::Vacant { .. } => None,
            })
    }

    pub fn clear(&mut self) {
        let slots: Vec<Slot> = self.iter().map(|(slot, _)| slot).collect();
        for slot in slots {
            self.destroy(slot);
        }
    }
}

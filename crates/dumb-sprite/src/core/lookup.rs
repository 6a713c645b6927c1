//! Fixed-capacity slot table mapping stable [`SpriteId`]s to dense indices.
//!
//! Every slot belongs to exactly one of two lists threaded through the same
//! array: the free list (singly linked, LIFO) and the used list (doubly
//! linked, newest first). Allocation and release are O(1).

use crate::api::types::SpriteId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Free {
        next: Option<u32>,
    },
    Used {
        /// Dense index of the instance this slot names.
        target: usize,
        previous: Option<u32>,
        next: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    // Outside of `slot` so it survives the Free/Used transitions.
    generation: u32,
    slot: Slot,
}

#[derive(Debug, Clone)]
pub struct LookupTable {
    entries: Vec<Entry>,
    /// Head of the free list.
    free: Option<u32>,
    /// Head of the used list (most recently allocated).
    used: Option<u32>,
    /// Tail of the used list (oldest live allocation).
    last: Option<u32>,
    len: usize,
}

impl LookupTable {
    pub fn new(capacity: usize) -> Self {
        let entries = (0..capacity)
            .map(|i| Entry {
                generation: 0,
                slot: Slot::Free {
                    next: if i + 1 < capacity { Some(i as u32 + 1) } else { None },
                },
            })
            .collect();

        Self {
            entries,
            free: if capacity > 0 { Some(0) } else { None },
            used: None,
            last: None,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of used slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Head of the used list.
    pub fn head(&self) -> Option<SpriteId> {
        self.used.map(|i| self.id_at(i))
    }

    /// Tail of the used list.
    pub fn last(&self) -> Option<SpriteId> {
        self.last.map(|i| self.id_at(i))
    }

    /// Take a free slot pointing at `target` and push it at the head of the
    /// used list. Returns `None` when every slot is in use.
    pub fn allocate(&mut self, target: usize) -> Option<SpriteId> {
        let index = self.free?;
        let entry = &mut self.entries[index as usize];
        let Slot::Free { next: next_free } = entry.slot else {
            // Free list corrupted; leave the table untouched.
            log::error!("lookup slot {} on the free list is in use", index);
            return None;
        };

        self.free = next_free;
        entry.slot = Slot::Used {
            target,
            previous: None,
            next: self.used,
        };
        let id = SpriteId::new(index, entry.generation);

        match self.used {
            Some(head) => self.set_previous(head, Some(index)),
            None => self.last = Some(index),
        }
        self.used = Some(index);
        self.len += 1;
        Some(id)
    }

    /// Unlink `id` from the used list and push its slot on the free list.
    /// Returns the dense index it pointed at, or `None` if `id` is stale.
    pub fn release(&mut self, id: SpriteId) -> Option<usize> {
        let (target, previous, next) = match self.entry(id)?.slot {
            Slot::Used { target, previous, next } => (target, previous, next),
            Slot::Free { .. } => return None,
        };

        match previous {
            Some(p) => self.set_next(p, next),
            None => self.used = next,
        }
        match next {
            Some(n) => self.set_previous(n, previous),
            None => self.last = previous,
        }

        let entry = &mut self.entries[id.index as usize];
        entry.slot = Slot::Free { next: self.free };
        entry.generation = entry.generation.wrapping_add(1);
        self.free = Some(id.index);
        self.len -= 1;
        Some(target)
    }

    /// Dense index `id` currently points at.
    pub fn target(&self, id: SpriteId) -> Option<usize> {
        match self.entry(id)?.slot {
            Slot::Used { target, .. } => Some(target),
            Slot::Free { .. } => None,
        }
    }

    pub fn contains(&self, id: SpriteId) -> bool {
        self.target(id).is_some()
    }

    /// Repoint a used slot at a new dense index. Ignored for free slots.
    pub fn retarget(&mut self, slot: u32, new_target: usize) {
        if let Some(Entry {
            slot: Slot::Used { target, .. },
            ..
        }) = self.entries.get_mut(slot as usize)
        {
            *target = new_target;
        }
    }

    /// Live handle for a used slot, regardless of generation.
    pub fn id_of_slot(&self, slot: u32) -> Option<SpriteId> {
        let entry = self.entries.get(slot as usize)?;
        match entry.slot {
            Slot::Used { .. } => Some(SpriteId::new(slot, entry.generation)),
            Slot::Free { .. } => None,
        }
    }

    /// Walk the used list from head to tail.
    pub fn ids(&self) -> impl Iterator<Item = SpriteId> + '_ {
        let mut cursor = self.used;
        std::iter::from_fn(move || {
            let index = cursor?;
            cursor = match self.entries[index as usize].slot {
                Slot::Used { next, .. } => next,
                Slot::Free { .. } => None,
            };
            Some(self.id_at(index))
        })
    }

    /// Walk the free list from head to tail.
    pub fn free_slots(&self) -> impl Iterator<Item = u32> + '_ {
        let mut cursor = self.free;
        std::iter::from_fn(move || {
            let index = cursor?;
            cursor = match self.entries[index as usize].slot {
                Slot::Free { next } => next,
                Slot::Used { .. } => None,
            };
            Some(index)
        })
    }

    fn entry(&self, id: SpriteId) -> Option<&Entry> {
        self.entries
            .get(id.index as usize)
            .filter(|e| e.generation == id.generation)
    }

    fn id_at(&self, index: u32) -> SpriteId {
        SpriteId::new(index, self.entries[index as usize].generation)
    }

    fn set_previous(&mut self, index: u32, value: Option<u32>) {
        if let Slot::Used { previous, .. } = &mut self.entries[index as usize].slot {
            *previous = value;
        }
    }

    fn set_next(&mut self, index: u32, value: Option<u32>) {
        if let Slot::Used { next, .. } = &mut self.entries[index as usize].slot {
            *next = value;
        }
    }
}

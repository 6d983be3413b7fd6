//! Free-list recycling of fixed-size records.
//!
//! [`Recycler`] hands out slots from a [`TypedSlab`] and threads freed
//! slots onto an intrusive free list: the link to the next free slot is
//! stored in the freed slot itself. Freed slots are reused before the slab
//! is asked for new ones. When the last live record is freed the whole
//! slab is released (unless the config retains it).

use std::mem;

use tracing::{debug, warn};

use crate::arena::Arena;
use crate::config::ArenaConfig;
use crate::slab::{SlotId, TypedSlab};

/// One recycler slot.
///
/// A slot is either holding a live record or linked into the free list.
/// The two states never overlap, so the link can share the record's space.
#[derive(Debug)]
pub enum Slot<T> {
    /// On the free list, pointing at the next free slot.
    Free {
        /// Next free slot, or `None` at the tail.
        next: Option<SlotId>,
    },
    /// Holding a live record.
    Occupied(T),
}

/// Free-list allocator for records of type `T`.
///
/// The recycler is the only allocator of record for its slab: every slot
/// in the slab is either live (handed out by [`alloc`](Self::alloc)) or on
/// the free list.
pub struct Recycler<T> {
    slab: TypedSlab<Slot<T>>,
    free_head: Option<SlotId>,
    live_count: usize,
    free_count: usize,
    collapse_when_empty: bool,
}

impl<T> Recycler<T> {
    /// Create an empty recycler.
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            slab: TypedSlab::new(config),
            free_head: None,
            live_count: 0,
            free_count: 0,
            collapse_when_empty: config.collapse_when_empty,
        }
    }

    /// Store `value`, reusing the most recently freed slot if there is one.
    pub fn alloc(&mut self, value: T) -> SlotId {
        self.live_count += 1;
        if let Some(head) = self.free_head {
            if let Some(slot) = self.slab.get_mut(head) {
                if let Slot::Free { next } = *slot {
                    self.free_head = next;
                    self.free_count -= 1;
                    *slot = Slot::Occupied(value);
                    return head;
                }
            }
            unreachable!("free list head {head} does not name a free slot");
        }
        self.slab.alloc(Slot::Occupied(value))
    }

    /// Return `id` to the free list and hand back its record.
    ///
    /// Freeing a stale or already-free id is a caller bug; it is logged and
    /// ignored, leaving the free list intact.
    pub fn free(&mut self, id: SlotId) -> Option<T> {
        let Some(slot) = self.slab.get_mut(id) else {
            warn!(slot = %id, "free of a slot this recycler does not own");
            return None;
        };
        let previous = mem::replace(slot, Slot::Free { next: self.free_head });
        let value = match previous {
            Slot::Occupied(value) => value,
            free @ Slot::Free { .. } => {
                *slot = free;
                warn!(slot = %id, "double free of recycler slot");
                return None;
            }
        };
        self.free_head = Some(id);
        self.live_count -= 1;
        self.free_count += 1;

        if self.live_count == 0 && self.collapse_when_empty {
            self.collapse();
        }
        Some(value)
    }

    /// Live record in `id`.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slab.get(id)? {
            Slot::Occupied(value) => Some(value),
            Slot::Free { .. } => None,
        }
    }

    /// Mutable live record in `id`.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slab.get_mut(id)? {
            Slot::Occupied(value) => Some(value),
            Slot::Free { .. } => None,
        }
    }

    /// Number of live records.
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Number of slots waiting on the free list.
    pub fn free_count(&self) -> usize {
        self.free_count
    }

    /// Bytes reserved per slot, large enough for a record or a free link.
    pub fn element_size(&self) -> usize {
        self.slab.stride()
    }

    /// The arena backing the slots.
    pub fn arena(&self) -> &Arena {
        self.slab.arena()
    }

    /// Number of blocks currently held.
    pub fn block_count(&self) -> usize {
        self.slab.block_count()
    }

    /// Blocks created since construction, including released ones.
    pub fn blocks_created(&self) -> u64 {
        self.slab.blocks_created()
    }

    fn collapse(&mut self) {
        debug!(
            blocks = self.slab.block_count(),
            slots = self.free_count,
            "recycler drained, releasing blocks"
        );
        self.slab.clear();
        self.free_head = None;
        self.free_count = 0;
    }
}

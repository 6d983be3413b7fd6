//! Typed view over the byte arena for fixed-size records.
//!
//! [`TypedSlab`] places one `T` per slot. Every slot is carved out of an
//! [`Arena`] with a `stride`-byte allocation (`size_of::<T>()` rounded up
//! to 4), so slab growth, cursor alignment and block release are the
//! arena's own. The records themselves sit in a per-block table indexed by
//! the arena offset divided by the stride.

use std::fmt;
use std::mem;

use crate::arena::Arena;
use crate::config::{align_up, ArenaConfig};

/// Location of one record inside a [`TypedSlab`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId {
    pub(crate) epoch: u32,
    pub(crate) block: u32,
    pub(crate) index: u32,
}

impl SlotId {
    /// The slab epoch this slot was issued in.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Index of the block holding the slot.
    pub fn block(&self) -> u32 {
        self.block
    }

    /// Slot index within its block.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Whether two ids name the same storage position, ignoring epoch.
    pub fn same_position(&self, other: &SlotId) -> bool {
        self.block == other.block && self.index == other.index
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SlotId(epoch={}, block={}, index={})",
            self.epoch, self.block, self.index
        )
    }
}

/// Fixed-size record allocator layered on an [`Arena`].
///
/// Records are never released individually. [`clear`](Self::clear) drops
/// every record and frees the arena's blocks; ids issued before it resolve
/// to `None`.
pub struct TypedSlab<T> {
    arena: Arena,
    /// Records per arena block, in slot order.
    records: Vec<Vec<T>>,
    stride: usize,
}

impl<T> TypedSlab<T> {
    /// Create an empty slab using `config`'s block size.
    ///
    /// # Panics
    ///
    /// Panics if a single record does not fit in one block.
    pub fn new(config: &ArenaConfig) -> Self {
        let stride = Self::slot_stride();
        assert!(
            stride <= config.block_size,
            "slot of {stride} bytes exceeds block size {}",
            config.block_size,
        );
        Self {
            arena: Arena::new(config.clone()),
            records: Vec::new(),
            stride,
        }
    }

    /// Bytes reserved per record: `size_of::<T>()` rounded up to 4, at least 4.
    pub fn slot_stride() -> usize {
        align_up(mem::size_of::<T>()).max(ArenaConfig::ALIGN)
    }

    /// Place `value` in a fresh slot taken from the arena.
    pub fn alloc(&mut self, value: T) -> SlotId {
        let range = self.arena.alloc(self.stride);
        let block = range.block() as usize;
        if block == self.records.len() {
            let per_block = self.slots_per_block();
            self.records.push(Vec::with_capacity(per_block));
        }
        let index = range.offset() as usize / self.stride;
        let records = &mut self.records[block];
        debug_assert_eq!(index, records.len(), "slot table out of step with arena");
        records.push(value);
        SlotId {
            epoch: range.epoch(),
            block: range.block(),
            index: index as u32,
        }
    }

    /// The record in `id`, or `None` if the id is stale or unknown.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        if id.epoch != self.arena.epoch() {
            return None;
        }
        self.records.get(id.block as usize)?.get(id.index as usize)
    }

    /// Mutable record in `id`, or `None` if the id is stale or unknown.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        if id.epoch != self.arena.epoch() {
            return None;
        }
        self.records
            .get_mut(id.block as usize)?
            .get_mut(id.index as usize)
    }

    /// Drop every record and free the arena's blocks.
    pub fn clear(&mut self) {
        self.records = Vec::new();
        self.arena.free_blocks();
    }

    /// Number of slots handed out since the last clear.
    pub fn len(&self) -> usize {
        self.arena.used_bytes() / self.stride
    }

    /// Whether no slot has been handed out since the last clear.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slots per block.
    pub fn slots_per_block(&self) -> usize {
        self.arena.config().block_size / self.stride
    }

    /// Bytes reserved per slot.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The arena the slots are carved from.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Number of blocks currently held.
    pub fn block_count(&self) -> usize {
        self.arena.block_count()
    }

    /// Blocks created since construction, including released ones.
    pub fn blocks_created(&self) -> u64 {
        self.arena.blocks_created()
    }

    /// Current release epoch.
    pub fn epoch(&self) -> u32 {
        self.arena.epoch()
    }
}

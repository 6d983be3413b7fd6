//! Fixed-size blocks and the newest-first chain that owns them.
//!
//! A [`Block`] is a pre-sized `Vec<U>` filled front to back. A
//! [`BlockChain`] is a growable list of blocks where only the newest block
//! (the head) accepts allocations; older blocks are full or abandoned.
//! Blocks are never freed one at a time, only the whole chain at once.

use tracing::{debug, trace};

/// A single fixed-capacity block with bump allocation.
///
/// The backing `Vec` is allocated to full capacity at creation and never
/// reallocates, so data already placed in the block never moves.
pub struct Block<U> {
    /// Backing storage. `data.len()` is the bump cursor.
    data: Vec<U>,
    /// Fixed capacity in units.
    capacity: usize,
}

impl<U> Block<U> {
    /// Create an empty block holding up to `capacity` units.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Bump the cursor by `len` default-initialised units.
    ///
    /// Returns the starting unit index, or `None` if `len` does not fit.
    pub fn try_extend(&mut self, len: usize) -> Option<usize>
    where
        U: Default + Clone,
    {
        let start = self.data.len();
        let end = start.checked_add(len)?;
        if end > self.capacity {
            return None;
        }
        self.data.resize(end, U::default());
        Some(start)
    }

    /// Allocated units `start..start + len`, if in range.
    pub fn slice(&self, start: usize, len: usize) -> Option<&[U]> {
        self.data.get(start..start.checked_add(len)?)
    }

    /// Mutable allocated units `start..start + len`, if in range.
    pub fn slice_mut(&mut self, start: usize, len: usize) -> Option<&mut [U]> {
        self.data.get_mut(start..start.checked_add(len)?)
    }

    /// Number of units allocated so far.
    pub fn used(&self) -> usize {
        self.data.len()
    }

    /// Total capacity in units.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remaining free capacity in units.
    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }
}

/// A newest-first chain of [`Block`]s.
///
/// The head (the most recently created block) is the only one that accepts
/// allocations. When it cannot satisfy a request a new block is created and
/// becomes the head; the space left in the old head is abandoned. Blocks
/// are addressed by creation index so handles stay small.
///
/// [`free_blocks`](Self::free_blocks) drops every block and advances the
/// epoch, which lets handle types detect that they outlived their memory.
/// The epoch never wraps: a chain released `u32::MAX` times panics rather
/// than letting a handle from epoch 0 validate again.
pub struct BlockChain<U> {
    blocks: Vec<Block<U>>,
    block_len: usize,
    epoch: u32,
    /// Total blocks ever created, across releases.
    blocks_created: u64,
}

impl<U> BlockChain<U> {
    /// Create an empty chain whose blocks hold `block_len` units each.
    ///
    /// No block is allocated until the first allocation.
    pub fn new(block_len: usize) -> Self {
        Self {
            blocks: Vec::new(),
            block_len,
            epoch: 0,
            blocks_created: 0,
        }
    }

    /// The block currently accepting allocations, with its index.
    pub fn head_mut(&mut self) -> Option<(usize, &mut Block<U>)> {
        let index = self.blocks.len().checked_sub(1)?;
        Some((index, &mut self.blocks[index]))
    }

    /// Link a fresh empty block as the new head and return it.
    pub fn grow(&mut self) -> (usize, &mut Block<U>) {
        self.blocks.push(Block::new(self.block_len));
        self.blocks_created += 1;
        let index = self.blocks.len() - 1;
        trace!(
            block = index,
            block_len = self.block_len,
            epoch = self.epoch,
            "linked new arena block"
        );
        (index, &mut self.blocks[index])
    }

    /// Block by creation index.
    pub fn block(&self, index: usize) -> Option<&Block<U>> {
        self.blocks.get(index)
    }

    /// Mutable block by creation index.
    pub fn block_mut(&mut self, index: usize) -> Option<&mut Block<U>> {
        self.blocks.get_mut(index)
    }

    /// Release every block and advance the epoch.
    ///
    /// # Panics
    ///
    /// Panics if the epoch counter is exhausted.
    pub fn free_blocks(&mut self) {
        if !self.blocks.is_empty() {
            debug!(
                blocks = self.blocks.len(),
                epoch = self.epoch,
                "releasing arena blocks"
            );
        }
        self.blocks = Vec::new();
        self.epoch = self
            .epoch
            .checked_add(1)
            .unwrap_or_else(|| panic!("arena epoch exhausted after {} releases", u32::MAX));
    }

    /// Units per block.
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Current release epoch.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Number of blocks currently held.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of blocks created since construction, including released ones.
    pub fn blocks_created(&self) -> u64 {
        self.blocks_created
    }

    /// Total allocated units across all blocks.
    pub fn used_units(&self) -> usize {
        self.blocks.iter().map(Block::used).sum()
    }

    /// Total capacity in units across all blocks.
    pub fn capacity_units(&self) -> usize {
        self.blocks.len() * self.block_len
    }
}

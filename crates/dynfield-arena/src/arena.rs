//! Raw byte arena with 4-byte aligned bump allocation.
//!
//! [`Arena`] hands out byte ranges from fixed-size blocks. Each block is
//! backed by `u32` words, so every range is 4-byte aligned in memory, and
//! every allocation advances the cursor by its size rounded up to 4.

use std::fmt;

use crate::block::BlockChain;
use crate::config::{align_up, check_block_size, ArenaConfig};
use crate::error::ArenaError;

/// Location of a byte range inside an [`Arena`].
///
/// Ranges are plain values: they do not borrow the arena. Resolving one
/// after [`Arena::free_blocks`] yields [`ArenaError::StaleRange`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArenaRange {
    /// Arena epoch when this range was issued.
    pub(crate) epoch: u32,
    /// Index of the block holding the range.
    pub(crate) block: u32,
    /// Byte offset within the block (always a multiple of 4).
    pub(crate) offset: u32,
    /// Requested length in bytes.
    pub(crate) len: u32,
}

impl ArenaRange {
    /// The epoch this range belongs to.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Index of the block holding the range.
    pub fn block(&self) -> u32 {
        self.block
    }

    /// Byte offset within the block.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Requested length in bytes.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether this is a zero-length range.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for ArenaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArenaRange(epoch={}, block={}, off={}, len={})",
            self.epoch, self.block, self.offset, self.len
        )
    }
}

/// Bump allocator over a chain of fixed-size byte blocks.
///
/// Individual allocations are never reclaimed. When the head block cannot
/// fit a request, a new block becomes the head and the tail of the old one
/// is abandoned. An allocation never spans two blocks.
pub struct Arena {
    chain: BlockChain<u32>,
    config: ArenaConfig,
}

impl Arena {
    /// Create an empty arena. No block is allocated until first use.
    ///
    /// # Panics
    ///
    /// Panics if `config.block_size` was set to a value
    /// [`ArenaConfig::new`] would reject.
    pub fn new(config: ArenaConfig) -> Self {
        check_block_size(config.block_size);
        Self {
            chain: BlockChain::new(config.block_words()),
            config,
        }
    }

    /// Bump-allocate `size` zeroed bytes.
    ///
    /// # Panics
    ///
    /// Panics if `size` exceeds the configured block size. An oversized
    /// request is a caller bug, not a runtime condition.
    pub fn alloc(&mut self, size: usize) -> ArenaRange {
        assert!(
            size <= self.config.block_size,
            "arena allocation of {size} bytes exceeds block size {}",
            self.config.block_size,
        );
        let words = align_up(size) / ArenaConfig::ALIGN;
        let epoch = self.chain.epoch();

        let placed = self
            .chain
            .head_mut()
            .and_then(|(index, block)| block.try_extend(words).map(|start| (index, start)));
        let (block, start) = match placed {
            Some(placed) => placed,
            None => {
                let (index, block) = self.chain.grow();
                // words <= block_words is guaranteed by the size check above.
                let start = block
                    .try_extend(words)
                    .expect("size <= block_size, so a fresh block always fits");
                (index, start)
            }
        };

        ArenaRange {
            epoch,
            block: block as u32,
            offset: (start * ArenaConfig::ALIGN) as u32,
            len: size as u32,
        }
    }

    /// Bytes of a previously allocated range.
    pub fn bytes(&self, range: ArenaRange) -> Result<&[u8], ArenaError> {
        self.check_epoch(range)?;
        let words = self
            .chain
            .block(range.block as usize)
            .and_then(|b| b.slice(Self::word_start(range), Self::word_len(range)))
            .ok_or(ArenaError::InvalidRange {
                block: range.block,
                offset: range.offset,
                len: range.len,
            })?;
        Ok(&bytemuck::cast_slice::<u32, u8>(words)[..range.len as usize])
    }

    /// Mutable bytes of a previously allocated range.
    pub fn bytes_mut(&mut self, range: ArenaRange) -> Result<&mut [u8], ArenaError> {
        self.check_epoch(range)?;
        let words = self
            .chain
            .block_mut(range.block as usize)
            .and_then(|b| b.slice_mut(Self::word_start(range), Self::word_len(range)))
            .ok_or(ArenaError::InvalidRange {
                block: range.block,
                offset: range.offset,
                len: range.len,
            })?;
        Ok(&mut bytemuck::cast_slice_mut::<u32, u8>(words)[..range.len as usize])
    }

    /// Release every block. All previously issued ranges become stale.
    pub fn free_blocks(&mut self) {
        self.chain.free_blocks();
    }

    /// The configuration this arena was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Current release epoch.
    pub fn epoch(&self) -> u32 {
        self.chain.epoch()
    }

    /// Number of blocks currently held.
    pub fn block_count(&self) -> usize {
        self.chain.block_count()
    }

    /// Blocks created since construction, including released ones.
    pub fn blocks_created(&self) -> u64 {
        self.chain.blocks_created()
    }

    /// Bytes handed out so far, including alignment padding.
    pub fn used_bytes(&self) -> usize {
        self.chain.used_units() * ArenaConfig::ALIGN
    }

    /// Memory held by all blocks in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.chain.capacity_units() * ArenaConfig::ALIGN
    }

    fn check_epoch(&self, range: ArenaRange) -> Result<(), ArenaError> {
        if range.epoch != self.chain.epoch() {
            return Err(ArenaError::StaleRange {
                range_epoch: range.epoch,
                current_epoch: self.chain.epoch(),
            });
        }
        Ok(())
    }

    fn word_start(range: ArenaRange) -> usize {
        range.offset as usize / ArenaConfig::ALIGN
    }

    fn word_len(range: ArenaRange) -> usize {
        align_up(range.len as usize) / ArenaConfig::ALIGN
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ArenaConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small_arena() -> Arena {
        Arena::new(ArenaConfig::new(64))
    }

    #[test]
    fn first_alloc_creates_block() {
        let mut arena = small_arena();
        assert_eq!(arena.block_count(), 0);
        let r = arena.alloc(10);
        assert_eq!(arena.block_count(), 1);
        assert_eq!(r.block(), 0);
        assert_eq!(r.offset(), 0);
        assert_eq!(r.len(), 10);
    }

    #[test]
    fn cursor_advances_by_aligned_size() {
        let mut arena = small_arena();
        let a = arena.alloc(5);
        let b = arena.alloc(3);
        let c = arena.alloc(8);
        assert_eq!(a.offset(), 0);
        assert_eq!(b.offset(), 8);
        assert_eq!(c.offset(), 12);
        assert_eq!(arena.used_bytes(), 20);
    }

    #[test]
    fn returned_memory_is_word_aligned() {
        let mut arena = small_arena();
        arena.alloc(1);
        let r = arena.alloc(6);
        let bytes = arena.bytes(r).unwrap();
        assert_eq!(bytes.as_ptr() as usize % 4, 0);
        assert_eq!(bytes.len(), 6);
    }

    #[test]
    fn overflow_links_new_head() {
        let mut arena = small_arena();
        arena.alloc(60);
        let r = arena.alloc(8);
        assert_eq!(arena.block_count(), 2);
        assert_eq!(r.block(), 1);
        assert_eq!(r.offset(), 0);
        assert_eq!(arena.memory_bytes(), 128);
    }

    #[test]
    fn exactly_block_size_alloc_succeeds() {
        let mut arena = small_arena();
        let r = arena.alloc(64);
        assert_eq!(arena.bytes(r).unwrap().len(), 64);
    }

    #[test]
    #[should_panic(expected = "exceeds block size")]
    fn oversized_alloc_panics() {
        let mut arena = small_arena();
        arena.alloc(65);
    }

    #[test]
    #[should_panic(expected = "multiple of 4")]
    fn hand_built_config_is_validated() {
        Arena::new(ArenaConfig {
            block_size: 10,
            collapse_when_empty: true,
        });
    }

    #[test]
    fn zero_alloc_is_valid() {
        let mut arena = small_arena();
        arena.alloc(4);
        let r = arena.alloc(0);
        assert!(r.is_empty());
        assert!(arena.bytes(r).unwrap().is_empty());
        assert_eq!(arena.used_bytes(), 4);
    }

    #[test]
    fn writes_are_isolated_between_ranges() {
        let mut arena = small_arena();
        let a = arena.alloc(4);
        let b = arena.alloc(4);
        arena.bytes_mut(a).unwrap().copy_from_slice(b"abcd");
        arena.bytes_mut(b).unwrap().copy_from_slice(b"wxyz");
        assert_eq!(arena.bytes(a).unwrap(), b"abcd");
        assert_eq!(arena.bytes(b).unwrap(), b"wxyz");
    }

    #[test]
    fn fresh_ranges_are_zeroed() {
        let mut arena = small_arena();
        let r = arena.alloc(12);
        assert!(arena.bytes(r).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn free_blocks_makes_ranges_stale() {
        let mut arena = small_arena();
        let r = arena.alloc(8);
        arena.free_blocks();
        assert_eq!(arena.block_count(), 0);
        assert_eq!(
            arena.bytes(r),
            Err(ArenaError::StaleRange {
                range_epoch: 0,
                current_epoch: 1,
            })
        );
    }

    #[test]
    fn stale_range_does_not_alias_new_allocation() {
        let mut arena = small_arena();
        let old = arena.alloc(4);
        arena.free_blocks();
        let new = arena.alloc(4);
        arena.bytes_mut(new).unwrap().copy_from_slice(b"live");
        assert!(arena.bytes_mut(old).is_err());
        assert_eq!(arena.bytes(new).unwrap(), b"live");
    }

    #[test]
    fn foreign_range_is_invalid() {
        let mut big = Arena::new(ArenaConfig::new(64));
        big.alloc(64);
        let foreign = big.alloc(64);
        let mut arena = small_arena();
        arena.alloc(4);
        assert!(matches!(
            arena.bytes(foreign),
            Err(ArenaError::InvalidRange { block: 1, .. })
        ));
    }

    proptest! {
        #[test]
        fn live_ranges_never_overlap(sizes in proptest::collection::vec(0usize..=64, 1..64)) {
            let mut arena = small_arena();
            let ranges: Vec<ArenaRange> = sizes.iter().map(|&s| arena.alloc(s)).collect();
            for (i, a) in ranges.iter().enumerate() {
                prop_assert_eq!(a.offset() % 4, 0);
                for b in &ranges[i + 1..] {
                    if a.block() != b.block() || a.is_empty() || b.is_empty() {
                        continue;
                    }
                    let a_end = a.offset() + a.len();
                    let b_end = b.offset() + b.len();
                    prop_assert!(a_end <= b.offset() || b_end <= a.offset());
                }
            }
        }
    }
}

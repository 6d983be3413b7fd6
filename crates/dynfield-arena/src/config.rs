//! Arena configuration parameters.

/// Configuration shared by every arena view.
///
/// Validated at construction; all values are immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of each block in bytes.
    ///
    /// Default: 16_376. Must be a non-zero multiple of [`ArenaConfig::ALIGN`].
    /// A single allocation can never exceed this.
    pub block_size: usize,

    /// Release every block once a [`Recycler`](crate::Recycler) has no live
    /// records left.
    ///
    /// Default: `true`. Bounds retained memory at the cost of re-growing a
    /// block when allocation resumes.
    pub collapse_when_empty: bool,
}

impl ArenaConfig {
    /// Default block size in bytes.
    pub const DEFAULT_BLOCK_SIZE: usize = 16_376;

    /// Alignment, in bytes, of every range handed out by the byte arena.
    pub const ALIGN: usize = 4;

    /// Create a config with the given block size.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero, not a multiple of [`Self::ALIGN`],
    /// or larger than `u32::MAX` (handles store offsets as `u32`).
    pub fn new(block_size: usize) -> Self {
        check_block_size(block_size);
        Self {
            block_size,
            collapse_when_empty: true,
        }
    }

    /// Keep blocks alive when a recycler drains to zero live records.
    pub fn retain_when_empty(mut self) -> Self {
        self.collapse_when_empty = false;
        self
    }

    /// Block size in 4-byte words.
    pub fn block_words(&self) -> usize {
        self.block_size / Self::ALIGN
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BLOCK_SIZE)
    }
}

/// Panic unless `block_size` is usable as an arena block size.
pub(crate) fn check_block_size(block_size: usize) {
    assert!(
        block_size >= ArenaConfig::ALIGN && block_size % ArenaConfig::ALIGN == 0,
        "block size {block_size} must be a non-zero multiple of {}",
        ArenaConfig::ALIGN,
    );
    assert!(
        u32::try_from(block_size).is_ok(),
        "block size {block_size} does not fit in a u32 offset",
    );
}

/// Round `size` up to the next multiple of [`ArenaConfig::ALIGN`].
pub(crate) fn align_up(size: usize) -> usize {
    size.div_ceil(ArenaConfig::ALIGN) * ArenaConfig::ALIGN
}

//! Arena-specific error types.

use thiserror::Error;

/// Errors from resolving an arena handle.
///
/// Oversized allocations are not represented here: requesting more than a
/// block can hold is a programming error and panics.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// The handle was issued before the arena last released its blocks.
    #[error("stale range: issued in epoch {range_epoch}, arena is at epoch {current_epoch}")]
    StaleRange {
        /// The epoch encoded in the handle.
        range_epoch: u32,
        /// The arena's current epoch.
        current_epoch: u32,
    },
    /// The handle does not describe memory inside this arena.
    #[error("range {offset}+{len} in block {block} is outside the arena")]
    InvalidRange {
        /// Block index encoded in the handle.
        block: u32,
        /// Byte offset within the block.
        offset: u32,
        /// Length in bytes.
        len: u32,
    },
}

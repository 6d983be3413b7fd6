//! Chunked arena allocation for dynfield property stores.
//!
//! Memory is carved out of fixed-size blocks by bumping a cursor. Nothing
//! is ever released individually: a whole chain of blocks is dropped at
//! once. Fixed-size records are recycled through a free list layered on
//! top of the typed view.
//!
//! # Architecture
//!
//! ```text
//! Recycler<T> (free list + live count, collapses when empty)
//! └── TypedSlab<Slot<T>> (typed view, one stride-sized arena range per slot)
//!     └── Arena (raw bytes, 4-byte aligned ranges)
//!         └── BlockChain<u32> (newest-first list of fixed-size blocks)
//! ```
//!
//! Every slot a recycler hands out was first bump-allocated from the
//! arena, and collapsing a recycler frees the arena's blocks.
//!
//! # Handles, not pointers
//!
//! Allocations are addressed by small `Copy` handles ([`ArenaRange`],
//! [`SlotId`]) carrying the chain epoch they were issued in. Releasing the
//! blocks bumps the epoch, so a handle that outlives its memory resolves
//! to an error or `None` instead of dangling.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod block;
pub mod config;
pub mod error;
pub mod recycler;
pub mod slab;

// Public re-exports for the primary API surface.
pub use arena::{Arena, ArenaRange};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use recycler::Recycler;
pub use slab::{SlotId, TypedSlab};

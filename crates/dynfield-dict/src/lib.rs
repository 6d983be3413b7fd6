//! Dynamic property stores for runtime objects.
//!
//! A [`PropertyStore`] gives an object an open-ended set of string-valued
//! fields keyed by interned [`Symbol`](dynfield_core::Symbol)s. Entries for
//! every store are drawn from one [`EntryPool`], a free-list recycler, so
//! adding and removing fields does not hit the global allocator for the
//! entry records themselves.
//!
//! ```text
//! PropertyStore ×N ──SharedEntryPool──▶ EntryPool
//!                                      └── Recycler<Entry>
//!                                          └── TypedSlab → Arena
//! ```
//!
//! Each store is a fixed 19-bucket hash table keyed by symbol index. A
//! version counter advances on every insert and delete so that observers
//! can cheaply tell whether the key set changed. Serialization gathers the
//! entries, sorts them by key text, and writes `key = "value";` lines.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod escape;
pub mod iter;
pub mod pool;
pub mod serialize;
pub mod store;

pub use escape::expand_escape;
pub use iter::{FieldCursor, FieldRef, Keys};
pub use pool::{Entry, EntryPool, SharedEntryPool};
pub use serialize::{LineEnding, WriteOptions};
pub use store::{PropertyStore, HASH_TABLE_SIZE};

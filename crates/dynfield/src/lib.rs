//! dynfield: arena-backed dynamic property dictionaries.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all dynfield sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use dynfield::prelude::*;
//!
//! let mut table = StringTable::new();
//! let pool = EntryPool::shared(&ArenaConfig::default());
//! let mut store = PropertyStore::new(pool);
//!
//! let color = table.insert("color");
//! store.set_field_value(color, "red");
//! assert_eq!(store.get_field_value(color).as_deref(), Some("red"));
//! assert_eq!(store.version(), 1);
//!
//! // Value-only updates leave the version alone.
//! store.set_field_value(color, "blue");
//! assert_eq!(store.version(), 1);
//!
//! // An empty value deletes.
//! store.set_field_value(color, "");
//! assert!(store.get_field_value(color).is_none());
//! assert_eq!(store.version(), 2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `dynfield-core` | `Symbol`, `StringTable`, `StaticFields` |
//! | [`arena`] | `dynfield-arena` | Byte arena, typed slab, free-list recycler |
//! | [`dict`] | `dynfield-dict` | Property stores, cursors, serialization |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Interned keys and reflection traits (`dynfield-core`).
pub use dynfield_core as types;

/// Chunked arena allocation (`dynfield-arena`).
///
/// [`arena::Arena`] for raw bytes, [`arena::TypedSlab`] for fixed-size
/// records, [`arena::Recycler`] for free-list reuse.
pub use dynfield_arena as arena;

/// Dynamic property stores (`dynfield-dict`).
pub use dynfield_dict as dict;

/// Common imports for typical dynfield usage.
///
/// ```rust
/// use dynfield::prelude::*;
/// ```
pub mod prelude {
    pub use dynfield_arena::ArenaConfig;
    pub use dynfield_core::{StaticFields, StringTable, Symbol};
    pub use dynfield_dict::{EntryPool, LineEnding, PropertyStore, SharedEntryPool, WriteOptions};
}

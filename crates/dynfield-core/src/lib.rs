//! Core types and traits for the dynfield workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! key type used by every property store ([`Symbol`]), the interning table
//! that produces those keys ([`StringTable`]), and the reflection hook that
//! serialization consults to skip statically declared fields
//! ([`StaticFields`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod intern;
pub mod reflect;

pub use id::Symbol;
pub use intern::StringTable;
pub use reflect::StaticFields;

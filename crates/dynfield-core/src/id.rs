//! Strongly-typed key identifiers.

use std::fmt;

/// An interned key.
///
/// A `Symbol` is the index of a string inside a [`StringTable`](crate::StringTable).
/// Equality and hashing are structural on the index, so two symbols compare
/// equal exactly when they were produced for the same text by the same table.
/// The text itself is never consulted on the lookup path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub u32);

impl Symbol {
    /// The raw table index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Symbol {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

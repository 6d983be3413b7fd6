//! String interning table.
//!
//! [`StringTable`] maps key text to a stable [`Symbol`]. Every property store
//! compares keys by symbol, so all keys used with a given set of stores must
//! come from one table.

use indexmap::IndexSet;

use crate::id::Symbol;

/// Interning table producing [`Symbol`]s.
///
/// Symbols are dense indices assigned in insertion order and are never
/// invalidated: the table only grows.
#[derive(Clone, Debug, Default)]
pub struct StringTable {
    strings: IndexSet<Box<str>>,
}

impl StringTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            strings: IndexSet::new(),
        }
    }

    /// Intern `text`, returning the existing symbol if it is already present.
    ///
    /// # Panics
    ///
    /// Panics if the table already holds `u32::MAX` strings.
    pub fn insert(&mut self, text: &str) -> Symbol {
        if let Some(index) = self.strings.get_index_of(text) {
            return Symbol(index as u32);
        }
        let index = self.strings.len();
        assert!(index < u32::MAX as usize, "string table exhausted");
        self.strings.insert(Box::from(text));
        Symbol(index as u32)
    }

    /// Intern `text` with ASCII case folded, so `"Color"` and `"color"`
    /// share one symbol.
    ///
    /// The folded spelling is what [`resolve`](Self::resolve) returns.
    pub fn insert_case_insensitive(&mut self, text: &str) -> Symbol {
        self.insert(&text.to_ascii_lowercase())
    }

    /// Find the symbol for `text` without interning it.
    pub fn lookup(&self, text: &str) -> Option<Symbol> {
        self.strings.get_index_of(text).map(|i| Symbol(i as u32))
    }

    /// The text a symbol was interned from.
    ///
    /// Returns `None` for a symbol this table never produced.
    pub fn resolve(&self, symbol: Symbol) -> Option<&str> {
        self.strings.get_index(symbol.index()).map(|s| &**s)
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

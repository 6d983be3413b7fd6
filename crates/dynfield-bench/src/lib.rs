//! Benchmark profiles for dynfield.
//!
//! - [`reference_keys`]: a deterministic set of interned field names
//! - [`populated_store`]: a store holding one value per reference key

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dynfield_core::{StringTable, Symbol};
use dynfield_dict::{PropertyStore, SharedEntryPool};

/// Intern `count` field names of the form `field_<n>`.
pub fn reference_keys(table: &mut StringTable, count: usize) -> Vec<Symbol> {
    (0..count)
        .map(|i| table.insert(&format!("field_{i}")))
        .collect()
}

/// A store on `pool` with `value_<n>` set for every key.
pub fn populated_store(pool: &SharedEntryPool, keys: &[Symbol]) -> PropertyStore {
    let mut store = PropertyStore::new(pool.clone());
    for (i, &key) in keys.iter().enumerate() {
        store.set_field_value(key, &format!("value_{i}"));
    }
    store
}

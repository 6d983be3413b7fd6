//! Fixed-bucket hash table of dynamic fields.

use std::mem;
use std::rc::Rc;

use dynfield_arena::SlotId;
use dynfield_core::Symbol;
use tracing::debug;

use crate::iter::{FieldCursor, Keys};
use crate::pool::{Entry, EntryPool, SharedEntryPool};

/// Number of hash buckets per store.
pub const HASH_TABLE_SIZE: usize = 19;

/// Result of walking a bucket chain for a key.
struct Lookup {
    bucket: usize,
    /// Entry preceding the match in the chain, if the match is not the head.
    prev: Option<SlotId>,
    found: Option<SlotId>,
}

/// Dynamic string-valued fields for one object.
///
/// Keys are interned [`Symbol`]s hashed and compared by index. Values are
/// owned strings; an empty value means "absent", so setting a field to
/// `""` deletes it.
///
/// Entry records live in the [`EntryPool`] passed at construction, which
/// is normally shared by every store in the process. Every operation
/// borrows the pool only while it runs, so values read from one store can
/// be written straight into another. Dropping a store returns its entries
/// to that pool.
pub struct PropertyStore {
    pool: SharedEntryPool,
    pub(crate) buckets: [Option<SlotId>; HASH_TABLE_SIZE],
    version: u32,
    len: usize,
}

impl PropertyStore {
    /// Create an empty store drawing entries from `pool`.
    pub fn new(pool: SharedEntryPool) -> Self {
        Self {
            pool,
            buckets: [None; HASH_TABLE_SIZE],
            version: 0,
            len: 0,
        }
    }

    /// The pool this store allocates from.
    pub fn pool(&self) -> &SharedEntryPool {
        &self.pool
    }

    /// Set, replace, or delete a field.
    ///
    /// - Empty `value`: removes `key` if present (bumps the version),
    ///   otherwise does nothing.
    /// - Existing `key`: replaces the value in place. The version does not
    ///   change.
    /// - New `key`: inserts at the head of its bucket (bumps the version).
    pub fn set_field_value(&mut self, key: Symbol, value: &str) {
        let mut pool = self.pool.borrow_mut();
        let Lookup {
            bucket,
            prev,
            found,
        } = Self::find(&self.buckets, &pool, key);

        match (found, value.is_empty()) {
            (Some(id), true) => {
                let next = pool.entry(id).next;
                match prev {
                    Some(prev) => pool.entry_mut(prev).next = next,
                    None => self.buckets[bucket] = next,
                }
                // The removed value drops here.
                pool.free(id);
                self.len -= 1;
                self.version = self.version.wrapping_add(1);
            }
            (None, true) => {}
            (Some(id), false) => {
                pool.entry_mut(id).value = value.into();
            }
            (None, false) => {
                let id = pool.alloc(Entry {
                    key,
                    value: value.into(),
                    next: self.buckets[bucket],
                });
                self.buckets[bucket] = Some(id);
                self.len += 1;
                self.version = self.version.wrapping_add(1);
            }
        }
    }

    /// Value of a field, or `None` if it is not set.
    ///
    /// The value is shared with the store, not borrowed from it: a later
    /// write to `key` does not change text already returned.
    pub fn get_field_value(&self, key: Symbol) -> Option<Rc<str>> {
        let pool = self.pool.borrow();
        let id = Self::find(&self.buckets, &pool, key).found?;
        Some(Rc::clone(&pool.entry(id).value))
    }

    /// Whether `key` is set.
    pub fn contains(&self, key: Symbol) -> bool {
        let pool = self.pool.borrow();
        Self::find(&self.buckets, &pool, key).found.is_some()
    }

    /// Copy every field of `other` into this store.
    ///
    /// Existing keys are overwritten; keys only present here are kept. Each
    /// key new to this store bumps the version once.
    pub fn assign_from(&mut self, other: &PropertyStore) {
        for field in other.cursor() {
            self.set_field_value(field.key, &field.value);
        }
    }

    /// Remove every field, bumping the version once per removed entry.
    pub fn clear(&mut self) {
        let removed = self.release_entries();
        if removed > 0 {
            debug!(removed, "cleared property store");
        }
        self.version = self.version.wrapping_add(removed as u32);
    }

    /// Change counter, advanced by every insert and delete.
    ///
    /// Value-only updates leave it unchanged.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Number of fields set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A cursor over every field in bucket order.
    pub fn cursor(&self) -> FieldCursor<'_> {
        FieldCursor::new(self)
    }

    /// Keys of every field in bucket order.
    pub fn keys(&self) -> Keys<'_> {
        Keys::new(self.cursor())
    }

    /// Owned copy of every field in bucket order.
    pub fn entries(&self) -> Vec<(Symbol, String)> {
        let mut out = Vec::with_capacity(self.len);
        out.extend(self.cursor().map(|field| (field.key, field.value.to_string())));
        out
    }

    /// Whether this store and `other` draw from the same pool.
    pub fn shares_pool_with(&self, other: &PropertyStore) -> bool {
        self.pool.ptr_eq(&other.pool)
    }

    fn find(
        buckets: &[Option<SlotId>; HASH_TABLE_SIZE],
        pool: &EntryPool,
        key: Symbol,
    ) -> Lookup {
        let bucket = bucket_of(key);
        let mut prev = None;
        let mut walk = buckets[bucket];
        while let Some(id) = walk {
            let entry = pool.entry(id);
            if entry.key == key {
                return Lookup {
                    bucket,
                    prev,
                    found: Some(id),
                };
            }
            prev = Some(id);
            walk = entry.next;
        }
        Lookup {
            bucket,
            prev,
            found: None,
        }
    }

    /// Return every entry to the pool. Leaves the version untouched.
    fn release_entries(&mut self) -> usize {
        let removed = mem::take(&mut self.len);
        if removed > 0 {
            self.pool
                .release_chains(self.buckets.iter_mut().filter_map(Option::take));
        }
        removed
    }
}

impl Drop for PropertyStore {
    fn drop(&mut self) {
        self.release_entries();
    }
}

/// Bucket for `key`: identity hash modulo the table size.
pub(crate) fn bucket_of(key: Symbol) -> usize {
    key.index() % HASH_TABLE_SIZE
}

//! Walking every field of a store.
//!
//! Iteration is bucket-major, chain-minor: neither alphabetical nor
//! insertion order. Callers that need a stable order must sort.

use std::rc::Rc;

use dynfield_arena::SlotId;
use dynfield_core::Symbol;

use crate::store::{PropertyStore, HASH_TABLE_SIZE};

/// A field yielded by a [`FieldCursor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRef {
    /// The field key.
    pub key: Symbol,
    /// The field value, shared with the store.
    pub value: Rc<str>,
}

/// Cursor over the fields of one [`PropertyStore`].
///
/// The cursor borrows the store but not its pool: the pool is only
/// borrowed inside [`advance`](Self::advance), so other stores sharing
/// the pool may be written between steps.
pub struct FieldCursor<'a> {
    store: &'a PropertyStore,
    /// Next bucket to scan once the current chain runs out.
    next_bucket: usize,
    current: Option<SlotId>,
}

impl<'a> FieldCursor<'a> {
    pub(crate) fn new(store: &'a PropertyStore) -> Self {
        Self {
            store,
            next_bucket: 0,
            current: None,
        }
    }

    /// Move to the next field.
    ///
    /// Follows the current bucket chain, then scans forward for the next
    /// non-empty bucket. Returns `None` once every bucket is exhausted, and
    /// keeps returning `None` afterwards.
    pub fn advance(&mut self) -> Option<FieldRef> {
        let pool = self.store.pool().borrow();
        self.current = self.current.and_then(|id| pool.entry(id).next);
        while self.current.is_none() && self.next_bucket < HASH_TABLE_SIZE {
            self.current = self.store.buckets[self.next_bucket];
            self.next_bucket += 1;
        }
        let entry = pool.entry(self.current?);
        Some(FieldRef {
            key: entry.key,
            value: Rc::clone(&entry.value),
        })
    }
}

impl Iterator for FieldCursor<'_> {
    type Item = FieldRef;

    fn next(&mut self) -> Option<FieldRef> {
        self.advance()
    }
}

/// Iterator over the keys of one [`PropertyStore`], in cursor order.
pub struct Keys<'a> {
    cursor: FieldCursor<'a>,
}

impl<'a> Keys<'a> {
    pub(crate) fn new(cursor: FieldCursor<'a>) -> Self {
        Self { cursor }
    }
}

impl Iterator for Keys<'_> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        self.cursor.advance().map(|field| field.key)
    }
}

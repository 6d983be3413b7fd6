//! The entry pool shared by property stores.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use dynfield_arena::{Arena, ArenaConfig, Recycler, SlotId};
use dynfield_core::Symbol;
use tracing::debug;

/// One key/value record.
///
/// `next` chains entries that share a hash bucket. Once an entry is freed
/// the recycler's own free link takes over the slot, so the two lists never
/// hold the same entry at once.
#[derive(Debug)]
pub struct Entry {
    /// Interned key. Compared by symbol, never by text.
    pub key: Symbol,
    /// Value text. Never empty while the entry is live. Shared with readers,
    /// so replacing it leaves values already handed out unchanged.
    pub value: Rc<str>,
    /// Next entry in the same bucket.
    pub next: Option<SlotId>,
}

/// Recycling allocator for [`Entry`] records.
pub struct EntryPool {
    entries: Recycler<Entry>,
}

impl EntryPool {
    /// Create an empty pool.
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            entries: Recycler::new(config),
        }
    }

    /// Create an empty pool wrapped for sharing between stores.
    pub fn shared(config: &ArenaConfig) -> SharedEntryPool {
        SharedEntryPool::new(Self::new(config))
    }

    /// Store a new entry.
    pub fn alloc(&mut self, entry: Entry) -> SlotId {
        self.entries.alloc(entry)
    }

    /// Recycle an entry, handing it back so its value is dropped by the caller.
    pub fn free(&mut self, id: SlotId) -> Option<Entry> {
        self.entries.free(id)
    }

    /// Recycle a whole bucket chain starting at `head`. Returns the number
    /// of entries freed.
    pub fn free_chain(&mut self, head: SlotId) -> usize {
        let mut freed = 0;
        let mut walk = Some(head);
        while let Some(id) = walk {
            walk = self.free(id).and_then(|entry| entry.next);
            freed += 1;
        }
        freed
    }

    /// Live entry in `id`.
    pub fn get(&self, id: SlotId) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// Live entry reached through a bucket chain.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not live: bucket chains only ever name live entries.
    pub(crate) fn entry(&self, id: SlotId) -> &Entry {
        self.entries
            .get(id)
            .unwrap_or_else(|| panic!("bucket chain names dead entry {id}"))
    }

    /// Mutable live entry reached through a bucket chain.
    pub(crate) fn entry_mut(&mut self, id: SlotId) -> &mut Entry {
        self.entries
            .get_mut(id)
            .unwrap_or_else(|| panic!("bucket chain names dead entry {id}"))
    }

    /// Number of live entries across every store using this pool.
    pub fn live_count(&self) -> usize {
        self.entries.live_count()
    }

    /// Number of recycled entries waiting for reuse.
    pub fn free_count(&self) -> usize {
        self.entries.free_count()
    }

    /// Bytes reserved per entry slot.
    pub fn element_size(&self) -> usize {
        self.entries.element_size()
    }

    /// The arena entry slots are carved from.
    pub fn arena(&self) -> &Arena {
        self.entries.arena()
    }

    /// Number of blocks currently held.
    pub fn block_count(&self) -> usize {
        self.entries.block_count()
    }

    /// Blocks created since construction, including released ones.
    pub fn blocks_created(&self) -> u64 {
        self.entries.blocks_created()
    }
}

impl Default for EntryPool {
    fn default() -> Self {
        Self::new(&ArenaConfig::default())
    }
}

struct PoolCell {
    pool: RefCell<EntryPool>,
    /// Chain heads released while the pool was borrowed, freed on next access.
    pending: RefCell<Vec<SlotId>>,
}

/// Handle through which stores share one [`EntryPool`].
///
/// Cloning the handle shares the pool. Store reads and writes borrow it
/// only for the duration of the call. A store dropped while someone holds
/// a [`borrow`](Self::borrow) queues its entries, and they are returned to
/// the pool on the next access.
#[derive(Clone)]
pub struct SharedEntryPool(Rc<PoolCell>);

impl SharedEntryPool {
    /// Wrap `pool` for sharing.
    pub fn new(pool: EntryPool) -> Self {
        Self(Rc::new(PoolCell {
            pool: RefCell::new(pool),
            pending: RefCell::new(Vec::new()),
        }))
    }

    /// Shared access to the pool, after settling any queued releases.
    ///
    /// # Panics
    ///
    /// Panics if the pool is mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, EntryPool> {
        if !self.0.pending.borrow().is_empty() {
            if let Ok(mut pool) = self.0.pool.try_borrow_mut() {
                self.settle(&mut pool);
            }
        }
        self.0.pool.borrow()
    }

    /// Exclusive access to the pool, after settling any queued releases.
    ///
    /// # Panics
    ///
    /// Panics if the pool is already borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, EntryPool> {
        let mut pool = self.0.pool.borrow_mut();
        self.settle(&mut pool);
        pool
    }

    /// Whether both handles name the same pool.
    pub fn ptr_eq(&self, other: &SharedEntryPool) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of bucket chains queued for release.
    pub fn pending_chains(&self) -> usize {
        self.0.pending.borrow().len()
    }

    /// Return bucket chains to the pool, or queue them if it is borrowed.
    pub(crate) fn release_chains(&self, heads: impl IntoIterator<Item = SlotId>) {
        match self.0.pool.try_borrow_mut() {
            Ok(mut pool) => {
                self.settle(&mut pool);
                for head in heads {
                    pool.free_chain(head);
                }
            }
            Err(_) => {
                let mut pending = self.0.pending.borrow_mut();
                let before = pending.len();
                pending.extend(heads);
                debug!(
                    chains = pending.len() - before,
                    "entry pool borrowed, deferring release"
                );
            }
        }
    }

    fn settle(&self, pool: &mut EntryPool) {
        let pending = self.0.pending.take();
        if pending.is_empty() {
            return;
        }
        let freed: usize = pending.into_iter().map(|head| pool.free_chain(head)).sum();
        debug!(freed, "released deferred entries");
    }
}

impl Default for SharedEntryPool {
    fn default() -> Self {
        Self::new(EntryPool::default())
    }
}

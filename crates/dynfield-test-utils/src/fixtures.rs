//! Reusable fixtures for store and serialization tests.

use std::io;
use std::sync::{Arc, Mutex};

use dynfield_arena::ArenaConfig;
use dynfield_core::{StaticFields, StringTable, Symbol};
use dynfield_dict::{EntryPool, PropertyStore, SharedEntryPool};

/// A string table plus one shared entry pool.
///
/// Every store created through [`Fixture::store`] shares the pool, matching
/// how an application shares one pool between all of its objects.
pub struct Fixture {
    pub table: StringTable,
    pub pool: SharedEntryPool,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::default())
    }

    pub fn with_config(config: ArenaConfig) -> Self {
        Self {
            table: StringTable::new(),
            pool: EntryPool::shared(&config),
        }
    }

    /// A new empty store on the shared pool.
    pub fn store(&self) -> PropertyStore {
        PropertyStore::new(self.pool.clone())
    }

    /// Intern `text`.
    pub fn key(&mut self, text: &str) -> Symbol {
        self.table.insert(text)
    }

    /// A store pre-populated with `pairs`, inserted in order.
    pub fn store_with(&mut self, pairs: &[(&str, &str)]) -> PropertyStore {
        let mut store = self.store();
        for &(key, value) in pairs {
            let key = self.key(key);
            store.set_field_value(key, value);
        }
        store
    }

    /// Live entries across every store on the pool.
    pub fn live_entries(&self) -> usize {
        self.pool.borrow().live_count()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// An owner with static fields and an optional write veto.
pub struct MockObject {
    pub static_fields: Vec<Symbol>,
    /// Keys `write_fields` must not persist.
    pub transient: Vec<Symbol>,
}

impl MockObject {
    pub fn new(static_fields: Vec<Symbol>) -> Self {
        Self {
            static_fields,
            transient: Vec::new(),
        }
    }

    pub fn with_transient(mut self, keys: Vec<Symbol>) -> Self {
        self.transient = keys;
        self
    }
}

impl StaticFields for MockObject {
    fn static_fields(&self) -> &[Symbol] {
        &self.static_fields
    }

    fn should_write_field(&self, key: Symbol, _value: &str) -> bool {
        !self.transient.contains(&key)
    }
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a plain-text subscriber installed and return what it logged.
pub fn capture_logs<F: FnOnce()>(f: F) -> String {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buf.0.lock().map(|b| b.clone()).unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

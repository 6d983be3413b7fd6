//! Property tests for property store semantics.
//!
//! Checks round-trip, deletion, version accounting, assignment and pool
//! reuse against a `HashMap` model.

use std::collections::{HashMap, HashSet};

use dynfield_arena::ArenaConfig;
use dynfield_core::Symbol;
use dynfield_test_utils::Fixture;
use proptest::prelude::*;

/// A single store mutation: key index and value (empty deletes).
fn arb_op() -> impl Strategy<Value = (u32, String)> {
    (0u32..40, prop_oneof![Just(String::new()), "[a-z ]{1,6}"])
}

fn snapshot(store: &dynfield_dict::PropertyStore) -> HashSet<(Symbol, String)> {
    store.entries().into_iter().collect()
}

proptest! {
    #[test]
    fn matches_hashmap_model(ops in proptest::collection::vec(arb_op(), 1..200)) {
        let fx = Fixture::new();
        let mut store = fx.store();
        let mut model: HashMap<Symbol, String> = HashMap::new();

        for (k, v) in ops {
            let key = Symbol(k);
            let before = store.version();
            let structural = if v.is_empty() {
                model.remove(&key).is_some()
            } else {
                model.insert(key, v.clone()).is_none()
            };
            store.set_field_value(key, &v);

            let expected = if structural { before + 1 } else { before };
            prop_assert_eq!(store.version(), expected);
            prop_assert_eq!(store.len(), model.len());
            prop_assert_eq!(
                store.get_field_value(key).map(|s| s.to_string()),
                model.get(&key).cloned()
            );
        }

        let expected: HashSet<(Symbol, String)> = model.into_iter().collect();
        prop_assert_eq!(snapshot(&store), expected);
    }

    #[test]
    fn set_then_get_round_trips(k in 0u32..1000, v in "[ -~]{1,32}") {
        let fx = Fixture::new();
        let mut store = fx.store();
        store.set_field_value(Symbol(k), &v);
        prop_assert_eq!(store.get_field_value(Symbol(k)).map(|s| s.to_string()), Some(v));
    }

    #[test]
    fn set_then_delete_removes(k in 0u32..1000, v in "[a-z]{1,8}") {
        let fx = Fixture::new();
        let mut store = fx.store();
        store.set_field_value(Symbol(k), &v);
        store.set_field_value(Symbol(k), "");
        prop_assert!(store.get_field_value(Symbol(k)).is_none());
        prop_assert_eq!(store.version(), 2);
    }

    #[test]
    fn overwrite_keeps_version(k in 0u32..1000, a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let fx = Fixture::new();
        let mut store = fx.store();
        store.set_field_value(Symbol(k), &a);
        let v0 = store.version();
        store.set_field_value(Symbol(k), &b);
        prop_assert_eq!(store.version(), v0);
    }

    #[test]
    fn assign_from_preserves_entry_set(
        pairs in proptest::collection::hash_map(0u32..200, "[a-z]{1,8}", 0..40)
    ) {
        let fx = Fixture::new();
        let mut a = fx.store();
        for (k, v) in &pairs {
            a.set_field_value(Symbol(*k), v);
        }
        let mut b = fx.store();
        b.assign_from(&a);

        prop_assert_eq!(snapshot(&b), snapshot(&a));
        prop_assert_eq!(b.version() as usize, pairs.len());
        prop_assert_eq!(fx.live_entries(), 2 * pairs.len());
    }
}

#[test]
fn delete_of_never_set_key_keeps_version() {
    let mut fx = Fixture::new();
    let mut store = fx.store_with(&[("a", "1")]);
    let v0 = store.version();
    let ghost = fx.key("ghost");
    store.set_field_value(ghost, "");
    assert_eq!(store.version(), v0);
}

#[test]
fn assign_from_two_entries_yields_same_set() {
    let mut fx = Fixture::new();
    let a = fx.store_with(&[("k1", "v1"), ("k2", "v2")]);
    let mut b = fx.store();
    b.assign_from(&a);

    let k1 = fx.key("k1");
    let k2 = fx.key("k2");
    let expected: HashSet<(Symbol, String)> =
        [(k1, "v1".to_string()), (k2, "v2".to_string())].into_iter().collect();
    assert_eq!(snapshot(&b), expected);
}

#[test]
fn pool_collapses_when_last_store_drops() {
    let mut fx = Fixture::new();
    {
        let _a = fx.store_with(&[("x", "1"), ("y", "2")]);
        let _b = fx.store_with(&[("z", "3")]);
        assert_eq!(fx.live_entries(), 3);
        assert!(fx.pool.borrow().block_count() > 0);
    }
    assert_eq!(fx.live_entries(), 0);
    assert_eq!(fx.pool.borrow().block_count(), 0);
}

#[test]
fn churn_reuses_recycled_entries() {
    let fx = Fixture::with_config(ArenaConfig::new(256));
    let mut keeper = fx.store();
    keeper.set_field_value(Symbol(0), "pinned");
    let mut churn = fx.store();

    for i in 1..=8u32 {
        churn.set_field_value(Symbol(i), "x");
    }
    let created = fx.pool.borrow().blocks_created();
    for _ in 0..50 {
        for i in 1..=8u32 {
            churn.set_field_value(Symbol(i), "");
        }
        for i in (1..=8u32).rev() {
            churn.set_field_value(Symbol(i), "y");
        }
    }
    assert_eq!(fx.pool.borrow().blocks_created(), created);
    assert_eq!(keeper.get_field_value(Symbol(0)).as_deref(), Some("pinned"));
}

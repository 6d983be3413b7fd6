//! Integration test: deterministic textual output of dynamic fields.
//!
//! Two stores holding the same fields must serialize byte-identically no
//! matter the insertion order, and static or vetoed fields must never
//! appear in the output.

use dynfield_dict::{LineEnding, PropertyStore, WriteOptions};
use dynfield_test_utils::{capture_logs, Fixture, MockObject};
use proptest::prelude::*;

fn write(store: &PropertyStore, fx: &Fixture, owner: &MockObject) -> Vec<u8> {
    let mut out = Vec::new();
    store
        .write_fields(&fx.table, owner, &WriteOptions::default(), &mut out)
        .unwrap();
    out
}

#[test]
fn insertion_order_does_not_leak() {
    let mut fx = Fixture::new();
    let pairs = [
        ("health", "100"),
        ("Name", "crate \"A\""),
        ("armor", "light"),
        ("zone", "north\teast"),
        ("bounty", "5"),
    ];
    let forward = fx.store_with(&pairs);
    let mut reversed_pairs = pairs;
    reversed_pairs.reverse();
    let backward = fx.store_with(&reversed_pairs);
    let owner = MockObject::new(Vec::new());

    let a = write(&forward, &fx, &owner);
    let b = write(&backward, &fx, &owner);
    assert_eq!(a, b);
    assert_eq!(
        String::from_utf8(a).unwrap(),
        concat!(
            "\tarmor = \"light\";\r\n",
            "\tbounty = \"5\";\r\n",
            "\thealth = \"100\";\r\n",
            "\tName = \"crate \\\"A\\\"\";\r\n",
            "\tzone = \"north\\teast\";\r\n",
        )
    );
}

#[test]
fn static_and_vetoed_fields_are_skipped() {
    let mut fx = Fixture::new();
    let store = fx.store_with(&[
        ("position", "1 2"),
        ("scratch", "tmp"),
        ("label", "door"),
    ]);
    let position = fx.key("position");
    let scratch = fx.key("scratch");
    let owner = MockObject::new(vec![position]).with_transient(vec![scratch]);

    let out = String::from_utf8(write(&store, &fx, &owner)).unwrap();
    assert_eq!(out, "\tlabel = \"door\";\r\n");

    // Printing honours static fields but not the write veto.
    assert_eq!(
        store.print_lines(&fx.table, &owner),
        vec![
            "  label = \"door\"".to_string(),
            "  scratch = \"tmp\"".to_string(),
        ]
    );
}

#[test]
fn print_fields_logs_each_line() {
    let mut fx = Fixture::new();
    let store = fx.store_with(&[("b", "2"), ("a", "1")]);
    let owner = MockObject::new(Vec::new());

    let logs = capture_logs(|| store.print_fields(&fx.table, &owner));
    let a = logs.find("a = \"1\"").expect("a logged");
    let b = logs.find("b = \"2\"").expect("b logged");
    assert!(a < b, "fields logged out of order:\n{logs}");
}

#[test]
fn nested_owner_indents_one_deeper() {
    let mut fx = Fixture::new();
    let store = fx.store_with(&[("k", "v")]);
    let owner = MockObject::new(Vec::new());
    let mut out = Vec::new();
    let options = WriteOptions::new(1).with_line_ending(LineEnding::Lf);
    store
        .write_fields(&fx.table, &owner, &options, &mut out)
        .unwrap();
    assert_eq!(out, b"\t\tk = \"v\";\n");
}

proptest! {
    #[test]
    fn output_is_order_independent(
        pairs in proptest::collection::btree_map("[a-zA-Z]{1,6}", "[ -~]{1,10}", 0..24)
    ) {
        let mut fx = Fixture::new();
        let owner = MockObject::new(Vec::new());
        let forward: Vec<(&str, &str)> =
            pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let mut backward = forward.clone();
        backward.reverse();

        let a = fx.store_with(&forward);
        let b = fx.store_with(&backward);
        prop_assert_eq!(write(&a, &fx, &owner), write(&b, &fx, &owner));
    }
}

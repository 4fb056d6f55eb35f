// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_row_selection` crate.
//!
//! These exercise the two selection modes, how cached flags reconcile against
//! them, and when the revision counter moves.

use std::collections::BTreeSet;

use understory_row_selection::{RowSelection, SelectionMode, SelectionSnapshot};

fn explicit_sorted(sel: &RowSelection<String>) -> Vec<String> {
    let keys: BTreeSet<_> = sel
        .explicit_keys()
        .expect("selection should be explicit")
        .iter()
        .cloned()
        .collect();
    keys.into_iter().collect()
}

#[test]
fn empty_selection_basics() {
    let sel = RowSelection::<String>::new();
    assert!(sel.is_empty());
    assert!(!sel.is_all());
    assert!(!sel.contains("a"));
    assert_eq!(sel.revision(), 0);
    assert!(matches!(sel.snapshot(), SelectionSnapshot::Explicit(keys) if keys.is_empty()));
}

#[test]
fn str_lookups_work_for_string_keys() {
    let mut sel = RowSelection::<String>::new();
    sel.insert("key5".to_owned());
    assert!(sel.contains("key5"));
    assert!(sel.snapshot().contains("key5"));
    assert!(sel.remove("key5"));
    assert!(!sel.contains("key5"));
}

#[test]
fn replace_with_collapses_duplicates() {
    let mut sel = RowSelection::new();
    sel.replace_with(["b", "a", "b", "c", "a"].map(String::from));
    assert_eq!(explicit_sorted(&sel), ["a", "b", "c"]);
    assert_eq!(sel.revision(), 1);

    // Same set in a different order is a no-op.
    sel.replace_with(["c", "b", "a"].map(String::from));
    assert_eq!(sel.revision(), 1);
}

#[test]
fn replace_with_leaves_select_all() {
    let mut sel = RowSelection::new();
    sel.select_all();
    sel.replace_with(["x".to_owned()]);
    assert!(!sel.is_all());
    assert!(sel.contains("x"));
    assert!(!sel.contains("y"));
}

#[test]
fn select_all_covers_unknown_keys() {
    let mut sel = RowSelection::<String>::new();
    sel.select_all();
    assert!(sel.is_all());
    assert!(!sel.is_empty());
    assert!(sel.contains("never-seen"));
    assert_eq!(sel.explicit_keys(), None);
    assert_eq!(sel.mode(), &SelectionMode::All);
}

#[test]
fn insert_is_a_noop_in_select_all_mode() {
    let mut sel = RowSelection::new();
    sel.select_all();
    let rev = sel.revision();
    assert!(!sel.insert(1_u32));
    assert_eq!(sel.revision(), rev);
}

#[test]
fn reconcile_reports_only_changes() {
    let mut sel = RowSelection::new();
    sel.insert(7_u32);

    let mut flag = true;
    assert!(!sel.reconcile(&7_u32, &mut flag));
    assert!(flag);

    let mut other = true;
    assert!(sel.reconcile(&8_u32, &mut other));
    assert!(!other);

    sel.select_all();
    assert!(sel.reconcile(&8_u32, &mut other));
    assert!(other);
}

#[test]
fn clear_after_select_all_deselects_everything() {
    let mut sel = RowSelection::<u32>::new();
    sel.select_all();
    sel.clear();
    assert!(sel.is_empty());

    // A row cached as selected while in "all" mode reconciles back to false.
    let mut cached = true;
    assert!(sel.reconcile(&3_u32, &mut cached));
    assert!(!cached);
}

#[test]
fn demote_all_seeds_the_explicit_set() {
    let mut sel = RowSelection::new();
    sel.select_all();
    sel.demote_all(["a", "b", "c"].map(String::from));
    assert!(sel.remove("b"));
    assert_eq!(explicit_sorted(&sel), ["a", "c"]);

    // Demoting an explicit selection does nothing.
    let rev = sel.revision();
    sel.demote_all(["z".to_owned()]);
    assert_eq!(sel.revision(), rev);
    assert!(!sel.contains("z"));
}

#[test]
fn revision_moves_only_on_change() {
    let mut sel = RowSelection::new();
    sel.clear();
    assert_eq!(sel.revision(), 0);

    assert!(sel.set(1_u32, true));
    assert_eq!(sel.revision(), 1);
    assert!(!sel.set(1, true));
    assert_eq!(sel.revision(), 1);

    assert!(!sel.remove(&99_u32));
    assert_eq!(sel.revision(), 1);

    assert!(sel.set(1, false));
    assert_eq!(sel.revision(), 2);

    sel.select_all();
    sel.select_all();
    assert_eq!(sel.revision(), 3);
}

//! End-to-end selection scenarios on a four-record session.

use mergebay_engine::{BucketId, Item, Session, Slot};

fn ids(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

fn abcd() -> Session {
    Session::init(["A", "B", "C", "D"].iter().map(|id| Item::named(id)).collect())
}

#[test]
fn init_splits_first_from_rest() {
    let s = abcd();
    assert_eq!(ids(s.primary()), vec!["A"]);
    assert_eq!(ids(s.secondary()), vec!["B", "C", "D"]);
}

#[test]
fn secondary_onto_occupied_primary_swaps() {
    let s = abcd().transfer(Slot::secondary(0), Slot::primary(0));
    assert_eq!(ids(s.primary()), vec!["B"]);
    assert_eq!(ids(s.secondary()), vec!["A", "C", "D"]);
}

#[test]
fn primary_into_secondary_at_index_one() {
    let s = abcd().transfer(Slot::primary(0), Slot::secondary(1));
    assert!(s.primary().is_empty());
    assert_eq!(ids(s.secondary()), vec!["B", "A", "C", "D"]);
}

#[test]
fn reorder_secondary_first_to_last() {
    let s = abcd().reorder(BucketId::Secondary, 0, 2);
    assert_eq!(ids(s.secondary()), vec!["C", "D", "B"]);
}

#[test]
fn fill_empty_primary_without_swap() {
    let emptied = abcd().transfer(Slot::primary(0), Slot::secondary(1));
    let s = emptied.transfer(Slot::secondary(0), Slot::primary(0));
    assert_eq!(ids(s.primary()), vec!["B"]);
    assert_eq!(ids(s.secondary()), vec!["A", "C", "D"]);
}

#[test]
fn reinit_discards_previous_arrangement() {
    let rearranged = abcd().transfer(Slot::secondary(2), Slot::primary(0));
    let fresh = Session::init(rearranged.ids().into_iter().map(Item::new).collect());
    assert_eq!(ids(fresh.primary()), vec!["D"]);
    assert_eq!(ids(fresh.secondary()), vec!["B", "C", "A"]);
}

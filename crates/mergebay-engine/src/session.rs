//! The [`Session`] value and its invariants.

use serde::Serialize;
use tracing::debug;

use mergebay_types::{BucketId, Item, ItemId};

/// One merge-selection attempt: a primary bucket and a secondary bucket.
///
/// Invariants, upheld by every constructor and operation:
///
/// - the primary bucket never holds more than one item;
/// - every item supplied at [`Session::init`] is in exactly one bucket, and
///   no other item ever enters;
/// - bucket order only changes where an operation explicitly reorders.
///
/// The fields are private so the invariants cannot be bypassed. Operations
/// return a fresh session rather than mutating in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Session {
    primary: Vec<Item>,
    secondary: Vec<Item>,
}

impl Session {
    /// Start a session from the item source's ordered candidates.
    ///
    /// The first candidate seeds the primary bucket; the rest seed the
    /// secondary bucket in source order. An empty list yields two empty
    /// buckets.
    pub fn init(items: Vec<Item>) -> Self {
        let mut secondary = items;
        let primary = if secondary.is_empty() {
            Vec::new()
        } else {
            vec![secondary.remove(0)]
        };
        debug!(
            primary = primary.len(),
            secondary = secondary.len(),
            "session initialized"
        );
        Self { primary, secondary }
    }

    /// The primary bucket (zero or one item).
    pub fn primary(&self) -> &[Item] {
        &self.primary
    }

    /// The secondary bucket, in merge order.
    pub fn secondary(&self) -> &[Item] {
        &self.secondary
    }

    /// The record others will be merged into, if one has been chosen.
    pub fn primary_item(&self) -> Option<&Item> {
        self.primary.first()
    }

    /// The items of the named bucket.
    pub fn bucket(&self, bucket: BucketId) -> &[Item] {
        match bucket {
            BucketId::Primary => &self.primary,
            BucketId::Secondary => &self.secondary,
        }
    }

    /// Total number of items across both buckets.
    pub fn len(&self) -> usize {
        self.primary.len() + self.secondary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of the secondary bucket in order.
    pub fn secondary_ids(&self) -> Vec<ItemId> {
        self.secondary.iter().map(|item| item.id.clone()).collect()
    }

    /// Ids of both buckets, primary first.
    pub fn ids(&self) -> Vec<ItemId> {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .map(|item| item.id.clone())
            .collect()
    }

    /// Which bucket holds `id`, and where.
    pub fn locate(&self, id: &ItemId) -> Option<(BucketId, usize)> {
        if let Some(i) = self.primary.iter().position(|item| &item.id == id) {
            return Some((BucketId::Primary, i));
        }
        self.secondary
            .iter()
            .position(|item| &item.id == id)
            .map(|i| (BucketId::Secondary, i))
    }

    /// Whether a merge may be committed: exactly one primary and at least one
    /// secondary.
    pub fn can_commit(&self) -> bool {
        self.primary.len() == 1 && !self.secondary.is_empty()
    }

    /// Whether `self` arranges items differently from `before`.
    pub fn changed(&self, before: &Session) -> bool {
        let ids = |items: &[Item]| items.iter().map(|i| i.id.clone()).collect::<Vec<_>>();
        ids(&self.primary) != ids(&before.primary) || ids(&self.secondary) != ids(&before.secondary)
    }

    pub(crate) fn bucket_mut(&mut self, bucket: BucketId) -> &mut Vec<Item> {
        match bucket {
            BucketId::Primary => &mut self.primary,
            BucketId::Secondary => &mut self.secondary,
        }
    }

    /// Borrow two distinct buckets mutably: `(from, to)`.
    ///
    /// Returns `None` when both name the same bucket.
    pub(crate) fn pair_mut(
        &mut self,
        from: BucketId,
        to: BucketId,
    ) -> Option<(&mut Vec<Item>, &mut Vec<Item>)> {
        match (from, to) {
            (BucketId::Primary, BucketId::Secondary) => {
                Some((&mut self.primary, &mut self.secondary))
            }
            (BucketId::Secondary, BucketId::Primary) => {
                Some((&mut self.secondary, &mut self.primary))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(ids: &[&str]) -> Vec<Item> {
        ids.iter().map(|id| Item::named(id)).collect()
    }

    fn labels(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn init_seeds_primary_with_first_item() {
        let s = Session::init(items(&["A", "B", "C", "D"]));
        assert_eq!(labels(s.primary()), vec!["A"]);
        assert_eq!(labels(s.secondary()), vec!["B", "C", "D"]);
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn init_empty_yields_empty_buckets() {
        let s = Session::init(Vec::new());
        assert!(s.primary().is_empty());
        assert!(s.secondary().is_empty());
        assert!(s.is_empty());
        assert!(!s.can_commit());
    }

    #[test]
    fn init_single_item_cannot_commit() {
        let s = Session::init(items(&["A"]));
        assert_eq!(labels(s.primary()), vec!["A"]);
        assert!(s.secondary().is_empty());
        assert!(!s.can_commit());
    }

    #[test]
    fn can_commit_with_primary_and_secondary() {
        let s = Session::init(items(&["A", "B"]));
        assert!(s.can_commit());
        assert_eq!(s.primary_item().unwrap().id.as_str(), "A");
    }

    #[test]
    fn locate_finds_bucket_and_index() {
        let s = Session::init(items(&["A", "B", "C"]));
        assert_eq!(s.locate(&ItemId::new("A").unwrap()), Some((BucketId::Primary, 0)));
        assert_eq!(s.locate(&ItemId::new("C").unwrap()), Some((BucketId::Secondary, 1)));
        assert_eq!(s.locate(&ItemId::new("Z").unwrap()), None);
    }

    #[test]
    fn ids_list_primary_first() {
        let s = Session::init(items(&["A", "B", "C"]));
        let ids: Vec<String> = s.ids().iter().map(ToString::to_string).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(s.secondary_ids().len(), 2);
    }

    #[test]
    fn pair_mut_rejects_same_bucket() {
        let mut s = Session::init(items(&["A", "B"]));
        assert!(s.pair_mut(BucketId::Secondary, BucketId::Secondary).is_none());
        let (from, to) = s.pair_mut(BucketId::Secondary, BucketId::Primary).unwrap();
        assert_eq!(from.len(), 1);
        assert_eq!(to.len(), 1);
    }

    #[test]
    fn serializes_both_buckets() {
        let s = Session::init(items(&["A", "B"]));
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["primary"][0]["id"], "A");
        assert_eq!(json["secondary"][0]["id"], "B");
    }
}

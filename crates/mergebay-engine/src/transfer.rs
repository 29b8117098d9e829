//! Reorder-in-place and cross-bucket transfer.
//!
//! Both operations validate their coordinates first and return an unchanged
//! session when they are out of range. A transfer whose destination is the
//! capacity-limited primary bucket, while that bucket is occupied, becomes a
//! swap: the occupant is evicted into the bucket the incoming item came from,
//! at the position the incoming item vacated.

use serde::{Deserialize, Serialize};
use tracing::debug;

use mergebay_types::BucketId;

use crate::session::Session;

/// A position within one bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub bucket: BucketId,
    pub index: usize,
}

impl Slot {
    pub fn new(bucket: BucketId, index: usize) -> Self {
        Self { bucket, index }
    }

    pub fn primary(index: usize) -> Self {
        Self::new(BucketId::Primary, index)
    }

    pub fn secondary(index: usize) -> Self {
        Self::new(BucketId::Secondary, index)
    }
}

impl Session {
    /// Move an item to a new position within the same bucket.
    ///
    /// Both indices must address an existing element (`index < len`);
    /// otherwise the session is returned unchanged. The element is removed
    /// first and then inserted at `to` in the shortened list.
    pub fn reorder(&self, bucket: BucketId, from: usize, to: usize) -> Session {
        let len = self.bucket(bucket).len();
        if from >= len || to >= len {
            debug!(%bucket, from, to, len, "reorder ignored: index out of range");
            return self.clone();
        }

        let mut next = self.clone();
        let items = next.bucket_mut(bucket);
        let moved = items.remove(from);
        items.insert(to, moved);
        debug!(%bucket, from, to, "reordered");
        next
    }

    /// Move an item from `source` to `destination`.
    ///
    /// `source.index` must address an existing element; `destination.index`
    /// may also equal the destination length (append). Out-of-range
    /// coordinates leave the session unchanged. A transfer within one bucket
    /// is a [`Session::reorder`].
    pub fn transfer(&self, source: Slot, destination: Slot) -> Session {
        if source.bucket == destination.bucket {
            return self.reorder(source.bucket, source.index, destination.index);
        }

        let source_len = self.bucket(source.bucket).len();
        let destination_len = self.bucket(destination.bucket).len();
        if source.index >= source_len || destination.index > destination_len {
            debug!(
                ?source,
                ?destination,
                source_len,
                destination_len,
                "transfer ignored: index out of range"
            );
            return self.clone();
        }

        let mut next = self.clone();
        let Some((from, to)) = next.pair_mut(source.bucket, destination.bucket) else {
            return self.clone();
        };

        let moved = from.remove(source.index);
        let full = destination
            .bucket
            .capacity()
            .is_some_and(|capacity| to.len() >= capacity);

        if full {
            // Swap-on-overflow: the occupant takes over the vacated slot.
            let displaced = to.remove(0);
            to.insert(0, moved);
            let at = source.index.min(from.len());
            from.insert(at, displaced);
            debug!(?source, ?destination, "transfer swapped with occupant");
        } else {
            let at = destination.index.min(to.len());
            to.insert(at, moved);
            debug!(?source, ?destination, "transferred");
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mergebay_types::Item;

    fn start() -> Session {
        Session::init(["A", "B", "C", "D"].iter().map(|id| Item::named(id)).collect())
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    // -----------------------------------------------------------------------
    // Secondary -> occupied primary swaps the occupant back
    // -----------------------------------------------------------------------
    #[test]
    fn drop_on_occupied_primary_swaps() {
        let s = start().transfer(Slot::secondary(0), Slot::primary(0));
        assert_eq!(ids(s.primary()), vec!["B"]);
        assert_eq!(ids(s.secondary()), vec!["A", "C", "D"]);
    }

    #[test]
    fn swap_reinserts_displaced_at_vacated_index() {
        let s = start().transfer(Slot::secondary(2), Slot::primary(0));
        assert_eq!(ids(s.primary()), vec!["D"]);
        assert_eq!(ids(s.secondary()), vec!["B", "C", "A"]);
    }

    #[test]
    fn swap_accepts_append_index_on_primary() {
        // Index 1 equals the primary length, so the drop is in range and
        // still lands at index 0.
        let s = start().transfer(Slot::secondary(1), Slot::primary(1));
        assert_eq!(ids(s.primary()), vec!["C"]);
        assert_eq!(ids(s.secondary()), vec!["B", "A", "D"]);
    }

    // -----------------------------------------------------------------------
    // Primary -> secondary empties the primary
    // -----------------------------------------------------------------------
    #[test]
    fn primary_to_secondary_inserts_at_destination() {
        let s = start().transfer(Slot::primary(0), Slot::secondary(1));
        assert!(s.primary().is_empty());
        assert_eq!(ids(s.secondary()), vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn primary_to_secondary_append() {
        let s = start().transfer(Slot::primary(0), Slot::secondary(3));
        assert_eq!(ids(s.secondary()), vec!["B", "C", "D", "A"]);
    }

    // -----------------------------------------------------------------------
    // Empty primary fills without a swap
    // -----------------------------------------------------------------------
    #[test]
    fn drop_on_empty_primary_fills() {
        let emptied = start().transfer(Slot::primary(0), Slot::secondary(1));
        let s = emptied.transfer(Slot::secondary(0), Slot::primary(0));
        assert_eq!(ids(s.primary()), vec!["B"]);
        assert_eq!(ids(s.secondary()), vec!["A", "C", "D"]);
    }

    #[test]
    fn empty_primary_rejects_index_past_end() {
        let emptied = start().transfer(Slot::primary(0), Slot::secondary(0));
        let s = emptied.transfer(Slot::secondary(0), Slot::primary(1));
        assert_eq!(s, emptied);
    }

    // -----------------------------------------------------------------------
    // Reorder-in-place
    // -----------------------------------------------------------------------
    #[test]
    fn reorder_moves_forward() {
        let s = start().reorder(BucketId::Secondary, 0, 2);
        assert_eq!(ids(s.secondary()), vec!["C", "D", "B"]);
        assert_eq!(ids(s.primary()), vec!["A"]);
    }

    #[test]
    fn reorder_moves_backward() {
        let s = start().reorder(BucketId::Secondary, 2, 0);
        assert_eq!(ids(s.secondary()), vec!["D", "B", "C"]);
    }

    #[test]
    fn same_bucket_transfer_delegates_to_reorder() {
        let s = start().transfer(Slot::secondary(0), Slot::secondary(2));
        assert_eq!(ids(s.secondary()), vec!["C", "D", "B"]);
    }

    #[test]
    fn reorder_rejects_append_index() {
        // Reorder is strict: `to == len` is out of range.
        let before = start();
        assert_eq!(before.reorder(BucketId::Secondary, 0, 3), before);
    }

    #[test]
    fn primary_reorder_onto_itself_is_identity() {
        let before = start();
        let after = before.reorder(BucketId::Primary, 0, 0);
        assert_eq!(after, before);
        assert!(!after.changed(&before));
    }

    // -----------------------------------------------------------------------
    // Out-of-range coordinates are no-ops
    // -----------------------------------------------------------------------
    #[test]
    fn out_of_range_source_is_noop() {
        let before = start();
        assert_eq!(before.transfer(Slot::secondary(3), Slot::primary(0)), before);
        assert_eq!(before.transfer(Slot::primary(1), Slot::secondary(0)), before);
    }

    #[test]
    fn out_of_range_destination_is_noop() {
        let before = start();
        assert_eq!(before.transfer(Slot::primary(0), Slot::secondary(4)), before);
        assert_eq!(before.transfer(Slot::secondary(0), Slot::primary(2)), before);
    }

    #[test]
    fn huge_indices_are_noops() {
        let before = start();
        assert_eq!(before.reorder(BucketId::Secondary, usize::MAX, 0), before);
        assert_eq!(
            before.transfer(Slot::secondary(0), Slot::primary(usize::MAX)),
            before
        );
    }

    #[test]
    fn transfer_from_empty_session_is_noop() {
        let empty = Session::init(Vec::new());
        assert_eq!(empty.transfer(Slot::primary(0), Slot::secondary(0)), empty);
    }

    #[test]
    fn transfer_does_not_touch_original() {
        let before = start();
        let _after = before.transfer(Slot::secondary(0), Slot::primary(0));
        assert_eq!(ids(before.primary()), vec!["A"]);
        assert_eq!(ids(before.secondary()), vec!["B", "C", "D"]);
    }

    #[test]
    fn payload_travels_with_item() {
        let mut items = vec![Item::named("A"), Item::named("B")];
        items[1].payload = serde_json::json!({"name": "Bravo"});
        let s = Session::init(items).transfer(Slot::secondary(0), Slot::primary(0));
        assert_eq!(s.primary()[0].label(), "Bravo");
    }
}

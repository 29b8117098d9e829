//! Foundation types for Mergebay.
//!
//! This crate provides the identity and structural types shared by the
//! selection engine and the commit coordinator. Every other Mergebay crate
//! depends on `mergebay-types`.
//!
//! # Key Types
//!
//! - [`ItemId`] -- Stable unique identifier of a candidate record
//! - [`Item`] -- A candidate record: an id plus an opaque display payload
//! - [`BucketId`] -- Names one of the two buckets of a merge session
//! - [`EntityKind`] -- The kind of record being deduplicated (customer, vendor)
//! - [`HistoryRecord`] -- One entry of a record's informational history

pub mod bucket;
pub mod error;
pub mod history;
pub mod item;

pub use bucket::{BucketId, EntityKind};
pub use error::TypeError;
pub use history::HistoryRecord;
pub use item::{ensure_unique, parse_items, Item, ItemId};

//! Dual-bucket selection engine for Mergebay.
//!
//! A merge session holds two ordered buckets: the *primary* bucket, which can
//! hold at most one record (the survivor), and the *secondary* bucket, which
//! holds the records that will be merged into it. Users rearrange the buckets
//! with drag gestures; this crate computes the next session for every gesture.
//!
//! # Architecture
//!
//! - **Sessions are values.** Every operation takes `&Session` and returns a
//!   new [`Session`]. The swap that happens when a record is dropped onto an
//!   occupied primary bucket is therefore a single transition: no caller can
//!   observe a half-applied swap.
//! - **Malformed gestures are no-ops.** Drag libraries report stale or
//!   out-of-range coordinates mid-animation. Such gestures return an
//!   unchanged session and are logged at `debug` level; they are never errors.
//! - **Reversal is column-agnostic.** Clicking any allowed sort affordance
//!   reverses the secondary bucket as a whole.
//!
//! # Modules
//!
//! - [`session`] -- [`Session`] and its invariants
//! - [`transfer`] -- reorder-in-place and cross-bucket transfer
//! - [`reversal`] -- secondary order reversal and the [`SortTriggers`] allow-list
//! - [`gesture`] -- [`Gesture`] values and the pure [`Session::apply`] reducer

pub mod gesture;
pub mod reversal;
pub mod session;
pub mod transfer;

pub use gesture::{DragGesture, Gesture};
pub use reversal::SortTriggers;
pub use session::Session;
pub use transfer::Slot;

pub use mergebay_types::{BucketId, Item, ItemId};

//! Interfaces to the collaborators outside the selection engine.
//!
//! Any backend (HTTP client, database, in-memory fixture) implements these
//! traits. The engine only ever reads through them; nothing here touches
//! bucket state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use mergebay_types::{EntityKind, HistoryRecord, Item, ItemId};

use crate::error::ApiError;

/// A fully specified merge, built from the session at commit time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Which kind of record is being merged.
    pub entity: EntityKind,
    /// The surviving record.
    pub primary_id: ItemId,
    /// Records merged into the primary, in bucket order.
    pub secondary_ids: Vec<ItemId>,
    /// Session generation this request was prepared from.
    #[serde(skip)]
    pub generation: u64,
}

/// Supplies the ordered candidates when a merge dialog opens.
#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn candidates(&self, entity: EntityKind) -> Result<Vec<Item>, ApiError>;
}

/// Performs the irreversible merge.
///
/// Called exactly once per confirmed commit. Implementations must not retry
/// on their own; the user decides whether to try again.
#[async_trait]
pub trait MergeCommitApi: Send + Sync {
    async fn merge(&self, request: &MergeRequest) -> Result<(), ApiError>;
}

/// Fetches a record's history for the informational side panel.
#[async_trait]
pub trait HistoryLookup: Send + Sync {
    async fn fetch_history(&self, item: &ItemId) -> Result<Vec<HistoryRecord>, ApiError>;
}

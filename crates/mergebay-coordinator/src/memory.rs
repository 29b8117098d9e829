//! In-memory collaborators for tests, demos, and the command-line driver.
//!
//! Each type implements one of the traits in [`crate::api`] with all data
//! behind a lock. Failures can be scripted so the error paths of the dialog
//! can be exercised without a network.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use tokio::sync::Notify;

use mergebay_types::{EntityKind, HistoryRecord, Item, ItemId};

use crate::api::{HistoryLookup, ItemSource, MergeCommitApi, MergeRequest};
use crate::error::ApiError;

fn poisoned<E: std::fmt::Display>(e: E) -> ApiError {
    ApiError::new(format!("lock poisoned: {e}"))
}

// ---------------------------------------------------------------------------
// InMemoryItemSource
// ---------------------------------------------------------------------------

/// Serves fixed candidate lists per entity kind.
#[derive(Debug, Default)]
pub struct InMemoryItemSource {
    candidates: RwLock<HashMap<EntityKind, Vec<Item>>>,
    failure: RwLock<Option<ApiError>>,
}

impl InMemoryItemSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidates served for `entity`.
    pub fn set_candidates(&self, entity: EntityKind, items: Vec<Item>) -> Result<(), ApiError> {
        self.candidates.write().map_err(poisoned)?.insert(entity, items);
        Ok(())
    }

    /// Make every subsequent call fail with `error` (or succeed again with `None`).
    pub fn set_failure(&self, error: Option<ApiError>) -> Result<(), ApiError> {
        *self.failure.write().map_err(poisoned)? = error;
        Ok(())
    }
}

#[async_trait]
impl ItemSource for InMemoryItemSource {
    async fn candidates(&self, entity: EntityKind) -> Result<Vec<Item>, ApiError> {
        if let Some(error) = self.failure.read().map_err(poisoned)?.clone() {
            return Err(error);
        }
        let candidates = self.candidates.read().map_err(poisoned)?;
        Ok(candidates.get(&entity).cloned().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// InMemoryMergeApi
// ---------------------------------------------------------------------------

/// Records merge requests instead of performing them.
///
/// Scripted failures are consumed in order, one per call. A paused API holds
/// every call until [`InMemoryMergeApi::release`] is invoked, which lets
/// tests observe the dialog while a commit is in flight.
#[derive(Debug, Default)]
pub struct InMemoryMergeApi {
    requests: Mutex<Vec<MergeRequest>>,
    failures: Mutex<VecDeque<ApiError>>,
    paused: bool,
    gate: Notify,
}

impl InMemoryMergeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// An API whose calls block until released.
    pub fn paused() -> Self {
        Self {
            paused: true,
            ..Self::default()
        }
    }

    /// Let one held call (current or next) proceed.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    /// Queue a failure for a future call.
    pub fn fail_next(&self, message: impl Into<String>) -> Result<(), ApiError> {
        self.failures
            .lock()
            .map_err(poisoned)?
            .push_back(ApiError::new(message));
        Ok(())
    }

    /// Every request received so far, including failed ones.
    pub fn requests(&self) -> Vec<MergeRequest> {
        self.requests
            .lock()
            .map(|r| r.to_vec())
            .unwrap_or_default()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl MergeCommitApi for InMemoryMergeApi {
    async fn merge(&self, request: &MergeRequest) -> Result<(), ApiError> {
        self.requests.lock().map_err(poisoned)?.push(request.clone());
        if self.paused {
            self.gate.notified().await;
        }
        let failure = self.failures.lock().map_err(poisoned)?.pop_front();
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// InMemoryHistory
// ---------------------------------------------------------------------------

/// Serves history records keyed by item id.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    records: RwLock<HashMap<ItemId, Vec<HistoryRecord>>>,
    failure: RwLock<Option<ApiError>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, record: HistoryRecord) -> Result<(), ApiError> {
        self.records
            .write()
            .map_err(poisoned)?
            .entry(record.item.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    pub fn set_failure(&self, error: Option<ApiError>) -> Result<(), ApiError> {
        *self.failure.write().map_err(poisoned)? = error;
        Ok(())
    }
}

#[async_trait]
impl HistoryLookup for InMemoryHistory {
    async fn fetch_history(&self, item: &ItemId) -> Result<Vec<HistoryRecord>, ApiError> {
        if let Some(error) = self.failure.read().map_err(poisoned)?.clone() {
            return Err(error);
        }
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(item).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> MergeRequest {
        MergeRequest {
            entity: EntityKind::Customer,
            primary_id: ItemId::new("A").unwrap(),
            secondary_ids: vec![ItemId::new("B").unwrap()],
            generation: 1,
        }
    }

    #[tokio::test]
    async fn source_serves_per_entity() {
        let source = InMemoryItemSource::new();
        source
            .set_candidates(EntityKind::Vendor, vec![Item::named("v1")])
            .unwrap();
        assert_eq!(source.candidates(EntityKind::Vendor).await.unwrap().len(), 1);
        assert!(source.candidates(EntityKind::Customer).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn source_scripted_failure() {
        let source = InMemoryItemSource::new();
        source.set_failure(Some(ApiError::new("offline"))).unwrap();
        let err = source.candidates(EntityKind::Customer).await.unwrap_err();
        assert_eq!(err.message, "offline");
    }

    #[tokio::test]
    async fn merge_api_records_and_fails_in_order() {
        let api = InMemoryMergeApi::new();
        api.fail_next("conflict").unwrap();
        assert_eq!(api.merge(&request()).await.unwrap_err().message, "conflict");
        api.merge(&request()).await.unwrap();
        assert_eq!(api.call_count(), 2);
        assert_eq!(api.requests()[0].primary_id.as_str(), "A");
    }

    #[tokio::test]
    async fn paused_api_waits_for_release() {
        let api = InMemoryMergeApi::paused();
        api.release();
        // The stored permit lets the call through.
        api.merge(&request()).await.unwrap();
    }

    #[tokio::test]
    async fn history_returns_records_for_item() {
        let history = InMemoryHistory::new();
        let id = ItemId::new("c1").unwrap();
        history
            .push(HistoryRecord::new(id.clone(), chrono::Utc::now(), "created"))
            .unwrap();
        assert_eq!(history.fetch_history(&id).await.unwrap().len(), 1);
        let other = ItemId::new("c2").unwrap();
        assert!(history.fetch_history(&other).await.unwrap().is_empty());
    }
}

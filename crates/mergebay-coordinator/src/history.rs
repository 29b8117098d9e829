//! The informational history side panel.

use std::sync::Arc;

use tracing::warn;

use mergebay_types::{HistoryRecord, ItemId};

use crate::api::HistoryLookup;
use crate::config::DialogConfig;

/// Fetches history for the item the user is inspecting.
///
/// Lookup failures degrade to an empty list. The panel never reads or
/// writes bucket state, so nothing here can block a commit.
pub struct HistoryPanel {
    lookup: Arc<dyn HistoryLookup>,
    limit: usize,
}

impl HistoryPanel {
    pub fn new(lookup: Arc<dyn HistoryLookup>, limit: usize) -> Self {
        Self { lookup, limit }
    }

    /// A panel limited to the configured `history_limit`.
    pub fn from_config(lookup: Arc<dyn HistoryLookup>, config: &DialogConfig) -> Self {
        Self::new(lookup, config.history_limit)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// History for `item`, newest first, at most `limit` entries.
    pub async fn history_for(&self, item: &ItemId) -> Vec<HistoryRecord> {
        match self.lookup.fetch_history(item).await {
            Ok(mut records) => {
                records.sort_by(|a, b| b.at.cmp(&a.at));
                records.truncate(self.limit);
                records
            }
            Err(error) => {
                warn!(%item, %error, "history lookup failed; showing empty history");
                Vec::new()
            }
        }
    }
}

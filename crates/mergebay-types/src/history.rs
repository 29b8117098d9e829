use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::item::ItemId;

/// One entry in a record's history, shown in the merge dialog's side panel.
///
/// History is informational only; nothing in the engine reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// The record this entry belongs to.
    pub item: ItemId,
    /// When the change happened.
    pub at: DateTime<Utc>,
    /// Short description of the change (e.g. "invoice created").
    pub action: String,
    /// Who made the change, when known.
    #[serde(default)]
    pub actor: Option<String>,
    /// Free-form detail attached by the backend.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub detail: Value,
}

impl HistoryRecord {
    pub fn new(item: ItemId, at: DateTime<Utc>, action: impl Into<String>) -> Self {
        Self {
            item,
            at,
            action: action.into(),
            actor: None,
            detail: Value::Null,
        }
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn builder_sets_actor() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let rec = HistoryRecord::new(ItemId::new("v1").unwrap(), at, "renamed").with_actor("ops");
        assert_eq!(rec.actor.as_deref(), Some("ops"));
        assert_eq!(rec.action, "renamed");
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let rec: HistoryRecord =
            serde_json::from_str(r#"{"item":"c1","at":"2024-01-02T03:04:05Z","action":"created"}"#)
                .unwrap();
        assert_eq!(rec.item.as_str(), "c1");
        assert!(rec.actor.is_none());
        assert!(rec.detail.is_null());
    }
}

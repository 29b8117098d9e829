use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use mergebay_engine::SortTriggers;
use mergebay_types::EntityKind;

use crate::error::{CoordinatorError, CoordinatorResult};

/// Configuration for a merge dialog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Maximum time to wait for the merge API, in milliseconds.
    ///
    /// `None` waits indefinitely, which is the historical behavior. When set,
    /// an overdue commit is reported as a failure and the session is kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_timeout_ms: Option<u64>,
    /// Maximum number of history records shown in the side panel.
    pub history_limit: usize,
    /// Sort trigger identifiers allowed per entity kind.
    pub sort_triggers: SortTriggerConfig,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            commit_timeout_ms: None,
            history_limit: 50,
            sort_triggers: SortTriggerConfig::default(),
        }
    }
}

impl DialogConfig {
    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> CoordinatorResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| CoordinatorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> CoordinatorResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> CoordinatorResult<String> {
        toml::to_string_pretty(self).map_err(|e| CoordinatorError::Config(e.to_string()))
    }

    pub fn validate(&self) -> CoordinatorResult<()> {
        if self.commit_timeout_ms == Some(0) {
            return Err(CoordinatorError::Config(
                "commit_timeout_ms must be positive; omit it to wait indefinitely".into(),
            ));
        }
        if self.history_limit == 0 {
            return Err(CoordinatorError::Config("history_limit must be positive".into()));
        }
        Ok(())
    }

    pub fn commit_timeout(&self) -> Option<Duration> {
        self.commit_timeout_ms.map(Duration::from_millis)
    }

    /// The sort trigger allow-list for `entity`.
    pub fn triggers_for(&self, entity: EntityKind) -> &SortTriggers {
        match entity {
            EntityKind::Customer => &self.sort_triggers.customer,
            EntityKind::Vendor => &self.sort_triggers.vendor,
        }
    }
}

/// Per-entity allow-lists of sort trigger identifiers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortTriggerConfig {
    pub customer: SortTriggers,
    pub vendor: SortTriggers,
}

impl Default for SortTriggerConfig {
    fn default() -> Self {
        Self {
            customer: SortTriggers::new(["name", "email", "phone", "balance"]),
            vendor: SortTriggers::new(["name", "email", "phone", "company"]),
        }
    }
}

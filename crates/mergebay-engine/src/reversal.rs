//! Secondary order reversal.
//!
//! Sort affordances in the merge dialog do not sort by the clicked column.
//! Any allowed trigger reverses the secondary bucket as a whole, so applying
//! a trigger twice restores the previous order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use mergebay_types::BucketId;

use crate::session::Session;

/// Allow-list of sort trigger identifiers for one entity kind.
///
/// An empty list admits every trigger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortTriggers {
    allowed: Vec<String>,
}

impl SortTriggers {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// An allow-list that admits every trigger.
    pub fn any() -> Self {
        Self::default()
    }

    /// Whether `trigger` may reverse the secondary bucket.
    pub fn admits(&self, trigger: &str) -> bool {
        self.allowed.is_empty() || self.allowed.iter().any(|t| t == trigger)
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }
}

impl Session {
    /// Reverse the order of the secondary bucket. The primary is untouched.
    pub fn reverse_secondary(&self) -> Session {
        let mut next = self.clone();
        next.bucket_mut(BucketId::Secondary).reverse();
        next
    }

    /// Reverse the secondary bucket if `trigger` is admitted by `triggers`.
    pub fn sort_by_trigger(&self, trigger: &str, triggers: &SortTriggers) -> Session {
        if !triggers.admits(trigger) {
            debug!(trigger, "sort ignored: trigger not allowed");
            return self.clone();
        }
        debug!(trigger, "secondary order reversed");
        self.reverse_secondary()
    }
}

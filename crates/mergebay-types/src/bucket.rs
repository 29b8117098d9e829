use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Names one of the two buckets of a merge session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketId {
    /// The capacity-1 bucket holding the record others are merged into.
    Primary,
    /// The unbounded bucket holding the records that will be merged away.
    Secondary,
}

impl BucketId {
    /// Maximum number of items the bucket may hold, `None` if unbounded.
    pub fn capacity(self) -> Option<usize> {
        match self {
            Self::Primary => Some(1),
            Self::Secondary => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "primary" | "p" => Ok(Self::Primary),
            "secondary" | "s" => Ok(Self::Secondary),
            other => Err(TypeError::UnknownBucket(other.to_string())),
        }
    }
}

/// The kind of record a merge dialog deduplicates.
///
/// The kind selects the sort-trigger allow-list and is forwarded to the merge
/// API so the backend can route to the right endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Customer,
    Vendor,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vendor => "vendor",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "customer" | "customers" => Ok(Self::Customer),
            "vendor" | "vendors" => Ok(Self::Vendor),
            other => Err(TypeError::UnknownEntityKind(other.to_string())),
        }
    }
}

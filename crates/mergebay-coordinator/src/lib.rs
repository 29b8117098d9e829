//! Merge dialog coordinator for Mergebay.
//!
//! Wraps the pure selection engine with everything a merge dialog needs
//! around it: opening and replacing sessions from an item source, routing
//! gestures, gating and submitting the merge, and the history side panel.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use mergebay_coordinator::{DialogConfig, InMemoryMergeApi, MergeDialog};
//! use mergebay_engine::{Gesture, Slot};
//! use mergebay_types::{EntityKind, Item};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let api = Arc::new(InMemoryMergeApi::new());
//! let dialog = MergeDialog::new(EntityKind::Customer, DialogConfig::default(), api.clone());
//! dialog.open(vec![Item::named("A"), Item::named("B"), Item::named("C")]).unwrap();
//! dialog.apply(&Gesture::drag(Slot::secondary(0), Slot::primary(0)));
//!
//! let outcome = dialog.commit_with(|_request| true).await;
//! assert!(outcome.is_committed());
//! assert_eq!(api.requests()[0].primary_id.as_str(), "B");
//! # });
//! ```
//!
//! # Modules
//!
//! - [`api`] -- Collaborator traits: [`ItemSource`], [`MergeCommitApi`], [`HistoryLookup`]
//! - [`dialog`] -- [`MergeDialog`] and [`CommitOutcome`]
//! - [`history`] -- [`HistoryPanel`]
//! - [`config`] -- [`DialogConfig`]
//! - [`memory`] -- In-memory collaborators for tests and demos
//! - [`error`] -- [`CoordinatorError`] and [`ApiError`]

pub mod api;
pub mod config;
pub mod dialog;
pub mod error;
pub mod history;
pub mod memory;

pub use api::{HistoryLookup, ItemSource, MergeCommitApi, MergeRequest};
pub use config::{DialogConfig, SortTriggerConfig};
pub use dialog::{CommitOutcome, MergeDialog};
pub use error::{ApiError, CoordinatorError, CoordinatorResult};
pub use history::HistoryPanel;
pub use memory::{InMemoryHistory, InMemoryItemSource, InMemoryMergeApi};

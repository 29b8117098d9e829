//! The merge dialog: session lifecycle plus the gated, single-flight commit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use mergebay_engine::{Gesture, Session};
use mergebay_types::{ensure_unique, EntityKind, Item};

use crate::api::{HistoryLookup, ItemSource, MergeCommitApi, MergeRequest};
use crate::config::DialogConfig;
use crate::error::{ApiError, CoordinatorError, CoordinatorResult};
use crate::history::HistoryPanel;

// ---------------------------------------------------------------------------
// CommitOutcome
// ---------------------------------------------------------------------------

/// What happened to a commit attempt.
///
/// None of these are errors: every outcome leaves the dialog in a state the
/// user can act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The merge API accepted the merge; the session has been closed.
    Committed,
    /// Commit is not available: no session, no primary, or no secondaries.
    Disabled,
    /// The user declined the confirmation prompt.
    Declined,
    /// Another commit is still outstanding; this attempt was refused.
    InFlight,
    /// The request no longer describes the live session.
    Stale,
    /// The merge API rejected the merge or timed out. The session is kept.
    Failed { message: String },
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }
}

// ---------------------------------------------------------------------------
// MergeDialog
// ---------------------------------------------------------------------------

struct DialogState {
    session: Option<Session>,
    generation: u64,
}

/// Clears the in-flight flag when a commit finishes or its future is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Hosts at most one merge session for one entity kind and coordinates its
/// commit.
///
/// Gestures and lifecycle calls are synchronous. [`MergeDialog::confirm`] is
/// the only suspension point; while it is outstanding further commits are
/// refused with [`CommitOutcome::InFlight`] and gestures are ignored, so the
/// submitted request always equals the live session.
pub struct MergeDialog {
    entity: EntityKind,
    config: DialogConfig,
    api: Arc<dyn MergeCommitApi>,
    state: RwLock<DialogState>,
    committing: AtomicBool,
}

impl MergeDialog {
    /// Create a closed dialog. Call [`MergeDialog::open`] to start a session.
    pub fn new(entity: EntityKind, config: DialogConfig, api: Arc<dyn MergeCommitApi>) -> Self {
        Self {
            entity,
            config,
            api,
            state: RwLock::new(DialogState {
                session: None,
                generation: 0,
            }),
            committing: AtomicBool::new(false),
        }
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    // ---- Lifecycle ----

    /// Start a fresh session from `items`, replacing any existing one.
    ///
    /// The candidates must have unique, non-empty ids.
    pub fn open(&self, items: Vec<Item>) -> CoordinatorResult<Session> {
        ensure_unique(&items)?;
        let session = Session::init(items);
        let mut state = self.write_state();
        state.generation += 1;
        state.session = Some(session.clone());
        info!(
            entity = %self.entity,
            generation = state.generation,
            items = session.len(),
            "merge session opened"
        );
        Ok(session)
    }

    /// Replace the session after the caller's selection changed.
    pub fn reload(&self, items: Vec<Item>) -> CoordinatorResult<Session> {
        self.open(items)
    }

    /// Load candidates from `source` and open a session with them.
    ///
    /// On failure the current state is left untouched.
    pub async fn open_from(&self, source: &dyn ItemSource) -> CoordinatorResult<Session> {
        let items = source
            .candidates(self.entity)
            .await
            .map_err(CoordinatorError::Source)?;
        self.open(items)
    }

    /// Close the dialog, discarding the session. Returns `true` if one was open.
    pub fn cancel(&self) -> bool {
        let closed = self.write_state().session.take().is_some();
        if closed {
            info!(entity = %self.entity, "merge session cancelled");
        }
        closed
    }

    // ---- Observation ----

    /// A copy of the live session, if any.
    pub fn snapshot(&self) -> Option<Session> {
        self.read_state().session.clone()
    }

    pub fn is_open(&self) -> bool {
        self.read_state().session.is_some()
    }

    /// Incremented every time a session is opened.
    pub fn generation(&self) -> u64 {
        self.read_state().generation
    }

    pub fn is_committing(&self) -> bool {
        self.committing.load(Ordering::Acquire)
    }

    /// Whether the commit action should be enabled.
    pub fn can_commit(&self) -> bool {
        !self.is_committing()
            && self
                .read_state()
                .session
                .as_ref()
                .is_some_and(Session::can_commit)
    }

    /// The history side panel, limited by this dialog's configuration.
    pub fn history_panel(&self, lookup: Arc<dyn HistoryLookup>) -> HistoryPanel {
        HistoryPanel::from_config(lookup, &self.config)
    }

    // ---- Gestures ----

    /// Apply a gesture to the live session and return the result.
    ///
    /// Returns `None` when no session is open. Gestures are ignored while a
    /// commit is in flight.
    pub fn apply(&self, gesture: &Gesture) -> Option<Session> {
        let mut state = self.write_state();
        let current = state.session.as_ref()?;
        if self.is_committing() {
            debug!(?gesture, "gesture ignored: commit in flight");
            return Some(current.clone());
        }
        let next = current.apply(gesture, self.config.triggers_for(self.entity));
        state.session = Some(next.clone());
        Some(next)
    }

    // ---- Commit ----

    /// Build the merge request for the live session, or `None` if commit is
    /// disabled.
    ///
    /// The request is shown to the user for confirmation and then passed to
    /// [`MergeDialog::confirm`].
    pub fn prepare_commit(&self) -> Option<MergeRequest> {
        if self.is_committing() {
            return None;
        }
        let state = self.read_state();
        let session = state.session.as_ref()?;
        if !session.can_commit() {
            return None;
        }
        let primary = session.primary_item()?;
        Some(MergeRequest {
            entity: self.entity,
            primary_id: primary.id.clone(),
            secondary_ids: session.secondary_ids(),
            generation: state.generation,
        })
    }

    /// Submit a confirmed merge request.
    ///
    /// Calls the merge API exactly once. On success the session is closed;
    /// on failure it is kept unchanged so the user can retry or cancel.
    pub async fn confirm(&self, request: &MergeRequest) -> CommitOutcome {
        if self
            .committing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("commit refused: another commit is in flight");
            return CommitOutcome::InFlight;
        }
        let _in_flight = InFlight(&self.committing);

        if let Some(refused) = self.check_request(request) {
            debug!(?refused, "commit refused");
            return refused;
        }

        info!(
            entity = %request.entity,
            primary = %request.primary_id,
            secondaries = request.secondary_ids.len(),
            "submitting merge"
        );

        let result = match self.config.commit_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.api.merge(request))
                .await
                .unwrap_or_else(|_| {
                    Err(ApiError::new(format!(
                        "merge timed out after {} ms",
                        limit.as_millis()
                    )))
                }),
            None => self.api.merge(request).await,
        };

        match result {
            Ok(()) => {
                let mut state = self.write_state();
                if state.generation == request.generation {
                    state.session = None;
                }
                info!(primary = %request.primary_id, "merge committed");
                CommitOutcome::Committed
            }
            Err(error) => {
                warn!(primary = %request.primary_id, %error, "merge failed; session kept");
                CommitOutcome::Failed {
                    message: error.message,
                }
            }
        }
    }

    /// Prepare, confirm with `confirm`, and submit in one call.
    pub async fn commit_with<F>(&self, confirm: F) -> CommitOutcome
    where
        F: FnOnce(&MergeRequest) -> bool,
    {
        let Some(request) = self.prepare_commit() else {
            return if self.is_committing() {
                CommitOutcome::InFlight
            } else {
                CommitOutcome::Disabled
            };
        };
        if !confirm(&request) {
            return CommitOutcome::Declined;
        }
        self.confirm(&request).await
    }

    /// Why `request` may not be submitted, if it may not.
    fn check_request(&self, request: &MergeRequest) -> Option<CommitOutcome> {
        let state = self.read_state();
        let Some(session) = state.session.as_ref() else {
            return Some(CommitOutcome::Disabled);
        };
        if !session.can_commit() {
            return Some(CommitOutcome::Disabled);
        }
        let current_primary = session.primary_item().map(|item| &item.id);
        if state.generation != request.generation
            || request.entity != self.entity
            || current_primary != Some(&request.primary_id)
            || session.secondary_ids() != request.secondary_ids
        {
            return Some(CommitOutcome::Stale);
        }
        None
    }

    fn read_state(&self) -> RwLockReadGuard<'_, DialogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, DialogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

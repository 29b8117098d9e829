//! Gestures as data, and the pure reducer that applies them.
//!
//! The UI layer translates drag-and-drop events and sort clicks into
//! [`Gesture`] values; [`Session::apply`] maps a session and a gesture to
//! the next session without touching any rendering or event system.

use serde::{Deserialize, Serialize};

use crate::reversal::SortTriggers;
use crate::session::Session;
use crate::transfer::Slot;

/// The result of a finished drag, as reported by a drag-and-drop library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragGesture {
    /// Where the item was picked up.
    pub source: Slot,
    /// Where it was dropped; `None` when released outside every bucket.
    pub destination: Option<Slot>,
}

impl DragGesture {
    pub fn new(source: Slot, destination: Slot) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    /// A drag released outside every bucket.
    pub fn cancelled(source: Slot) -> Self {
        Self {
            source,
            destination: None,
        }
    }
}

/// A user gesture that may rearrange a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gesture {
    /// A completed drag.
    Drag(DragGesture),
    /// A click on a sort affordance, named by its trigger identifier.
    Reverse { trigger: String },
}

impl Gesture {
    pub fn drag(source: Slot, destination: Slot) -> Self {
        Self::Drag(DragGesture::new(source, destination))
    }

    pub fn reverse(trigger: impl Into<String>) -> Self {
        Self::Reverse {
            trigger: trigger.into(),
        }
    }
}

impl From<DragGesture> for Gesture {
    fn from(drag: DragGesture) -> Self {
        Self::Drag(drag)
    }
}

impl Session {
    /// Compute the session that results from `gesture`.
    ///
    /// Gestures that cannot apply (dropped outside a bucket, stale indices,
    /// disallowed sort trigger) yield an equal session.
    pub fn apply(&self, gesture: &Gesture, triggers: &SortTriggers) -> Session {
        match gesture {
            Gesture::Drag(DragGesture {
                source,
                destination: Some(destination),
            }) => self.transfer(*source, *destination),
            Gesture::Drag(DragGesture {
                destination: None, ..
            }) => self.clone(),
            Gesture::Reverse { trigger } => self.sort_by_trigger(trigger, triggers),
        }
    }

    /// Fold a sequence of gestures over this session.
    pub fn apply_all<'a, I>(&self, gestures: I, triggers: &SortTriggers) -> Session
    where
        I: IntoIterator<Item = &'a Gesture>,
    {
        gestures
            .into_iter()
            .fold(self.clone(), |session, gesture| session.apply(gesture, triggers))
    }
}

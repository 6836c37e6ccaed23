//! Revision synchronization between registered actions and the document.
//!
//! A [`SyncTracker`] answers one question at repeat time: has anything that
//! the repeat machinery did not see changed the document since the last
//! action was registered? It does that by remembering the revision at
//! registration and carrying a synced/unsynced flag across the window
//! between "leave" and "enter" lifecycle events, during which the host may
//! bump the revision for reasons that do not count as edits (saving,
//! reloading, switching away and back).

use std::fmt;
use std::str::FromStr;

use crate::document::Revision;

/// Lifecycle notifications delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Focus moved away from the document
    LeaveDocument,
    /// The document is about to be written
    BeforeSave,
    /// The document is about to be re-read from disk
    BeforeReload,
    /// The document is being unloaded
    Unload,
    /// Focus moved to the document
    EnterDocument,
    /// The document finished being written
    AfterSave,
    /// The document content changed
    ContentChanged,
    /// The cursor moved (or an equivalent idle point was reached)
    CursorMoved,
}

/// How an event affects the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Leave,
    Enter,
    /// No transition; the event may still fire deferred tasks.
    Observe,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 8] = [
        LifecycleEvent::LeaveDocument,
        LifecycleEvent::BeforeSave,
        LifecycleEvent::BeforeReload,
        LifecycleEvent::Unload,
        LifecycleEvent::EnterDocument,
        LifecycleEvent::AfterSave,
        LifecycleEvent::ContentChanged,
        LifecycleEvent::CursorMoved,
    ];

    pub fn phase(self) -> EventPhase {
        match self {
            LifecycleEvent::LeaveDocument
            | LifecycleEvent::BeforeSave
            | LifecycleEvent::BeforeReload
            | LifecycleEvent::Unload => EventPhase::Leave,
            LifecycleEvent::EnterDocument | LifecycleEvent::AfterSave => EventPhase::Enter,
            LifecycleEvent::ContentChanged | LifecycleEvent::CursorMoved => EventPhase::Observe,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LifecycleEvent::LeaveDocument => "leave-document",
            LifecycleEvent::BeforeSave => "before-save",
            LifecycleEvent::BeforeReload => "before-reload",
            LifecycleEvent::Unload => "unload",
            LifecycleEvent::EnterDocument => "enter-document",
            LifecycleEvent::AfterSave => "after-save",
            LifecycleEvent::ContentChanged => "content-changed",
            LifecycleEvent::CursorMoved => "cursor-moved",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LifecycleEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LifecycleEvent::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| format!("unknown lifecycle event '{}'", s))
    }
}

/// Synchronization state of a document context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// Nothing repeatable is in sync with the document.
    #[default]
    Unsynced,
    /// Between a leave and an enter event, and in sync when we left.
    Synced,
    /// In sync as long as the document is still at this revision.
    At(Revision),
}

/// Tracks whether the registered action still matches the document.
#[derive(Debug, Clone, Default)]
pub struct SyncTracker {
    state: SyncState,
}

impl SyncTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// True when the last snapshot is exactly `current`.
    pub fn is_synced_at(&self, current: Revision) -> bool {
        self.state == SyncState::At(current)
    }

    /// Records `current` as the in-sync revision.
    pub fn snapshot(&mut self, current: Revision) {
        self.set(SyncState::At(current));
    }

    /// Folds the sync flag forward across a leave-type event.
    ///
    /// Consecutive leave events keep a `Synced` flag alive because the
    /// revision may already have moved after the first one.
    pub fn leave(&mut self, current: Revision) {
        let next = match self.state {
            SyncState::Synced => SyncState::Synced,
            SyncState::At(rev) if rev == current => SyncState::Synced,
            _ => SyncState::Unsynced,
        };
        self.set(next);
    }

    /// Re-anchors a `Synced` flag to the revision seen on entering.
    pub fn enter(&mut self, current: Revision) {
        if self.state == SyncState::Synced {
            self.set(SyncState::At(current));
        }
    }

    pub fn invalidate(&mut self) {
        self.set(SyncState::Unsynced);
    }

    /// Applies the transition for a lifecycle event.
    pub fn apply(&mut self, event: LifecycleEvent, current: Revision) {
        match event.phase() {
            EventPhase::Leave => self.leave(current),
            EventPhase::Enter => self.enter(current),
            EventPhase::Observe => {}
        }
    }

    fn set(&mut self, next: SyncState) {
        if next != self.state {
            tracing::trace!(from = ?self.state, to = ?next, "sync state");
        }
        self.state = next;
    }
}

//! Per-document repeat state.

use super::deferred::{DeferredPurpose, DeferredSlots};
use super::registers::RegisterName;
use super::repeat::{ActionRegistry, RepeatCount};
use super::sync::{LifecycleEvent, SyncTracker};
use crate::document::Revision;
use crate::input::KeySequence;

/// Everything the repeat machinery knows about one open document: the
/// registered action, its sync tracker, pending deferred resyncs, and the
/// message from the last failed repeat.
#[derive(Debug, Default)]
pub struct RepeatContext {
    registry: ActionRegistry,
    tracker: SyncTracker,
    deferred: DeferredSlots,
    last_error: Option<String>,
}

impl RepeatContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn tracker(&self) -> &SyncTracker {
        &self.tracker
    }

    pub fn deferred(&self) -> &DeferredSlots {
        &self.deferred
    }

    /// True when the registered action is still in sync with `current`.
    pub fn is_synced_at(&self, current: Option<Revision>) -> bool {
        current.is_some_and(|rev| self.tracker.is_synced_at(rev))
    }

    /// Declares `sequence` as the action to repeat.
    ///
    /// The revision is snapshot now and once more on the next cursor
    /// movement, for hosts that bump it only after the command returns.
    pub fn register(&mut self, sequence: KeySequence, count: RepeatCount, current: Option<Revision>) {
        tracing::debug!(sequence = %sequence, ?count, ?current, "register repeatable action");
        self.registry.register(sequence, count);
        self.deferred.cancel_all();
        match current {
            Some(rev) => {
                self.tracker.snapshot(rev);
                self.deferred.schedule(DeferredPurpose::AfterRegister);
            }
            None => self.tracker.invalidate(),
        }
    }

    pub fn associate_register(&mut self, sequence: KeySequence, register: RegisterName) {
        tracing::debug!(sequence = %sequence, %register, "associate register");
        self.registry.associate_register(sequence, register);
    }

    /// Marks nothing as repeatable. Returns an empty string so callers can
    /// splice the result into display-neutral output.
    pub fn invalidate(&mut self) -> String {
        tracing::debug!("invalidate repeatable action");
        self.deferred.cancel_all();
        self.tracker.invalidate();
        String::new()
    }

    /// Applies a lifecycle event and fires any deferred resync it triggers.
    pub fn notify(&mut self, event: LifecycleEvent, current: Option<Revision>) {
        let Some(rev) = current else {
            tracing::trace!(%event, "event for document without revision ignored");
            return;
        };

        self.tracker.apply(event, rev);
        for task in self.deferred.take_fired(event) {
            tracing::trace!(purpose = ?task.purpose, %event, %rev, "deferred resync fired");
            self.tracker.snapshot(rev);
        }
    }

    /// Schedules the undo/redo resync if `was_synced`, otherwise drops any
    /// pending one.
    pub(crate) fn settle_undo_redo(&mut self, was_synced: bool) {
        if was_synced {
            self.deferred.schedule(DeferredPurpose::AfterUndoRedo);
        } else {
            self.deferred.cancel(DeferredPurpose::AfterUndoRedo);
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub(crate) fn record_error(&mut self, message: String) {
        tracing::debug!(%message, "repeat failed");
        self.last_error = Some(message);
    }
}

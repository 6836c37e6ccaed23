//! One-shot resync tasks that wait for a later host event.
//!
//! Some host operations only advance the revision after the command that
//! caused them has returned. For those, the context parks a task that
//! re-snapshots the revision on the next matching event and then goes away.
//! There is at most one task per purpose; scheduling a new one drops the old.

use super::sync::LifecycleEvent;

/// Why a resync was deferred. Each purpose has its own slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredPurpose {
    /// Registration inside an operator-pending composition; the revision
    /// settles by the next cursor movement.
    AfterRegister,
    /// Undo or redo; the revision settles with the next content change.
    AfterUndoRedo,
}

impl DeferredPurpose {
    pub fn trigger(self) -> LifecycleEvent {
        match self {
            DeferredPurpose::AfterRegister => LifecycleEvent::CursorMoved,
            DeferredPurpose::AfterUndoRedo => LifecycleEvent::ContentChanged,
        }
    }
}

/// Handle identifying one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredTask {
    pub id: TaskId,
    pub purpose: DeferredPurpose,
}

impl DeferredTask {
    pub fn trigger(&self) -> LifecycleEvent {
        self.purpose.trigger()
    }
}

/// The pending tasks of one document context.
#[derive(Debug, Default)]
pub struct DeferredSlots {
    after_register: Option<DeferredTask>,
    after_undo_redo: Option<DeferredTask>,
    next_id: u64,
}

impl DeferredSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a task, cancelling any task already pending for `purpose`.
    pub fn schedule(&mut self, purpose: DeferredPurpose) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let replaced = self
            .slot_mut(purpose)
            .replace(DeferredTask { id, purpose });
        if let Some(old) = replaced {
            tracing::trace!(task = old.id.0, ?purpose, "deferred task replaced");
        }
        tracing::trace!(task = id.0, ?purpose, trigger = %purpose.trigger(), "deferred task scheduled");
        id
    }

    pub fn cancel(&mut self, purpose: DeferredPurpose) -> Option<DeferredTask> {
        let cancelled = self.slot_mut(purpose).take();
        if let Some(task) = cancelled {
            tracing::trace!(task = task.id.0, ?purpose, "deferred task cancelled");
        }
        cancelled
    }

    pub fn cancel_all(&mut self) {
        self.cancel(DeferredPurpose::AfterRegister);
        self.cancel(DeferredPurpose::AfterUndoRedo);
    }

    pub fn pending(&self, purpose: DeferredPurpose) -> Option<DeferredTask> {
        match purpose {
            DeferredPurpose::AfterRegister => self.after_register,
            DeferredPurpose::AfterUndoRedo => self.after_undo_redo,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.after_register.is_none() && self.after_undo_redo.is_none()
    }

    /// Removes and returns every task triggered by `event`.
    pub fn take_fired(&mut self, event: LifecycleEvent) -> Vec<DeferredTask> {
        let mut fired = Vec::new();
        for slot in [&mut self.after_register, &mut self.after_undo_redo] {
            if slot.is_some_and(|task| task.trigger() == event) {
                fired.extend(slot.take());
            }
        }
        fired
    }

    fn slot_mut(&mut self, purpose: DeferredPurpose) -> &mut Option<DeferredTask> {
        match purpose {
            DeferredPurpose::AfterRegister => &mut self.after_register,
            DeferredPurpose::AfterUndoRedo => &mut self.after_undo_redo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_replaces_same_purpose() {
        let mut slots = DeferredSlots::new();
        let first = slots.schedule(DeferredPurpose::AfterRegister);
        let second = slots.schedule(DeferredPurpose::AfterRegister);
        assert_ne!(first, second);
        assert_eq!(
            slots.pending(DeferredPurpose::AfterRegister).map(|t| t.id),
            Some(second)
        );
    }

    #[test]
    fn test_purposes_have_separate_slots() {
        let mut slots = DeferredSlots::new();
        slots.schedule(DeferredPurpose::AfterRegister);
        slots.schedule(DeferredPurpose::AfterUndoRedo);
        assert!(slots.pending(DeferredPurpose::AfterRegister).is_some());
        assert!(slots.pending(DeferredPurpose::AfterUndoRedo).is_some());
    }

    #[test]
    fn test_fires_once_on_matching_event() {
        let mut slots = DeferredSlots::new();
        slots.schedule(DeferredPurpose::AfterRegister);

        assert!(slots.take_fired(LifecycleEvent::ContentChanged).is_empty());
        assert_eq!(slots.take_fired(LifecycleEvent::CursorMoved).len(), 1);
        assert!(slots.take_fired(LifecycleEvent::CursorMoved).is_empty());
        assert!(slots.is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let mut slots = DeferredSlots::new();
        slots.schedule(DeferredPurpose::AfterRegister);
        slots.schedule(DeferredPurpose::AfterUndoRedo);
        slots.cancel_all();
        assert!(slots.is_empty());
        assert!(slots.take_fired(LifecycleEvent::CursorMoved).is_empty());
    }

    #[test]
    fn test_cancel_missing_is_none() {
        let mut slots = DeferredSlots::new();
        assert!(slots.cancel(DeferredPurpose::AfterUndoRedo).is_none());
    }
}

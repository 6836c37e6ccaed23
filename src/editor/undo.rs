//! Undo/redo that leaves the repeatable action alone.
//!
//! Undo and redo move the revision counter, which on its own would make the
//! next repeat look like it follows an untracked edit. Wrapping them carries
//! the sync flag across: if the action was in sync before the undo, it is
//! re-anchored to the revision the undo produces; if it was not, it stays out
//! of sync. The resync waits for the next content change because hosts do not
//! all apply the undo before the command returns.

use std::fmt;

use super::context::RepeatContext;
use super::error::RepeatError;
use crate::config::Config;
use crate::document::Revision;
use crate::host::Host;
use crate::input::{Feed, KeySequence, Remap};

/// The commands usually wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoRedo {
    Undo,
    Redo,
}

impl UndoRedo {
    pub fn keys(self) -> KeySequence {
        match self {
            UndoRedo::Undo => KeySequence::from("u"),
            UndoRedo::Redo => KeySequence::from("<C-R>"),
        }
    }
}

impl fmt::Display for UndoRedo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndoRedo::Undo => f.write_str("undo"),
            UndoRedo::Redo => f.write_str("redo"),
        }
    }
}

pub struct UndoRedoWrapper<'a> {
    config: &'a Config,
}

impl<'a> UndoRedoWrapper<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Runs `command` with `count` and carries the sync flag across it.
    ///
    /// Returns whether the context was in sync before the command. If the
    /// host rejects the command nothing is scheduled and the state is as it
    /// was. Once the command is queued the sync flag is carried across it even
    /// if the reveal keys that follow are rejected.
    pub fn wrap<H: Host>(
        &self,
        ctx: &mut RepeatContext,
        command: &KeySequence,
        count: u32,
        revision: Option<Revision>,
        host: &mut H,
    ) -> Result<bool, RepeatError> {
        let was_synced = ctx.is_synced_at(revision);
        let keys = KeySequence::count(count).then(command);
        tracing::debug!(keys = %keys, was_synced, "wrap undo/redo");

        host.feed(Feed::after(keys, Remap::NoRemap))?;
        ctx.settle_undo_redo(was_synced);

        if let Some(reveal) = self.config.reveal_keys() {
            if let Err(err) = host.feed(Feed::after(reveal, Remap::NoRemap)) {
                tracing::warn!("reveal after {}: {}", command, err);
            }
        }
        Ok(was_synced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentId;
    use crate::editor::deferred::DeferredPurpose;
    use crate::editor::repeat::RepeatCount;
    use crate::editor::sync::LifecycleEvent;
    use crate::host::SimulatedHost;

    #[test]
    fn test_undo_keys() {
        assert_eq!(UndoRedo::Undo.keys().as_str(), "u");
        assert_eq!(UndoRedo::Redo.keys().as_str(), "<C-R>");
    }

    #[test]
    fn test_synced_undo_resyncs_on_content_change() {
        let config = Config::default();
        let doc = DocumentId::new(1);
        let mut host = SimulatedHost::new();
        let rev = host.open(doc);
        let mut ctx = RepeatContext::new();
        ctx.register(KeySequence::from("X"), RepeatCount::None, Some(rev));

        let was_synced = UndoRedoWrapper::new(&config)
            .wrap(&mut ctx, &UndoRedo::Undo.keys(), 2, Some(rev), &mut host)
            .unwrap();
        assert!(was_synced);
        assert_eq!(host.pending().as_str(), "2u");

        let after = host.edit(doc);
        ctx.notify(LifecycleEvent::ContentChanged, after);
        assert!(ctx.is_synced_at(after));
    }

    #[test]
    fn test_unsynced_undo_stays_unsynced() {
        let config = Config::default();
        let doc = DocumentId::new(1);
        let mut host = SimulatedHost::new();
        let rev = host.open(doc);
        let mut ctx = RepeatContext::new();

        let was_synced = UndoRedoWrapper::new(&config)
            .wrap(&mut ctx, &UndoRedo::Redo.keys(), 0, Some(rev), &mut host)
            .unwrap();
        assert!(!was_synced);
        assert!(ctx.deferred().pending(DeferredPurpose::AfterUndoRedo).is_none());

        let after = host.edit(doc);
        ctx.notify(LifecycleEvent::ContentChanged, after);
        assert!(!ctx.is_synced_at(after));
    }

    #[test]
    fn test_reveal_keys_follow_command() {
        let config = Config {
            reveal_after_undo: Some("zv".to_string()),
            ..Config::default()
        };
        let doc = DocumentId::new(1);
        let mut host = SimulatedHost::new();
        let rev = host.open(doc);
        let mut ctx = RepeatContext::new();

        UndoRedoWrapper::new(&config)
            .wrap(&mut ctx, &UndoRedo::Undo.keys(), 0, Some(rev), &mut host)
            .unwrap();
        assert_eq!(host.pending().as_str(), "uzv");
    }

    #[test]
    fn test_rejected_undo_schedules_nothing() {
        let config = Config::default();
        let doc = DocumentId::new(1);
        let mut host = SimulatedHost::new();
        let rev = host.open(doc);
        let mut ctx = RepeatContext::new();
        ctx.register(KeySequence::from("X"), RepeatCount::None, Some(rev));
        host.reject_feeds(Some("locked".to_string()));

        let result = UndoRedoWrapper::new(&config).wrap(
            &mut ctx,
            &UndoRedo::Undo.keys(),
            0,
            Some(rev),
            &mut host,
        );
        assert!(result.is_err());
        assert!(ctx.deferred().pending(DeferredPurpose::AfterUndoRedo).is_none());
        assert!(ctx.is_synced_at(Some(rev)));
    }

    #[test]
    fn test_rejected_reveal_still_carries_sync() {
        let config = Config {
            reveal_after_undo: Some("zv".to_string()),
            ..Config::default()
        };
        let doc = DocumentId::new(1);
        let mut host = SimulatedHost::new();
        let rev = host.open(doc);
        let mut ctx = RepeatContext::new();
        ctx.register(KeySequence::from("X"), RepeatCount::None, Some(rev));
        host.reject_keys(KeySequence::from("zv"), "no folds here");

        let was_synced = UndoRedoWrapper::new(&config)
            .wrap(&mut ctx, &UndoRedo::Undo.keys(), 0, Some(rev), &mut host)
            .unwrap();
        assert!(was_synced);
        assert_eq!(host.pending().as_str(), "u");
        assert!(ctx.deferred().pending(DeferredPurpose::AfterUndoRedo).is_some());

        let after = host.edit(doc);
        ctx.notify(LifecycleEvent::ContentChanged, after);
        assert!(ctx.is_synced_at(after));
    }
}

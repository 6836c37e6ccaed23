//! Session-level entry points for command implementations.
//!
//! A [`SessionManager`] owns one [`RepeatContext`] per open document and
//! threads the configuration, the document id and the host through every
//! operation. Commands (register, repeat, undo/redo) create a context on
//! first use, so they may call in for documents the session has not seen
//! opened. Lifecycle events, register associations and invalidation for a
//! document without a context are ignored, so an event arriving after
//! [`SessionManager::close`] does not bring the document back.
//!
//! # Example
//!
//! ```
//! use repeatquill::config::Config;
//! use repeatquill::document::DocumentId;
//! use repeatquill::editor::registers::RegisterName;
//! use repeatquill::editor::repeat::RepeatCount;
//! use repeatquill::editor::session::SessionManager;
//! use repeatquill::host::SimulatedHost;
//! use repeatquill::input::KeySequence;
//!
//! let doc = DocumentId::new(1);
//! let mut host = SimulatedHost::new();
//! host.open(doc);
//! let mut session = SessionManager::new(Config::default());
//!
//! session.register(doc, KeySequence::from("<Plug>Swap"), RepeatCount::Times(2), &host);
//! let dispatch = session.repeat(doc, 0, RegisterName::Unnamed, &mut host).unwrap();
//! assert_eq!(dispatch.keys().as_str(), "2<Plug>Swap");
//! ```

use indexmap::IndexMap;

use super::context::RepeatContext;
use super::dispatch::{Dispatch, RepeatDispatcher, RepeatRequest};
use super::error::RepeatError;
use super::registers::RegisterName;
use super::repeat::RepeatCount;
use super::sync::LifecycleEvent;
use super::undo::UndoRedoWrapper;
use crate::config::Config;
use crate::document::{DocumentId, RevisionOracle};
use crate::host::Host;
use crate::input::KeySequence;

#[derive(Debug)]
pub struct SessionManager {
    config: Config,
    documents: IndexMap<DocumentId, RepeatContext>,
    last_sequence: Option<KeySequence>,
}

impl SessionManager {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            documents: IndexMap::new(),
            last_sequence: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Starts tracking a document. Opening an open document is a no-op.
    pub fn open(&mut self, doc: DocumentId) -> &mut RepeatContext {
        self.documents.entry(doc).or_default()
    }

    /// Stops tracking a document, dropping its pending deferred tasks.
    pub fn close(&mut self, doc: DocumentId) -> bool {
        let closed = self.documents.shift_remove(&doc).is_some();
        if closed {
            tracing::debug!(%doc, "closed document context");
        }
        closed
    }

    pub fn is_open(&self, doc: DocumentId) -> bool {
        self.documents.contains_key(&doc)
    }

    /// Open documents in the order they were opened.
    pub fn documents(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }

    pub fn context(&self, doc: DocumentId) -> Option<&RepeatContext> {
        self.documents.get(&doc)
    }

    /// The sequence most recently registered in any document.
    pub fn last_sequence(&self) -> Option<&KeySequence> {
        self.last_sequence.as_ref()
    }

    pub fn last_error(&self, doc: DocumentId) -> Option<&str> {
        self.documents.get(&doc).and_then(RepeatContext::last_error)
    }

    pub fn notify<O: RevisionOracle + ?Sized>(
        &mut self,
        doc: DocumentId,
        event: LifecycleEvent,
        oracle: &O,
    ) {
        let Some(ctx) = self.documents.get_mut(&doc) else {
            tracing::trace!(%doc, %event, "event for untracked document ignored");
            return;
        };
        ctx.notify(event, oracle.revision(doc));
    }

    /// Declares `sequence` as the command the repeat key replays in `doc`.
    pub fn register<O: RevisionOracle + ?Sized>(
        &mut self,
        doc: DocumentId,
        sequence: KeySequence,
        count: RepeatCount,
        oracle: &O,
    ) {
        let current = oracle.revision(doc);
        self.last_sequence = Some(sequence.clone());
        self.open(doc).register(sequence, count, current);
    }

    /// Declares the register that should be reused when `sequence` is repeated.
    pub fn associate_register(&mut self, doc: DocumentId, sequence: KeySequence, register: RegisterName) {
        match self.documents.get_mut(&doc) {
            Some(ctx) => ctx.associate_register(sequence, register),
            None => tracing::trace!(%doc, "association for untracked document ignored"),
        }
    }

    /// Marks the action in `doc` as out of sync. Returns the empty string so
    /// it can be spliced into a key mapping.
    pub fn invalidate(&mut self, doc: DocumentId) -> String {
        self.documents
            .get_mut(&doc)
            .map(RepeatContext::invalidate)
            .unwrap_or_default()
    }

    /// Handles the repeat key in `doc`.
    pub fn repeat<H: Host>(
        &mut self,
        doc: DocumentId,
        count: u32,
        register: RegisterName,
        host: &mut H,
    ) -> Result<Dispatch, RepeatError> {
        let request = RepeatRequest {
            count,
            register,
            revision: host.revision(doc),
        };
        let ctx = self.documents.entry(doc).or_default();
        RepeatDispatcher::new(&self.config).run(ctx, &request, host)
    }

    /// Runs an undo or redo command in `doc` without disturbing the
    /// repeatable action. Returns whether the action was in sync before.
    pub fn wrap_undo_redo<H: Host>(
        &mut self,
        doc: DocumentId,
        command: &KeySequence,
        count: u32,
        host: &mut H,
    ) -> Result<bool, RepeatError> {
        let revision = host.revision(doc);
        let ctx = self.documents.entry(doc).or_default();
        UndoRedoWrapper::new(&self.config).wrap(ctx, command, count, revision, host)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

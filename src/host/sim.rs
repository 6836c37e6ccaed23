//! In-memory host used by the CLI simulator and the tests.

use indexmap::IndexMap;

use super::{Host, HostError};
use crate::document::{DocumentId, Revision, RevisionCounter, RevisionOracle};
use crate::input::{Feed, KeySequence, Placement};

/// A host that keeps revision counters and a pending-input buffer.
///
/// Fed keys are not interpreted; they are logged and spliced into the
/// pending buffer according to their placement.
#[derive(Debug, Default)]
pub struct SimulatedHost {
    documents: IndexMap<DocumentId, RevisionCounter>,
    pending: KeySequence,
    expression: String,
    fed: Vec<Feed>,
    reject: Option<String>,
    reject_keys: IndexMap<KeySequence, String>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a document at revision 1. Reopening keeps the existing counter.
    pub fn open(&mut self, doc: DocumentId) -> Revision {
        self.documents.entry(doc).or_default().current()
    }

    pub fn open_at(&mut self, doc: DocumentId, revision: u64) -> Revision {
        let counter = RevisionCounter::starting_at(revision);
        let current = counter.current();
        self.documents.insert(doc, counter);
        current
    }

    pub fn close(&mut self, doc: DocumentId) -> bool {
        self.documents.shift_remove(&doc).is_some()
    }

    /// Mutates a document, returning its new revision.
    pub fn edit(&mut self, doc: DocumentId) -> Option<Revision> {
        self.documents.get_mut(&doc).map(RevisionCounter::bump)
    }

    pub fn set_expression(&mut self, source: impl Into<String>) {
        self.expression = source.into();
    }

    /// Queues keys as if the user typed them ahead of time.
    pub fn type_keys(&mut self, keys: &KeySequence) {
        self.pending.push(keys);
    }

    pub fn pending(&self) -> &KeySequence {
        &self.pending
    }

    /// Drains the pending input.
    pub fn flush(&mut self) -> KeySequence {
        std::mem::take(&mut self.pending)
    }

    /// Every feed accepted so far, in order.
    pub fn fed(&self) -> &[Feed] {
        &self.fed
    }

    /// Makes subsequent feeds fail with `reason`, or accepts them again on `None`.
    pub fn reject_feeds(&mut self, reason: Option<String>) {
        self.reject = reason;
    }

    /// Makes feeds whose keys equal `keys` fail with `reason`.
    pub fn reject_keys(&mut self, keys: KeySequence, reason: impl Into<String>) {
        self.reject_keys.insert(keys, reason.into());
    }
}

impl RevisionOracle for SimulatedHost {
    fn revision(&self, doc: DocumentId) -> Option<Revision> {
        self.documents.get(&doc).map(RevisionCounter::current)
    }
}

impl Host for SimulatedHost {
    fn expression_register(&self) -> String {
        self.expression.clone()
    }

    fn feed(&mut self, feed: Feed) -> Result<(), HostError> {
        let keys = feed.keys();
        if let Some(reason) = self.reject.as_ref().or_else(|| self.reject_keys.get(&keys)) {
            return Err(HostError::FeedRejected {
                keys,
                reason: reason.clone(),
            });
        }

        tracing::trace!(%feed, "host feed");
        self.pending = match feed.placement {
            Placement::AheadOfPending => keys.then(&self.pending),
            Placement::AfterPending => self.pending.then(&keys),
        };
        self.fed.push(feed);
        Ok(())
    }
}

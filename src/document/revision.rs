use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies an open document within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(u64);

impl DocumentId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A document revision as reported by the host.
///
/// Hosts start counting at 1 and never hand out 0, but nothing here relies on
/// that: the synchronization states that used to be encoded as reserved
/// integers live in their own enum variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Revision(u64);

impl Revision {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Returns the revision that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Source of the current revision of a document.
///
/// Returns `None` for documents the host does not know about; callers treat
/// that the same as an unsynchronized document.
pub trait RevisionOracle {
    fn revision(&self, doc: DocumentId) -> Option<Revision>;
}

/// Monotonic per-document revision counter.
///
/// Starts at revision 1 and advances by one on every [`bump`](Self::bump).
#[derive(Debug, Clone)]
pub struct RevisionCounter {
    current: Revision,
}

impl RevisionCounter {
    pub fn new() -> Self {
        Self {
            current: Revision::new(1),
        }
    }

    /// Creates a counter that starts at a given revision.
    ///
    /// A starting value of 0 is lifted to 1.
    pub fn starting_at(value: u64) -> Self {
        Self {
            current: Revision::new(value.max(1)),
        }
    }

    pub fn current(&self) -> Revision {
        self.current
    }

    /// Records a content mutation and returns the new revision.
    pub fn bump(&mut self) -> Revision {
        self.current = self.current.next();
        self.current
    }
}

impl Default for RevisionCounter {
    fn default() -> Self {
        Self::new()
    }
}

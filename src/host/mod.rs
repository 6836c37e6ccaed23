//! The host editor as seen by the repeat machinery.
//!
//! A host supplies document revisions, the source text of the expression
//! register, and a way to push keys back into its input queue. Everything
//! else about the editor stays on the other side of this trait.

pub mod runner;
pub mod sim;

use thiserror::Error;

use crate::document::RevisionOracle;
use crate::input::{Feed, KeySequence};

pub use runner::ScriptRunner;
pub use sim::SimulatedHost;

/// Errors reported by a host when it cannot accept input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("host rejected input '{keys}': {reason}")]
    FeedRejected { keys: KeySequence, reason: String },
}

pub trait Host: RevisionOracle {
    /// The current (unevaluated) contents of the expression register.
    fn expression_register(&self) -> String;

    /// Inserts keys into the input queue as if typed.
    fn feed(&mut self, feed: Feed) -> Result<(), HostError>;
}

//! Repeat-last-change state machine.
//!
//! This module decides what the repeat key does. Command implementations
//! register themselves as the action to repeat; the host reports lifecycle
//! events; the repeat key either replays the registered action or falls back
//! to the host's native repeat.
//!
//! # Modules
//!
//! - `sync`: revision synchronization across lifecycle events
//! - `deferred`: one-shot resyncs waiting for a later event
//! - `repeat`: the registered action and its register association
//! - `registers`: register names and the default register
//! - `context`: all of the above for one document
//! - `dispatch`: replay-or-fallback decision for the repeat key
//! - `undo`: undo/redo wrapping
//! - `session`: per-document contexts and the public entry points
//!
//! # Example
//!
//! ```
//! use repeatquill::editor::sync::{SyncState, SyncTracker};
//! use repeatquill::document::Revision;
//!
//! let mut tracker = SyncTracker::new();
//! tracker.snapshot(Revision::new(5));
//! tracker.leave(Revision::new(5));
//! assert_eq!(tracker.state(), SyncState::Synced);
//! ```

pub mod context;
pub mod deferred;
pub mod dispatch;
pub mod error;
pub mod registers;
pub mod repeat;
pub mod session;
pub mod sync;
pub mod undo;

pub use error::RepeatError;

//! RepeatQuill - repeat-last-change tracking for modal editors.
//!
//! Command implementations register the key sequence that should run again
//! when the user presses the repeat key. The host reports document revisions
//! and lifecycle events, and the repeat key either replays the registered
//! sequence (with the right count and register) or falls back to the host's
//! own repeat when something untracked changed the document in between.
//!
//! # Modules
//!
//! - `config`: TOML configuration
//! - `document`: document ids and revision counters
//! - `editor`: the repeat state machine and its public entry points
//! - `file`: event scripts for the simulator
//! - `host`: the host trait, an in-memory host, and the script runner
//! - `input`: key sequences and replay-input requests

pub mod config;
pub mod document;
pub mod editor;
pub mod file;
pub mod host;
pub mod input;

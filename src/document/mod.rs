//! Document identity and revision tracking.
//!
//! The host editor owns the documents; this module only models what the
//! repeat machinery needs to know about them: a stable identifier and a
//! monotonically increasing revision counter that advances on every content
//! mutation.
//!
//! # Example
//!
//! ```
//! use repeatquill::document::RevisionCounter;
//!
//! let mut counter = RevisionCounter::new();
//! let before = counter.current();
//! counter.bump();
//! assert!(counter.current() > before);
//! ```

pub mod revision;

pub use revision::{DocumentId, Revision, RevisionCounter, RevisionOracle};

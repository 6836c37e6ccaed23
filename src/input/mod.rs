//! Key sequences and replay-input requests.

pub mod keys;

pub use keys::{Feed, KeySequence, Placement, Remap, Segment};

//! Opaque key sequences and the requests used to feed them back to the host.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque sequence of input tokens, written in vim key notation
/// (`dd`, `<Plug>(Surround)`, `"=<CR>`).
///
/// The repeat machinery never interprets the contents. Sequences are compared
/// byte-for-byte, which is what register associations rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeySequence(String);

impl KeySequence {
    pub fn new(keys: impl Into<String>) -> Self {
        Self(keys.into())
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    /// A count prefix such as `3`; empty for a count of 0.
    pub fn count(count: u32) -> Self {
        if count == 0 {
            Self::empty()
        } else {
            Self(count.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends another sequence to this one.
    pub fn push(&mut self, other: &KeySequence) {
        self.0.push_str(&other.0);
    }

    /// Returns a new sequence made of `self` followed by `other`.
    #[must_use]
    pub fn then(&self, other: &KeySequence) -> Self {
        let mut joined = self.clone();
        joined.push(other);
        joined
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeySequence {
    fn from(keys: &str) -> Self {
        Self::new(keys)
    }
}

impl From<String> for KeySequence {
    fn from(keys: String) -> Self {
        Self(keys)
    }
}

/// Where fed keys land relative to input that is already queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Inserted in front of pending input, so it runs next.
    AheadOfPending,
    /// Appended after pending input.
    AfterPending,
}

/// Whether the host may apply user mappings to fed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remap {
    Remap,
    NoRemap,
}

/// A run of keys within a feed that shares one remap setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub keys: KeySequence,
    pub remap: Remap,
}

/// A request to insert keys into the host's input queue as if typed.
///
/// A feed is applied whole or not at all. Segments let one feed mix keys the
/// host may remap with keys it must take literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub segments: Vec<Segment>,
    pub placement: Placement,
}

impl Feed {
    pub fn new(keys: KeySequence, placement: Placement, remap: Remap) -> Self {
        Self {
            segments: vec![Segment { keys, remap }],
            placement,
        }
    }

    /// A feed with no keys yet, to be filled with [`Feed::with`].
    pub fn at(placement: Placement) -> Self {
        Self {
            segments: Vec::new(),
            placement,
        }
    }

    pub fn ahead(keys: KeySequence, remap: Remap) -> Self {
        Self::new(keys, Placement::AheadOfPending, remap)
    }

    pub fn after(keys: KeySequence, remap: Remap) -> Self {
        Self::new(keys, Placement::AfterPending, remap)
    }

    /// Appends a segment; empty key runs are skipped.
    #[must_use]
    pub fn with(mut self, keys: KeySequence, remap: Remap) -> Self {
        if !keys.is_empty() {
            self.segments.push(Segment { keys, remap });
        }
        self
    }

    /// All keys of the feed, segments joined in order.
    pub fn keys(&self) -> KeySequence {
        let mut keys = KeySequence::empty();
        for segment in &self.segments {
            keys.push(&segment.keys);
        }
        keys
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let placement = match self.placement {
            Placement::AheadOfPending => "ahead",
            Placement::AfterPending => "after",
        };
        let segments: Vec<String> = self
            .segments
            .iter()
            .map(|segment| {
                let remap = match segment.remap {
                    Remap::Remap => "remap",
                    Remap::NoRemap => "noremap",
                };
                format!("{}:{}", segment.keys, remap)
            })
            .collect();
        write!(f, "{} [{}]", segments.join(" "), placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_prefix() {
        assert_eq!(KeySequence::count(0), KeySequence::empty());
        assert_eq!(KeySequence::count(12).as_str(), "12");
    }

    #[test]
    fn test_then_concatenates() {
        let seq = KeySequence::from("\"a").then(&KeySequence::from("dd"));
        assert_eq!(seq.as_str(), "\"add");
    }

    #[test]
    fn test_feed_display() {
        let feed = Feed::ahead(KeySequence::from("3"), Remap::NoRemap)
            .with(KeySequence::from("X"), Remap::Remap);
        assert_eq!(feed.to_string(), "3:noremap X:remap [ahead]");
    }

    #[test]
    fn test_feed_keys_join_segments() {
        let feed = Feed::ahead(KeySequence::from("\"a"), Remap::NoRemap)
            .with(KeySequence::empty(), Remap::NoRemap)
            .with(KeySequence::from("dd"), Remap::Remap);
        assert_eq!(feed.segments.len(), 2);
        assert_eq!(feed.keys().as_str(), "\"add");
    }
}

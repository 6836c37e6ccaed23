//! Repeatable action tracking for the '.' key.

use super::registers::RegisterName;
use crate::input::KeySequence;

/// The count recorded alongside a repeatable action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatCount {
    /// No count was in effect
    #[default]
    None,
    /// The action ran with this count
    Times(u32),
    /// The action must be replayed without any count, even an explicit one
    Suppressed,
}

impl RepeatCount {
    /// Converts a raw count: -1 suppresses counts, positive values are kept,
    /// and 0 or any other value means no count.
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            -1 => RepeatCount::Suppressed,
            n if n > 0 => u32::try_from(n).map_or(RepeatCount::Times(u32::MAX), RepeatCount::Times),
            _ => RepeatCount::None,
        }
    }

    pub fn from_count(count: u32) -> Self {
        if count == 0 {
            RepeatCount::None
        } else {
            RepeatCount::Times(count)
        }
    }

    /// The recorded count, if a nonzero one was recorded.
    pub fn times(self) -> Option<u32> {
        match self {
            RepeatCount::Times(n) if n > 0 => Some(n),
            _ => None,
        }
    }
}

/// The action the '.' key replays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredAction {
    pub sequence: KeySequence,
    pub count: RepeatCount,
}

/// Which register a given action sequence used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAssociation {
    pub sequence: KeySequence,
    pub register: RegisterName,
}

/// Holds the single most recent repeatable action and its register.
///
/// There is no history: every registration replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    action: Option<RegisteredAction>,
    association: Option<RegisterAssociation>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, sequence: KeySequence, count: RepeatCount) {
        self.action = Some(RegisteredAction { sequence, count });
    }

    pub fn associate_register(&mut self, sequence: KeySequence, register: RegisterName) {
        self.association = Some(RegisterAssociation { sequence, register });
    }

    pub fn action(&self) -> Option<&RegisteredAction> {
        self.action.as_ref()
    }

    /// The associated register, if the association belongs to the current action.
    pub fn current_association(&self) -> Option<RegisterName> {
        let action = self.action.as_ref()?;
        self.association
            .as_ref()
            .filter(|assoc| assoc.sequence == action.sequence)
            .map(|assoc| assoc.register)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_count_from_raw() {
        assert_eq!(RepeatCount::from_raw(-1), RepeatCount::Suppressed);
        assert_eq!(RepeatCount::from_raw(0), RepeatCount::None);
        assert_eq!(RepeatCount::from_raw(-7), RepeatCount::None);
        assert_eq!(RepeatCount::from_raw(4), RepeatCount::Times(4));
        assert_eq!(
            RepeatCount::from_raw(i64::MAX),
            RepeatCount::Times(u32::MAX)
        );
    }

    #[test]
    fn test_repeat_count_times() {
        assert_eq!(RepeatCount::Times(3).times(), Some(3));
        assert_eq!(RepeatCount::Times(0).times(), None);
        assert_eq!(RepeatCount::None.times(), None);
        assert_eq!(RepeatCount::Suppressed.times(), None);
    }

    #[test]
    fn test_register_overwrites() {
        let mut registry = ActionRegistry::new();
        registry.register(KeySequence::from("A"), RepeatCount::Times(2));
        registry.register(KeySequence::from("B"), RepeatCount::None);

        let action = registry.action().unwrap();
        assert_eq!(action.sequence.as_str(), "B");
        assert_eq!(action.count, RepeatCount::None);
    }

    #[test]
    fn test_association_requires_matching_sequence() {
        let mut registry = ActionRegistry::new();
        registry.associate_register(KeySequence::from("A"), RegisterName::Named('q'));
        assert_eq!(registry.current_association(), None);

        registry.register(KeySequence::from("A"), RepeatCount::None);
        assert_eq!(registry.current_association(), Some(RegisterName::Named('q')));

        registry.register(KeySequence::from("B"), RepeatCount::None);
        assert_eq!(registry.current_association(), None);
    }
}

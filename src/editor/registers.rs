use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::KeySequence;

/// A register name as supplied to a command (`"a`, `"+`, `"=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterName {
    /// The unnamed register (`"`)
    Unnamed,
    /// The selection clipboard (`*`)
    Clipboard,
    /// The system clipboard (`+`)
    ClipboardPlus,
    /// The expression register (`=`), evaluated when read
    Expression,
    /// Any other register (a-z, A-Z, 0-9, and the read-only ones)
    Named(char),
}

impl RegisterName {
    pub fn from_char(c: char) -> Self {
        match c {
            '"' => RegisterName::Unnamed,
            '*' => RegisterName::Clipboard,
            '+' => RegisterName::ClipboardPlus,
            '=' => RegisterName::Expression,
            other => RegisterName::Named(other),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            RegisterName::Unnamed => '"',
            RegisterName::Clipboard => '*',
            RegisterName::ClipboardPlus => '+',
            RegisterName::Expression => '=',
            RegisterName::Named(c) => c,
        }
    }

    /// Parses a register argument; accepts `a` as well as `"a`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let first = chars.next()?;
        match (first, chars.next(), chars.next()) {
            (c, None, _) => Some(Self::from_char(c)),
            ('"', Some(c), None) => Some(Self::from_char(c)),
            _ => None,
        }
    }

    pub fn is_expression(self) -> bool {
        self == RegisterName::Expression
    }

    /// The register-selection prefix for this register, e.g. `"a`.
    pub fn prefix(self) -> KeySequence {
        KeySequence::new(format!("\"{}", self.as_char()))
    }
}

impl fmt::Display for RegisterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}", self.as_char())
    }
}

/// How the host's clipboard setting redirects the default register.
///
/// Mirrors vim's `'clipboard'` option: with `unnamed` the default register is
/// `*`, with `unnamedplus` it is `+`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardMode {
    #[default]
    None,
    Unnamed,
    UnnamedPlus,
}

impl ClipboardMode {
    /// The register a command receives when the user names none.
    pub fn default_register(self) -> RegisterName {
        match self {
            ClipboardMode::None => RegisterName::Unnamed,
            ClipboardMode::Unnamed => RegisterName::Clipboard,
            ClipboardMode::UnnamedPlus => RegisterName::ClipboardPlus,
        }
    }
}

//! Parser for event scripts.
//!
//! A script is one command per line. Blank lines and lines starting with `#`
//! are skipped. Documents are numbered; key sequences are single
//! whitespace-free words in vim key notation (use `<Space>` for a space).
//!
//! ```text
//! open 1
//! register 1 <Plug>Swap 2
//! edit 1
//! event 1 cursor-moved
//! repeat 1 0 a
//! ```

use thiserror::Error;

use crate::document::DocumentId;
use crate::editor::registers::RegisterName;
use crate::editor::repeat::RepeatCount;
use crate::editor::sync::LifecycleEvent;
use crate::editor::undo::UndoRedo;
use crate::input::KeySequence;

/// A script line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Open(DocumentId),
    Close(DocumentId),
    /// Mutate the document `times` times, then report a content change
    Edit { doc: DocumentId, times: u32 },
    Event { doc: DocumentId, event: LifecycleEvent },
    Register { doc: DocumentId, sequence: KeySequence, count: RepeatCount },
    Associate { doc: DocumentId, sequence: KeySequence, register: RegisterName },
    Invalidate(DocumentId),
    /// `register` is `None` when the script names no register
    Repeat { doc: DocumentId, count: u32, register: Option<RegisterName> },
    UndoRedo { doc: DocumentId, command: UndoRedo, count: u32 },
    /// User input typed ahead of any replay
    Type(KeySequence),
    Expression(String),
    Reject(String),
    Accept,
    Flush,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: ScriptCommand,
}

/// Parses a whole script, stopping at the first bad line.
pub fn parse_script(content: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let command = parse_command(text).map_err(|message| ScriptError { line, message })?;
        lines.push(ScriptLine { line, command });
    }
    Ok(lines)
}

fn parse_command(text: &str) -> Result<ScriptCommand, String> {
    let (keyword, rest) = match text.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (text, ""),
    };
    let mut args = Args::new(keyword, rest);

    let command = match keyword {
        "open" => ScriptCommand::Open(args.doc()?),
        "close" => ScriptCommand::Close(args.doc()?),
        "edit" => ScriptCommand::Edit {
            doc: args.doc()?,
            times: args.optional_count()?.unwrap_or(1),
        },
        "event" => {
            let doc = args.doc()?;
            let event = args.required("event name")?.parse()?;
            ScriptCommand::Event { doc, event }
        }
        "register" => {
            let doc = args.doc()?;
            let sequence = KeySequence::new(args.required("key sequence")?);
            let count = match args.next() {
                Some(raw) => RepeatCount::from_raw(
                    raw.parse::<i64>()
                        .map_err(|_| format!("invalid count '{}'", raw))?,
                ),
                None => RepeatCount::None,
            };
            ScriptCommand::Register {
                doc,
                sequence,
                count,
            }
        }
        "associate" => {
            let doc = args.doc()?;
            let sequence = KeySequence::new(args.required("key sequence")?);
            let register = parse_register(args.required("register")?)?;
            ScriptCommand::Associate {
                doc,
                sequence,
                register,
            }
        }
        "invalidate" => ScriptCommand::Invalidate(args.doc()?),
        "repeat" => {
            let doc = args.doc()?;
            let count = args.optional_count()?.unwrap_or(0);
            let register = args.next().map(parse_register).transpose()?;
            ScriptCommand::Repeat {
                doc,
                count,
                register,
            }
        }
        "undo" | "redo" => {
            let command = if keyword == "undo" {
                UndoRedo::Undo
            } else {
                UndoRedo::Redo
            };
            ScriptCommand::UndoRedo {
                doc: args.doc()?,
                command,
                count: args.optional_count()?.unwrap_or(0),
            }
        }
        "type" => ScriptCommand::Type(KeySequence::new(args.required("keys")?)),
        "expr" => return Ok(ScriptCommand::Expression(rest.to_string())),
        "reject" => {
            let reason = if rest.is_empty() { "rejected" } else { rest };
            return Ok(ScriptCommand::Reject(reason.to_string()));
        }
        "accept" => ScriptCommand::Accept,
        "flush" => ScriptCommand::Flush,
        other => return Err(format!("unknown command '{}'", other)),
    };

    args.finish()?;
    Ok(command)
}

fn parse_register(raw: &str) -> Result<RegisterName, String> {
    RegisterName::parse(raw).ok_or_else(|| format!("invalid register '{}'", raw))
}

struct Args<'a> {
    keyword: &'a str,
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn new(keyword: &'a str, rest: &'a str) -> Self {
        Self {
            keyword,
            words: rest.split_whitespace(),
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        self.words.next()
    }

    fn required(&mut self, what: &str) -> Result<&'a str, String> {
        self.next()
            .ok_or_else(|| format!("'{}' expects {}", self.keyword, what))
    }

    fn doc(&mut self) -> Result<DocumentId, String> {
        let raw = self.required("a document number")?;
        raw.parse::<u64>()
            .map(DocumentId::new)
            .map_err(|_| format!("invalid document number '{}'", raw))
    }

    fn optional_count(&mut self) -> Result<Option<u32>, String> {
        self.next()
            .map(|raw| {
                raw.parse::<u32>()
                    .map_err(|_| format!("invalid count '{}'", raw))
            })
            .transpose()
    }

    fn finish(mut self) -> Result<(), String> {
        match self.next() {
            Some(extra) => Err(format!("unexpected argument '{}'", extra)),
            None => Ok(()),
        }
    }
}

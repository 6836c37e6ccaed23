//! Runs event scripts against a [`SessionManager`] and a [`SimulatedHost`].

use super::sim::SimulatedHost;
use crate::config::Config;
use crate::document::RevisionOracle;
use crate::editor::dispatch::Dispatch;
use crate::editor::session::SessionManager;
use crate::editor::sync::LifecycleEvent;
use crate::file::script::{ScriptCommand, ScriptLine};

/// Executes script commands and records a human-readable transcript.
///
/// Host failures are written to the transcript and execution continues;
/// nothing in a script is fatal.
pub struct ScriptRunner {
    session: SessionManager,
    host: SimulatedHost,
    transcript: Vec<String>,
}

impl ScriptRunner {
    pub fn new(config: Config) -> Self {
        Self {
            session: SessionManager::new(config),
            host: SimulatedHost::new(),
            transcript: Vec::new(),
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn host(&self) -> &SimulatedHost {
        &self.host
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Runs every line, then records the remaining pending input.
    pub fn run(&mut self, script: &[ScriptLine]) -> &[String] {
        for line in script {
            self.execute(line);
        }
        let pending = self.host.pending().clone();
        self.log(format!("pending: {}", pending));
        &self.transcript
    }

    pub fn execute(&mut self, line: &ScriptLine) {
        tracing::trace!(line = line.line, command = ?line.command, "script");
        match &line.command {
            ScriptCommand::Open(doc) => {
                let rev = self.host.open(*doc);
                self.session.open(*doc);
                self.log(format!("open {} at {}", doc, rev));
            }
            ScriptCommand::Close(doc) => {
                self.host.close(*doc);
                self.session.close(*doc);
                self.log(format!("close {}", doc));
            }
            ScriptCommand::Edit { doc, times } => {
                let mut rev = self.host.revision(*doc);
                for _ in 0..*times {
                    rev = self.host.edit(*doc);
                }
                self.session
                    .notify(*doc, LifecycleEvent::ContentChanged, &self.host);
                match rev {
                    Some(rev) => self.log(format!("edit {} -> {}", doc, rev)),
                    None => self.log(format!("edit {}: document not open", doc)),
                }
            }
            ScriptCommand::Event { doc, event } => {
                self.session.notify(*doc, *event, &self.host);
                self.log(format!("event {} {}", doc, event));
            }
            ScriptCommand::Register {
                doc,
                sequence,
                count,
            } => {
                self.session
                    .register(*doc, sequence.clone(), *count, &self.host);
                self.log(format!("register {} {} {:?}", doc, sequence, count));
            }
            ScriptCommand::Associate {
                doc,
                sequence,
                register,
            } => {
                self.session
                    .associate_register(*doc, sequence.clone(), *register);
                self.log(format!("associate {} {} {}", doc, sequence, register));
            }
            ScriptCommand::Invalidate(doc) => {
                self.session.invalidate(*doc);
                self.log(format!("invalidate {}", doc));
            }
            ScriptCommand::Repeat {
                doc,
                count,
                register,
            } => {
                let register = register.unwrap_or_else(|| self.session.config().default_register());
                match self
                    .session
                    .repeat(*doc, *count, register, &mut self.host)
                {
                    Ok(Dispatch::Native { keys }) => {
                        self.log(format!("repeat {} -> native {}", doc, keys))
                    }
                    Ok(Dispatch::Replay(replay)) => {
                        self.log(format!("repeat {} -> replay {}", doc, replay.keys()))
                    }
                    Err(err) => self.log(format!("repeat {} -> error: {}", doc, err)),
                }
            }
            ScriptCommand::UndoRedo {
                doc,
                command,
                count,
            } => {
                match self
                    .session
                    .wrap_undo_redo(*doc, &command.keys(), *count, &mut self.host)
                {
                    Ok(was_synced) => {
                        // the simulated host applies the change right away
                        let rev = self.host.edit(*doc);
                        self.session
                            .notify(*doc, LifecycleEvent::ContentChanged, &self.host);
                        let rev = rev.map_or_else(|| "?".to_string(), |rev| rev.to_string());
                        self.log(format!(
                            "{} {} -> {} (was synced: {})",
                            command, doc, rev, was_synced
                        ));
                    }
                    Err(err) => self.log(format!("{} {} -> error: {}", command, doc, err)),
                }
            }
            ScriptCommand::Type(keys) => {
                self.host.type_keys(keys);
                self.log(format!("type {}", keys));
            }
            ScriptCommand::Expression(source) => {
                self.host.set_expression(source.clone());
                self.log(format!("expr {}", source));
            }
            ScriptCommand::Reject(reason) => {
                self.host.reject_feeds(Some(reason.clone()));
                self.log(format!("reject {}", reason));
            }
            ScriptCommand::Accept => {
                self.host.reject_feeds(None);
                self.log("accept".to_string());
            }
            ScriptCommand::Flush => {
                let keys = self.host.flush();
                self.log(format!("flush {}", keys));
            }
        }
    }

    fn log(&mut self, entry: String) {
        self.transcript.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::script::parse_script;

    fn run(script: &str) -> Vec<String> {
        let lines = parse_script(script).unwrap();
        let mut runner = ScriptRunner::new(Config::default());
        runner.run(&lines).to_vec()
    }

    #[test]
    fn test_replay_in_transcript() {
        let transcript = run("open 1\nregister 1 X 2\nrepeat 1");
        assert_eq!(transcript[0], "open #1 at r1");
        assert_eq!(transcript[2], "repeat #1 -> replay 2X");
        assert_eq!(transcript.last().unwrap(), "pending: 2X");
    }

    #[test]
    fn test_rejected_feed_is_logged() {
        let transcript = run("open 1\nreject busy\nrepeat 1 3");
        assert!(transcript[2].starts_with("repeat #1 -> error: host rejected input"));
        assert!(transcript[2].ends_with("busy"));
    }

    #[test]
    fn test_edit_unknown_document() {
        let transcript = run("edit 4");
        assert_eq!(transcript[0], "edit #4: document not open");
    }
}

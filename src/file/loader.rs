//! Script loading functionality.
//!
//! This module provides functions to load event scripts from files or stdin
//! and parse them into commands the [`ScriptRunner`](crate::host::ScriptRunner)
//! can execute.

use crate::file::script::{parse_script, ScriptLine};
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Loads and parses an event script from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use repeatquill::file::loader::load_script_file;
///
/// let script = load_script_file("session.rq").unwrap();
/// println!("{} commands", script.len());
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line does not parse.
pub fn load_script_file<P: AsRef<Path>>(path: P) -> Result<Vec<ScriptLine>> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref)
        .with_context(|| format!("Failed to read script {}", path_ref.display()))?;
    parse_script(&content).with_context(|| format!("Failed to parse script {}", path_ref.display()))
}

/// Reads an event script from stdin.
pub fn load_script_from_stdin() -> Result<Vec<ScriptLine>> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read script from stdin")?;
    parse_script(&content).context("Failed to parse script from stdin")
}

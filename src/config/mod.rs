//! Configuration system for repeatquill.
//!
//! This module provides the configuration structure with sensible defaults and
//! support for serialization/deserialization via serde. Configuration is loaded
//! from a TOML file; every field may be omitted.
//!
//! # Example
//!
//! ```
//! use repeatquill::config::{AssociationPolicy, Config};
//!
//! let config = Config::default();
//! assert_eq!(config.native_repeat_key, ".");
//! assert_eq!(config.register_association, AssociationPolicy::MatchSequence);
//!
//! let custom = Config {
//!     expression_commit: "<Enter>".to_string(),
//!     ..Config::default()
//! };
//! assert_eq!(custom.native_repeat_key, ".");
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::editor::registers::{ClipboardMode, RegisterName};
use crate::input::KeySequence;

/// Whether a register recorded with `associate_register` is reused on repeat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssociationPolicy {
    /// Reuse the associated register when its sequence matches the
    /// registered action and it is not the default register.
    #[default]
    MatchSequence,
    /// Never reuse associated registers; only explicit registers apply.
    Disabled,
}

/// Configuration for repeatquill.
///
/// # Fields
///
/// * `native_repeat_key` - Key fed when falling back to the host's own repeat (default: ".")
/// * `clipboard` - Clipboard mode, selects the default register (default: none)
/// * `expression_commit` - Key that commits an expression register entry (default: "<CR>")
/// * `register_association` - Associated register policy (default: match-sequence)
/// * `reveal_after_undo` - Keys fed after undo/redo to reveal the change, e.g. "zv" (default: unset)
/// * `log_level` - Default tracing filter for the CLI (default: "warn")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Key fed when falling back to native repeat
    #[serde(default = "default_native_repeat_key")]
    pub native_repeat_key: String,

    /// Clipboard mode of the host
    #[serde(default)]
    pub clipboard: ClipboardMode,

    /// Key that commits an expression register entry
    #[serde(default = "default_expression_commit")]
    pub expression_commit: String,

    /// Associated register policy
    #[serde(default)]
    pub register_association: AssociationPolicy,

    /// Keys fed after undo/redo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_after_undo: Option<String>,

    /// Default log filter
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_native_repeat_key() -> String {
    ".".to_string()
}

fn default_expression_commit() -> String {
    "<CR>".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            native_repeat_key: default_native_repeat_key(),
            clipboard: ClipboardMode::default(),
            expression_commit: default_expression_commit(),
            register_association: AssociationPolicy::default(),
            reveal_after_undo: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// The register commands receive when the user names none.
    pub fn default_register(&self) -> RegisterName {
        self.clipboard.default_register()
    }

    pub fn native_repeat_keys(&self) -> KeySequence {
        KeySequence::new(self.native_repeat_key.as_str())
    }

    pub fn expression_commit_keys(&self) -> KeySequence {
        KeySequence::new(self.expression_commit.as_str())
    }

    pub fn reveal_keys(&self) -> Option<KeySequence> {
        self.reveal_after_undo
            .as_deref()
            .filter(|keys| !keys.is_empty())
            .map(KeySequence::new)
    }

    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/repeatquill/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("repeatquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        Self::try_load().unwrap_or_else(|err| {
            tracing::warn!("ignoring config file: {:#}", err);
            Self::default()
        })
    }

    /// Loads the default config file, reporting a file that exists but can't
    /// be read or parsed.
    pub fn try_load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_if_present(&path),
            None => Ok(Self::default()),
        }
    }

    /// Like [`Config::load_from`], but a missing file yields the defaults.
    pub fn load_if_present(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Loads configuration from an explicit path, reporting any error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`, creating the parent directory if needed.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}

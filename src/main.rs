use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use repeatquill::config::Config;
use repeatquill::file::loader::{load_script_file, load_script_from_stdin};
use repeatquill::host::ScriptRunner;

/// RepeatQuill - replay an editor event script through the repeat state machine
#[derive(Parser)]
#[command(name = "repeatquill")]
#[command(version)]
#[command(about = "Simulates repeat-last-change tracking from an event script", long_about = None)]
struct Cli {
    /// Event script to run (omit to read from stdin when piped)
    script: Option<PathBuf>,

    /// Config file to use instead of ~/.config/repeatquill/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "repeatquill=trace" (overrides RUST_LOG and the config file)
    #[arg(short, long)]
    log_level: Option<String>,
}

/// Picks the log filter: the CLI flag, then `RUST_LOG`, then the config file.
fn log_filter(cli: Option<&str>, env: Option<String>, config: &str) -> String {
    match (cli, env) {
        (Some(level), _) => level.to_string(),
        (None, Some(env)) if !env.trim().is_empty() => env,
        _ => config.to_string(),
    }
}

fn init_tracing(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("Invalid log filter '{}'", filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // an explicit config path must load; the default one falls back with a warning
    let (config, config_err) = match &cli.config {
        Some(path) => (Config::load_from(path)?, None),
        None => match Config::try_load() {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err)),
        },
    };

    let filter = log_filter(
        cli.log_level.as_deref(),
        std::env::var("RUST_LOG").ok(),
        &config.log_level,
    );
    init_tracing(&filter)?;
    if let Some(err) = config_err {
        tracing::warn!("ignoring config file: {:#}", err);
    }

    let script = if let Some(path) = &cli.script {
        load_script_file(path)?
    } else if !io::stdin().is_terminal() {
        load_script_from_stdin()?
    } else {
        bail!("No script given; pass a file or pipe one on stdin");
    };

    tracing::debug!(commands = script.len(), "running script");
    let mut runner = ScriptRunner::new(config);
    for entry in runner.run(&script) {
        println!("{}", entry);
    }

    Ok(())
}

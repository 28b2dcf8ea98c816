//! timew-shell - interactive shorthand shell around timewarrior
//!
//! Usage:
//!   timew-shell
//!
//! Shorthands:
//!   (enter)        timew :id :ann summary
//!   t ARGS..       timew :id :ann tag ARGS..
//!   ocs ARGS..     timew :id :ann start oc log ARGS..
//!   te ARGS..      tempoit ARGS..
//!   anything else  timew :id :ann ANYTHING ELSE
//!
//! Ctrl-D (or Ctrl-C at the prompt) quits.

use anyhow::{Context, Result};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use timew_shell::shell::input::{InputResult, LineInput};
use timew_shell::{Config, Shell};

fn init_logging() {
    let filter = EnvFilter::try_from_env("TIMEW_SHELL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    // Use try_init to avoid panic if tracing is already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_logging();

    let config = Config::load().context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if which::which(&config.timetool).is_err() {
        tracing::warn!(timetool = %config.timetool, "time-tracking tool not found on PATH");
    }

    run_repl(&config)
}

fn run_repl(config: &Config) -> Result<()> {
    let mut shell = Shell::new(config.programs());
    let mut input = LineInput::new(config.history_path().map(ToOwned::to_owned), config.history_size);

    let outcome = loop {
        match input.read_line(&shell.prompt()) {
            Ok(InputResult::Line(line)) => {
                if let Err(e) = shell.execute(&line) {
                    eprintln!("{}: {}", "error".red(), e);
                }
            }
            Ok(InputResult::Eof) => break Ok(()),
            Err(e) => break Err(e.context("failed to read input")),
        }
    };

    input.save_history();
    outcome
}

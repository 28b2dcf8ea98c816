//! Shell core module

pub mod dispatch;
pub mod executor;
pub mod input;
pub mod parser;

use colored::Colorize;

use self::dispatch::{Programs, ResolvedCommand};
use self::executor::{ProcessRunner, Runner};
use self::parser::TokenizeError;

/// Prompt text; only its colour changes.
pub const PROMPT: &str = "timew ❯";

/// Main shell state
pub struct Shell<R = ProcessRunner> {
    /// Names of the tools commands are resolved to
    pub programs: Programs,
    runner: R,
    /// Exit status of the last command run (0 before the first one)
    pub last_status: i32,
}

impl Shell {
    pub fn new(programs: Programs) -> Self {
        Self::with_runner(programs, ProcessRunner)
    }
}

impl<R: Runner> Shell<R> {
    pub fn with_runner(programs: Programs, runner: R) -> Self {
        Self {
            programs,
            runner,
            last_status: 0,
        }
    }

    /// Tokenize a line and resolve it to the command it stands for.
    pub fn resolve(&self, line: &str) -> Result<ResolvedCommand, TokenizeError> {
        let tokens = parser::split(line.trim())?;
        Ok(ResolvedCommand::resolve(tokens, &self.programs))
    }

    /// Execute an input line and return the new last status.
    ///
    /// A tokenize error runs nothing and leaves `last_status` alone. A program
    /// that fails to launch is reported here and recorded as 127/126.
    pub fn execute(&mut self, line: &str) -> Result<i32, TokenizeError> {
        let command = self.resolve(line)?;
        tracing::debug!(%command, "running");

        let status = match self.runner.run(&command) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{}: {}", "error".red(), e);
                e.exit_status()
            }
        };
        tracing::debug!(status, "finished");

        self.last_status = status;
        Ok(status)
    }

    /// Get prompt string
    pub fn prompt(&self) -> String {
        render_prompt(self.last_status)
    }
}

/// Bold prompt, green after success and red after anything else.
pub fn render_prompt(last_status: i32) -> String {
    let label = if last_status == 0 {
        PROMPT.green()
    } else {
        PROMPT.red()
    };
    format!("{} ", label.bold())
}

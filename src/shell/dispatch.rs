//! Shorthand dispatch - turns a token sequence into the argv to run
//!
//! The first token picks the template, checked in order:
//!
//! | input          | runs                                          |
//! |----------------|-----------------------------------------------|
//! | (empty)        | `timew :id :ann summary`                      |
//! | `te ARGS..`    | `tempoit ARGS..`                              |
//! | `ocs ARGS..`   | `timew :id :ann start oc log ARGS..`          |
//! | `t ARGS..`     | `timew :id :ann tag ARGS..`                   |
//! | `WORD ARGS..`  | `timew :id :ann WORD ARGS..`                  |
//!
//! The shorthands consume their first token; the fallback keeps it, since
//! there the first word is already a `timew` subcommand.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hints passed to every `timew` invocation: show interval ids and annotations.
pub const TIMEW_HINTS: [&str; 2] = [":id", ":ann"];

/// Invocation names of the external tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Programs {
    /// The time-tracking tool.
    pub timetool: String,
    /// The companion tool behind the `te` shorthand.
    pub companion: String,
}

impl Default for Programs {
    fn default() -> Self {
        Self {
            timetool: "timew".to_string(),
            companion: "tempoit".to_string(),
        }
    }
}

/// Which template a line maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shorthand {
    /// Empty line: today's summary
    Summary,
    /// `te`: hand the rest to the companion tool
    Companion,
    /// `ocs`: start a new `oc log` interval
    StartOcLog,
    /// `t`: tag intervals
    Tag,
    /// Anything else goes to the time tool untouched
    Passthrough,
}

impl Shorthand {
    pub fn classify(tokens: &[String]) -> Self {
        match tokens.first().map(String::as_str) {
            None => Shorthand::Summary,
            Some("te") => Shorthand::Companion,
            Some("ocs") => Shorthand::StartOcLog,
            Some("t") => Shorthand::Tag,
            Some(_) => Shorthand::Passthrough,
        }
    }
}

/// The argv to execute. Never empty: the first element is always one of the
/// configured program names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    argv: Vec<String>,
}

impl ResolvedCommand {
    /// Build the command for a tokenized line.
    pub fn resolve(tokens: Vec<String>, programs: &Programs) -> Self {
        let shorthand = Shorthand::classify(&tokens);
        let mut tokens = tokens.into_iter();

        let argv = match shorthand {
            Shorthand::Summary => timew(programs, &["summary"]),
            Shorthand::Companion => {
                tokens.next();
                let mut argv = vec![programs.companion.clone()];
                argv.extend(tokens);
                argv
            }
            Shorthand::StartOcLog => {
                tokens.next();
                let mut argv = timew(programs, &["start", "oc", "log"]);
                argv.extend(tokens);
                argv
            }
            Shorthand::Tag => {
                tokens.next();
                let mut argv = timew(programs, &["tag"]);
                argv.extend(tokens);
                argv
            }
            Shorthand::Passthrough => {
                let mut argv = timew(programs, &[]);
                argv.extend(tokens);
                argv
            }
        };

        Self { argv }
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

/// `timew :id :ann SUBCOMMAND..`
fn timew(programs: &Programs, subcommand: &[&str]) -> Vec<String> {
    let mut argv = Vec::with_capacity(1 + TIMEW_HINTS.len() + subcommand.len());
    argv.push(programs.timetool.clone());
    argv.extend(TIMEW_HINTS.iter().map(|s| (*s).to_string()));
    argv.extend(subcommand.iter().map(|s| (*s).to_string()));
    argv
}

/// Quote a word so the printed command line can be pasted back in.
fn quote_word(word: &str) -> String {
    let plain = !word.is_empty()
        && !word
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\'));
    if plain {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}

impl fmt::Display for ResolvedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<String> = self.argv.iter().map(|w| quote_word(w)).collect();
        write!(f, "{}", words.join(" "))
    }
}

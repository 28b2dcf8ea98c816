//! timew-shell - interactive shorthand shell around timewarrior
//!
//! Features:
//! - Short forms for the common `timew` invocations (`t`, `ocs`, `te`)
//! - Bare enter shows today's summary
//! - Prompt colour tracks the last exit status
//! - Line editing and persistent history via rustyline

pub mod config;
pub mod shell;

pub use config::Config;
pub use shell::Shell;

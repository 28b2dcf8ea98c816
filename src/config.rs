//! Configuration loading.
//!
//! Layers, later ones winning: built-in defaults, then
//! `<config_dir>/timew-shell/config.toml`, then `TIMEW_SHELL_*` environment
//! variables (`TIMEW_SHELL_TIMETOOL`, `TIMEW_SHELL_HISTORY_FILE`, ...).

use std::fmt;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::shell::dispatch::Programs;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Time-tracking tool to invoke.
    #[serde(deserialize_with = "deserialize_program")]
    pub timetool: String,
    /// Tool behind the `te` shorthand.
    #[serde(deserialize_with = "deserialize_program")]
    pub companion: String,
    /// Where line history is kept. An empty path disables the file.
    pub history_file: Option<PathBuf>,
    /// Maximum number of history entries.
    pub history_size: usize,
}

/// Program names arrive typed from the environment (`TIMEW_SHELL_TIMETOOL=true`
/// is a bool), so accept any scalar and keep its text.
fn deserialize_program<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ProgramName;

    impl Visitor<'_> for ProgramName {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a program name")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(ProgramName)
}

impl Default for Config {
    fn default() -> Self {
        let programs = Programs::default();
        Self {
            timetool: programs.timetool,
            companion: programs.companion,
            history_file: dirs_data_path().map(|p| p.join("history")),
            history_size: 1000,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("TIMEW_SHELL_"));

        figment.extract()
    }

    pub fn programs(&self) -> Programs {
        Programs {
            timetool: self.timetool.clone(),
            companion: self.companion.clone(),
        }
    }

    pub fn history_path(&self) -> Option<&Path> {
        self.history_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Returns the platform-specific config directory for timew-shell.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("timew-shell"))
}

/// Returns the platform-specific data directory for timew-shell.
///
/// On Linux: `~/.local/share/timew-shell`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("timew-shell"))
}

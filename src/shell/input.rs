//! Line input for the REPL
//!
//! Prefers a rustyline editor (cursor movement, history recall, optional
//! history file). When stdin is not a terminal, or the editor can't be set
//! up, falls back to plain buffered reads from stdin.

use std::fs;
use std::io::{self, BufRead, IsTerminal, StdinLock, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

#[derive(Debug, PartialEq, Eq)]
pub enum InputResult {
    Line(String),
    Eof,
}

enum Backend {
    Editor(Box<DefaultEditor>),
    Plain(StdinLock<'static>),
}

pub struct LineInput {
    backend: Backend,
    history_file: Option<PathBuf>,
}

impl LineInput {
    pub fn new(history_file: Option<PathBuf>, history_size: usize) -> Self {
        // rustyline reads piped input without echoing the prompt
        if !io::stdin().is_terminal() {
            return Self::plain();
        }
        match build_editor(history_size) {
            Ok(mut editor) => {
                if let Some(path) = history_file.as_deref() {
                    load_history(&mut editor, path);
                }
                Self {
                    backend: Backend::Editor(Box::new(editor)),
                    history_file,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "line editing unavailable, falling back to plain input");
                Self::plain()
            }
        }
    }

    /// Plain stdin reads, no editing and no history.
    pub fn plain() -> Self {
        Self {
            backend: Backend::Plain(io::stdin().lock()),
            history_file: None,
        }
    }

    /// Read one line. Ctrl-C at the prompt ends input just like Ctrl-D.
    pub fn read_line(&mut self, prompt: &str) -> Result<InputResult> {
        match &mut self.backend {
            Backend::Editor(editor) => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = editor.add_history_entry(line.as_str()) {
                            tracing::warn!(error = %e, "failed to add history entry");
                        }
                    }
                    Ok(InputResult::Line(line))
                }
                Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(InputResult::Eof),
                Err(e) => Err(e.into()),
            },
            Backend::Plain(stdin) => read_plain(stdin, &mut io::stdout(), prompt),
        }
    }

    /// Write history back to the configured file. Best-effort.
    pub fn save_history(&mut self) {
        let (Backend::Editor(editor), Some(path)) = (&mut self.backend, self.history_file.as_deref())
        else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "cannot create history directory");
                return;
            }
        }
        if let Err(e) = editor.save_history(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to save history");
        }
    }
}

fn build_editor(history_size: usize) -> rustyline::Result<DefaultEditor> {
    let config = rustyline::Config::builder()
        .max_history_size(history_size)?
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .auto_add_history(false)
        .build();
    DefaultEditor::with_config(config)
}

fn load_history(editor: &mut DefaultEditor, path: &Path) {
    if !path.exists() {
        return;
    }
    if let Err(e) = editor.load_history(path) {
        tracing::warn!(path = %path.display(), error = %e, "failed to load history");
    }
}

fn read_plain<R: BufRead, W: Write>(reader: &mut R, out: &mut W, prompt: &str) -> Result<InputResult> {
    write!(out, "{prompt}")?;
    out.flush()?;

    // Bytes, not `read_line`: one bad UTF-8 sequence must not end the session.
    let mut raw = Vec::new();
    if reader.read_until(b'\n', &mut raw)? == 0 {
        return Ok(InputResult::Eof);
    }
    let line = String::from_utf8_lossy(&raw);
    Ok(InputResult::Line(line.trim_end_matches(['\n', '\r']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::History;
    use std::io::Cursor;

    #[test]
    fn test_plain_reads_lines_then_eof() {
        let mut reader = Cursor::new("t billable\r\n\nocs review\n");
        let mut out = Vec::new();

        assert_eq!(
            read_plain(&mut reader, &mut out, "> ").unwrap(),
            InputResult::Line("t billable".to_string())
        );
        assert_eq!(
            read_plain(&mut reader, &mut out, "> ").unwrap(),
            InputResult::Line(String::new())
        );
        assert_eq!(
            read_plain(&mut reader, &mut out, "> ").unwrap(),
            InputResult::Line("ocs review".to_string())
        );
        assert_eq!(read_plain(&mut reader, &mut out, "> ").unwrap(), InputResult::Eof);
        assert_eq!(String::from_utf8(out).unwrap(), "> > > > ");
    }

    #[test]
    fn test_plain_last_line_without_newline() {
        let mut reader = Cursor::new("stop");
        let mut out = Vec::new();
        assert_eq!(
            read_plain(&mut reader, &mut out, "").unwrap(),
            InputResult::Line("stop".to_string())
        );
        assert_eq!(read_plain(&mut reader, &mut out, "").unwrap(), InputResult::Eof);
    }

    #[test]
    fn test_plain_invalid_utf8_is_replaced_not_fatal() {
        let mut reader = Cursor::new(b"t \xff\xfe\nstop\n".to_vec());
        let mut out = Vec::new();

        assert_eq!(
            read_plain(&mut reader, &mut out, "").unwrap(),
            InputResult::Line("t \u{FFFD}\u{FFFD}".to_string())
        );
        assert_eq!(
            read_plain(&mut reader, &mut out, "").unwrap(),
            InputResult::Line("stop".to_string())
        );
        assert_eq!(read_plain(&mut reader, &mut out, "").unwrap(), InputResult::Eof);
    }

    #[test]
    fn test_history_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history");

        let mut editor = build_editor(100).unwrap();
        editor.add_history_entry("t billable").unwrap();
        let mut input = LineInput {
            backend: Backend::Editor(Box::new(editor)),
            history_file: Some(path.clone()),
        };
        input.save_history();
        assert!(path.exists());

        let mut editor = build_editor(100).unwrap();
        load_history(&mut editor, &path);
        let entries: Vec<&String> = editor.history().iter().collect();
        assert_eq!(entries, vec!["t billable"]);
    }

    #[test]
    fn test_missing_history_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = build_editor(100).unwrap();
        load_history(&mut editor, &dir.path().join("absent"));
        assert_eq!(editor.history().len(), 0);
    }
}

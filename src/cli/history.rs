//! Command History Module
//!
//! Persists the line editor's history between sessions as a plain
//! newline-delimited file. A missing or unreadable file never stops a
//! session from starting; it just starts without history.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::config::{config_home, HISTORY_FILE_NAME};
use super::editor::LineEditor;
use crate::error::Result;

/// A line history file
#[derive(Debug, Clone)]
pub struct History {
    file: PathBuf,
}

impl History {
    /// History at the default per-user location.
    pub fn new() -> Result<Self> {
        Ok(Self::at(config_home()?.join(HISTORY_FILE_NAME)))
    }

    /// History stored at `file`.
    pub fn at(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    /// The underlying file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Load the history file into `editor`, returning how many lines were read.
    ///
    /// Absence is not an error. An unreadable file is logged and skipped;
    /// lines that are blank or not valid UTF-8 are dropped.
    pub fn read(&self, editor: &mut dyn LineEditor) -> usize {
        if !self.file.is_file() {
            tracing::debug!(file = %self.file.display(), "no history file yet");
            return 0;
        }

        let raw = match fs::read(&self.file) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(file = %self.file.display(), error = %e, "could not read history file");
                return 0;
            }
        };

        let mut loaded = 0;
        for line in raw.split(|b| *b == b'\n') {
            let Ok(line) = std::str::from_utf8(line) else {
                tracing::debug!("skipping history line that is not UTF-8");
                continue;
            };
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            match editor.add_history(line) {
                Ok(()) => loaded += 1,
                Err(e) => {
                    tracing::warn!(error = %e, "could not restore history entry");
                }
            }
        }

        tracing::debug!(file = %self.file.display(), lines = loaded, "history loaded");
        loaded
    }

    /// Write `editor`'s history to disk, replacing the previous contents.
    pub fn write(&self, editor: &dyn LineEditor) -> io::Result<()> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent)?;
        }

        let entries = editor.history_entries();
        let mut file = fs::File::create(&self.file)?;
        for entry in &entries {
            writeln!(file, "{}", entry)?;
        }
        file.flush()?;

        tracing::debug!(file = %self.file.display(), lines = entries.len(), "history saved");
        Ok(())
    }

    /// Lines entered so far, oldest first.
    pub fn get_history_items(editor: &dyn LineEditor) -> Vec<String> {
        editor.history_entries()
    }
}

//! Line Editor Module
//!
//! The console input capability the prompt loop is built on: reading a line
//! with a prompt, recording history and handing that history back out. The
//! production implementation wraps `rustyline`; tests script their own.

use std::rc::Rc;

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, EditMode, Editor};

use super::commands::CommandRegistry;
use super::completer::ShellHelper;
use crate::error::Result;

/// Result of asking the user for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C at the prompt.
    Interrupted,
    /// Ctrl-D or closed input.
    Eof,
}

/// Console line editor owned by the prompt loop
pub trait LineEditor {
    /// Block until the user submits a line or signals the end of input.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;

    /// Append an entry to the in-memory history.
    fn add_history(&mut self, line: &str) -> Result<()>;

    /// In-memory history, oldest first.
    fn history_entries(&self) -> Vec<String>;
}

/// [`LineEditor`] backed by rustyline, with tab completion over the registry.
pub struct RustylineEditor {
    editor: Editor<ShellHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Create an editor that records every submitted line.
    ///
    /// `max_history` caps the in-memory history; pass `usize::MAX` for no cap.
    pub fn new(registry: Rc<CommandRegistry>, max_history: usize) -> Result<Self> {
        let config = Config::builder()
            .max_history_size(max_history)?
            .history_ignore_dups(false)?
            .auto_add_history(true)
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(ShellHelper::new(registry)));
        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(e.into()),
        }
    }

    fn add_history(&mut self, line: &str) -> Result<()> {
        self.editor.add_history_entry(line)?;
        Ok(())
    }

    fn history_entries(&self) -> Vec<String> {
        self.editor.history().iter().cloned().collect()
    }
}

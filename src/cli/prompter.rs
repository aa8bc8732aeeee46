//! Interactive Prompt
//!
//! The read loop of the shell: shows the banner, restores history, then reads
//! lines, splits them into `&&`-separated commands and dispatches each one to
//! the manager. History is written back however the loop ends.

use std::io::{self, Write};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use crossterm::style::{style, Stylize};

use super::{
    commands::{CommandParser, CommandRegistry, Parsed},
    config::ShellConfig,
    editor::{LineEditor, ReadOutcome, RustylineEditor},
    history::History,
    utils::{normalize, split_compound},
};
use crate::error::{Result, ShellError};
use crate::manager::Manager;

/// Types of output messages
#[derive(Debug, Clone, Copy)]
pub enum MessageType {
    Info,
    Error,
    Warning,
    System,
}

impl MessageType {
    fn paint(&self, content: &str) -> String {
        match self {
            MessageType::Info => content.to_string(),
            MessageType::Error => style(content).red().to_string(),
            MessageType::Warning => style(content).yellow().to_string(),
            MessageType::System => style(content).bold().to_string(),
        }
    }
}

/// Whether the loop should keep reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parses segments of input and runs them on the manager.
pub struct Dispatcher<M: Manager, W: Write> {
    registry: Rc<CommandRegistry>,
    manager: M,
    org: bool,
    out: W,
}

impl<M: Manager, W: Write> Dispatcher<M, W> {
    pub fn new(registry: Rc<CommandRegistry>, manager: M, org: bool, out: W) -> Self {
        Self {
            registry,
            manager,
            org,
            out,
        }
    }

    /// Run every `&&`-separated command of `line` in order.
    ///
    /// A quit request stops the line immediately; commands after it are not run.
    /// A failing command is reported and the next one still runs.
    pub fn dispatch_line(&mut self, line: &str) -> io::Result<Flow> {
        let parser = CommandParser::new(&self.registry);

        for segment in split_compound(line) {
            let segment = normalize(segment);
            match parser.parse(&segment, &mut self.out)? {
                Parsed::Quit => return Ok(Flow::Quit),
                Parsed::Handled => {}
                Parsed::Run(command) => {
                    tracing::debug!(command = %command.name, args = ?command.args, "dispatching");
                    if let Err(e) = self.manager.invoke(&command.name, &command.args, self.org) {
                        tracing::debug!(command = %command.name, error = %e, "command failed");
                        let report = format!("Error running '{}': {:?}", command.name, e);
                        writeln!(self.out, "{}", MessageType::Error.paint(&report))?;
                    }
                }
            }
        }

        Ok(Flow::Continue)
    }

    fn print_message(&mut self, message_type: MessageType, content: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message_type.paint(content))
    }
}

/// Writes the history file when dropped, so every exit path saves it.
struct HistoryScope<'a, E: LineEditor> {
    history: &'a History,
    editor: &'a mut E,
}

impl<'a, E: LineEditor> HistoryScope<'a, E> {
    fn new(history: &'a History, editor: &'a mut E) -> Self {
        Self { history, editor }
    }
}

impl<E: LineEditor> Deref for HistoryScope<'_, E> {
    type Target = E;

    fn deref(&self) -> &E {
        &*self.editor
    }
}

impl<E: LineEditor> DerefMut for HistoryScope<'_, E> {
    fn deref_mut(&mut self) -> &mut E {
        &mut *self.editor
    }
}

impl<E: LineEditor> Drop for HistoryScope<'_, E> {
    fn drop(&mut self) {
        if let Err(e) = self.history.write(&*self.editor) {
            tracing::warn!(file = %self.history.file().display(), error = %e, "could not save history");
            eprintln!(
                "{}",
                MessageType::Warning.paint(&format!(
                    "Could not save history to {}: {}",
                    self.history.file().display(),
                    e
                ))
            );
        }
    }
}

/// Interactive prompt for the GitHub manager
pub struct CliPrompter<E: LineEditor, M: Manager, W: Write = io::Stdout> {
    editor: E,
    history: History,
    prompt: String,
    dispatcher: Dispatcher<M, W>,
}

impl<M: Manager> CliPrompter<RustylineEditor, M> {
    /// Prompter on the terminal, configured from `config`.
    pub fn new(config: &ShellConfig, registry: Rc<CommandRegistry>, manager: M) -> Result<Self> {
        let editor = RustylineEditor::new(Rc::clone(&registry), config.history_capacity())?;
        let history = config.history()?;
        Ok(Self::with_parts(editor, history, config, registry, manager, io::stdout()))
    }
}

impl<E: LineEditor, M: Manager, W: Write> CliPrompter<E, M, W> {
    /// Assemble a prompter from already-built parts.
    pub fn with_parts(
        editor: E,
        history: History,
        config: &ShellConfig,
        registry: Rc<CommandRegistry>,
        manager: M,
        out: W,
    ) -> Self {
        Self {
            editor,
            history,
            prompt: config.prompt.clone(),
            dispatcher: Dispatcher::new(registry, manager, config.org, out),
        }
    }

    /// Show welcome banner
    fn show_welcome(&mut self) -> io::Result<()> {
        self.dispatcher
            .print_message(MessageType::System, "repo_helper_github interactive prompt.")?;
        self.dispatcher.print_message(
            MessageType::Info,
            &format!("Version {}", env!("CARGO_PKG_VERSION")),
        )?;
        self.dispatcher
            .print_message(MessageType::Info, "Type 'help' for help or 'quit' to exit.")
    }

    /// Run the session until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        self.show_welcome()?;

        self.dispatcher
            .manager
            .check_owner(self.dispatcher.org)
            .map_err(ShellError::Startup)?;

        self.history.read(&mut self.editor);
        tracing::debug!(
            entries = History::get_history_items(&self.editor).len(),
            "session started"
        );

        let mut editor = HistoryScope::new(&self.history, &mut self.editor);
        loop {
            let line = match editor.read_line(&self.prompt)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted | ReadOutcome::Eof => break,
            };
            if self.dispatcher.dispatch_line(&line)? == Flow::Quit {
                break;
            }
        }

        self.dispatcher.print_message(MessageType::Info, "\nExiting...")?;
        Ok(())
    }

    /// The manager commands are dispatched to.
    pub fn manager(&self) -> &M {
        &self.dispatcher.manager
    }

    /// The history file of this session.
    pub fn history(&self) -> &History {
        &self.history
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.dispatcher.out
    }

    #[cfg(test)]
    fn editor(&self) -> &E {
        &self.editor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::history::tests::ScriptedEditor;
    use std::fs;
    use tempfile::TempDir;

    /// Records invocations; fails any operation listed in `failing`.
    #[derive(Default)]
    struct RecordingManager {
        calls: Vec<(String, Vec<String>, bool)>,
        failing: Vec<&'static str>,
        refuse_owner: bool,
    }

    impl Manager for RecordingManager {
        fn check_owner(&self, _org: bool) -> anyhow::Result<()> {
            if self.refuse_owner {
                anyhow::bail!("no owner configured");
            }
            Ok(())
        }

        fn invoke(&mut self, operation: &str, args: &[String], org: bool) -> anyhow::Result<()> {
            self.calls.push((operation.to_string(), args.to_vec(), org));
            if self.failing.contains(&operation) {
                anyhow::bail!("{} exploded", operation);
            }
            Ok(())
        }
    }

    struct Session {
        _dir: TempDir,
        prompter: CliPrompter<ScriptedEditor, RecordingManager, Vec<u8>>,
    }

    impl Session {
        fn new(editor: ScriptedEditor, manager: RecordingManager) -> Self {
            let dir = TempDir::new().unwrap();
            let history = History::at(dir.path().join("github").join("interactive.hist"));
            let prompter = CliPrompter::with_parts(
                editor,
                history,
                &ShellConfig::default(),
                Rc::new(CommandRegistry::repo_helper()),
                manager,
                Vec::new(),
            );
            Self { _dir: dir, prompter }
        }

        fn output(&self) -> String {
            String::from_utf8_lossy(self.prompter.output()).into_owned()
        }

        fn calls(&self) -> Vec<&str> {
            self.prompter
                .manager()
                .calls
                .iter()
                .map(|(name, _, _)| name.as_str())
                .collect()
        }
    }

    #[test]
    fn test_help_then_quit_invokes_nothing() {
        let editor = ScriptedEditor::with_lines(&["help && quit", "update"]);
        let mut session = Session::new(editor, RecordingManager::default());
        session.prompter.run().unwrap();

        let out = session.output();
        assert!(out.contains("Show this help message."));
        assert!(out.contains("Exiting..."));
        assert!(session.calls().is_empty());
        assert_eq!(session.prompter.editor().prompts.len(), 1);
    }

    #[test]
    fn test_compound_commands_run_in_order() {
        let editor = ScriptedEditor::with_lines(&["labels && Protect_Branch main && list-labels"]);
        let mut session = Session::new(editor, RecordingManager::default());
        session.prompter.run().unwrap();

        assert_eq!(session.calls(), vec!["create_labels", "protect_branch", "list_labels"]);
        let (_, args, org) = &session.prompter.manager().calls[1];
        assert_eq!(args, &vec!["main".to_string()]);
        assert!(*org);
    }

    #[test]
    fn test_failing_command_does_not_end_session() {
        let editor = ScriptedEditor::with_lines(&["new && archive", "update"]);
        let manager = RecordingManager {
            failing: vec!["new"],
            ..RecordingManager::default()
        };
        let mut session = Session::new(editor, manager);
        session.prompter.run().unwrap();

        assert_eq!(session.calls(), vec!["new", "archive", "update"]);
        assert!(session.output().contains("new exploded"));
        // Two lines plus the final end-of-input read.
        assert_eq!(session.prompter.editor().prompts, vec!["> ", "> ", "> "]);
    }

    #[test]
    fn test_unknown_command_is_reported() {
        let editor = ScriptedEditor::with_lines(&["lables"]);
        let mut session = Session::new(editor, RecordingManager::default());
        session.prompter.run().unwrap();

        let out = session.output();
        assert!(out.contains("Unknown command 'lables'"));
        assert!(out.contains("Did you mean 'labels'?"));
        assert!(session.calls().is_empty());
    }

    #[test]
    fn test_interrupt_ends_session_and_saves_history() {
        let mut editor = ScriptedEditor::with_lines(&["update"]);
        editor.script.push_back(ReadOutcome::Interrupted);
        editor.script.push_back(ReadOutcome::Line("new".to_string()));
        let mut session = Session::new(editor, RecordingManager::default());
        session.prompter.run().unwrap();

        assert_eq!(session.calls(), vec!["update"]);
        let saved = fs::read_to_string(session.prompter.history().file()).unwrap();
        assert_eq!(saved, "update\n");
    }

    #[test]
    fn test_quit_saves_history() {
        let editor = ScriptedEditor::with_lines(&["labels", "q"]);
        let mut session = Session::new(editor, RecordingManager::default());
        session.prompter.run().unwrap();

        let saved = fs::read_to_string(session.prompter.history().file()).unwrap();
        assert_eq!(saved, "labels\nq\n");
    }

    #[test]
    fn test_history_is_restored_before_reading() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("interactive.hist");
        fs::write(&path, "archive\n").unwrap();

        let mut prompter = CliPrompter::with_parts(
            ScriptedEditor::with_lines(&["unarchive"]),
            History::at(&path),
            &ShellConfig::default(),
            Rc::new(CommandRegistry::repo_helper()),
            RecordingManager::default(),
            Vec::new(),
        );
        prompter.run().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "archive\nunarchive\n");
    }

    #[test]
    fn test_owner_check_failure_stops_startup() {
        let editor = ScriptedEditor::with_lines(&["update"]);
        let manager = RecordingManager {
            refuse_owner: true,
            ..RecordingManager::default()
        };
        let mut session = Session::new(editor, manager);

        let err = session.prompter.run().unwrap_err();
        assert!(matches!(err, ShellError::Startup(_)));
        assert!(session.prompter.editor().prompts.is_empty());
        assert!(session.calls().is_empty());
    }

    #[test]
    fn test_org_flag_is_passed_through() {
        let config = ShellConfig {
            org: false,
            prompt: "gh> ".to_string(),
            ..ShellConfig::default()
        };
        let dir = TempDir::new().unwrap();
        let mut prompter = CliPrompter::with_parts(
            ScriptedEditor::with_lines(&["secrets"]),
            History::at(dir.path().join("interactive.hist")),
            &config,
            Rc::new(CommandRegistry::repo_helper()),
            RecordingManager::default(),
            Vec::new(),
        );
        prompter.run().unwrap();

        assert_eq!(prompter.manager().calls, vec![("secrets".to_string(), Vec::<String>::new(), false)]);
        assert_eq!(prompter.editor().prompts[0], "gh> ");
    }
}

//! CLI Commands Module
//!
//! The command registry, and the parser that turns one segment of user input
//! into a command for the manager or a control signal for the prompt loop.

use std::io::{self, Write};

use super::similarity::{closest_match, NormalizedLevenshtein, Similarity};
use super::utils::{normalize, right_justify};
use crate::error::{Result, ShellError};

/// Suggestions scoring below this are not offered.
pub const SUGGESTION_CUTOFF: f64 = 0.6;

/// Help text width never drops below the length of "help"/"quit".
const MIN_NAME_WIDTH: usize = 4;

/// A registered command: its name and one line of help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub help: String,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
        }
    }
}

/// Ordered set of commands the shell understands.
///
/// Names are stored lower-cased and must be unique.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands offered by the repository helper's GitHub manager.
    pub fn repo_helper() -> Self {
        let mut registry = Self::new();
        let builtin = [
            ("new", "Create a new GitHub repository for this project."),
            ("update", "Update the GitHub repository for this project."),
            ("secrets", "Set or update the secrets of the GitHub repository for this project."),
            ("protect_branch", "Set or update the branch protection for the default branch."),
            ("labels", "Create labels for this repository."),
            ("list-labels", "List the labels defined on this repository."),
            ("archive", "Archive the repository."),
            ("unarchive", "Unarchive the repository."),
        ];
        for (name, help) in builtin {
            registry.commands.push(CommandSpec::new(name, help));
        }
        registry
    }

    /// Add a command. Fails if the (normalized) name is already taken.
    pub fn register(&mut self, spec: CommandSpec) -> Result<()> {
        let name = normalize(&spec.name);
        if self.contains(&name) {
            return Err(ShellError::DuplicateCommand(name));
        }
        self.commands.push(CommandSpec {
            name,
            help: spec.help,
        });
        Ok(())
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        let name = normalize(name);
        self.commands.iter().find(|spec| spec.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Command names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|spec| spec.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// A command resolved to a manager operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Manager operation name, after renames.
    pub name: String,
    pub args: Vec<String>,
}

/// What the parser decided for one segment of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// Dispatch to the manager.
    Run(Command),
    /// End the session.
    Quit,
    /// Fully handled by the parser (help listing, unknown command).
    Handled,
}

/// Maps a registry name to the manager operation it runs.
pub fn operation_name(command: &str) -> String {
    match command {
        "labels" => "create_labels".to_string(),
        "protect_branch" => command.to_string(),
        other => other.replace('-', "_"),
    }
}

/// Command parser backed by an explicit registry
pub struct CommandParser<'a> {
    registry: &'a CommandRegistry,
    similarity: Box<dyn Similarity + 'a>,
}

impl<'a> CommandParser<'a> {
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self::with_similarity(registry, NormalizedLevenshtein)
    }

    /// Use a different similarity function for suggestions.
    pub fn with_similarity(registry: &'a CommandRegistry, similarity: impl Similarity + 'a) -> Self {
        Self {
            registry,
            similarity: Box::new(similarity),
        }
    }

    /// Parse one segment of input.
    ///
    /// Help listings and unknown-command messages are written to `out`.
    pub fn parse(&self, input: &str, out: &mut dyn Write) -> io::Result<Parsed> {
        let input = normalize(input);
        let mut tokens = input.split_whitespace();
        let head = tokens.next().unwrap_or("");
        let args: Vec<String> = tokens.map(str::to_string).collect();

        match head {
            "q" | "quit" => Ok(Parsed::Quit),
            "h" | "help" => {
                self.write_help(out)?;
                Ok(Parsed::Handled)
            }
            name if self.registry.contains(name) => {
                let name = operation_name(name);
                tracing::debug!(command = %name, args = ?args, "resolved command");
                Ok(Parsed::Run(Command { name, args }))
            }
            unknown => {
                writeln!(out, "Error: Unknown command '{}'", unknown)?;
                if let Some(suggestion) = self.suggest(unknown) {
                    writeln!(out, "Did you mean '{}'?", suggestion)?;
                }
                Ok(Parsed::Handled)
            }
        }
    }

    /// Closest registered name to `word`, if any is close enough.
    pub fn suggest(&self, word: &str) -> Option<&'a str> {
        closest_match(
            self.similarity.as_ref(),
            word,
            self.registry.names(),
            SUGGESTION_CUTOFF,
        )
    }

    /// Help listing: every command right-justified to the longest name.
    pub fn help_lines(&self) -> Vec<String> {
        let width = self
            .registry
            .names()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0)
            .max(MIN_NAME_WIDTH);

        let mut lines: Vec<String> = self
            .registry
            .iter()
            .map(|spec| format!("  {} -- {}", right_justify(&spec.name, width), spec.help))
            .collect();
        lines.push(format!("  {} -- Show this help message.", right_justify("help", width)));
        lines.push(format!("  {} -- Exit the interactive prompt.", right_justify("quit", width)));
        lines
    }

    fn write_help(&self, out: &mut dyn Write) -> io::Result<()> {
        for line in self.help_lines() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

//! Tab completion over the command registry.

use std::cell::RefCell;
use std::rc::Rc;

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use super::commands::CommandRegistry;
use super::utils::word_before;

/// Readline-style completer: asked repeatedly with an increasing `state`
/// until it runs out of matches.
pub struct CommandCompleter {
    registry: Rc<CommandRegistry>,
    matches: Vec<String>,
}

impl CommandCompleter {
    pub fn new(registry: Rc<CommandRegistry>) -> Self {
        Self {
            registry,
            matches: Vec::new(),
        }
    }

    /// The `state`-th registry name starting with `text`.
    ///
    /// The match list is rebuilt only when `state` is 0.
    pub fn complete(&mut self, text: &str, state: usize) -> Option<&str> {
        if state == 0 {
            self.matches = if text.is_empty() {
                Vec::new()
            } else {
                self.registry
                    .names()
                    .filter(|name| name.starts_with(text))
                    .map(str::to_string)
                    .collect()
            };
        }
        self.matches.get(state).map(String::as_str)
    }

    /// Every match for `text`, in registry order.
    pub fn all_matches(&mut self, text: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut state = 0;
        while let Some(name) = self.complete(text, state) {
            found.push(name.to_string());
            state += 1;
        }
        found
    }
}

/// rustyline helper wiring [`CommandCompleter`] to the tab key.
pub struct ShellHelper {
    completer: RefCell<CommandCompleter>,
}

impl ShellHelper {
    pub fn new(registry: Rc<CommandRegistry>) -> Self {
        Self {
            completer: RefCell::new(CommandCompleter::new(registry)),
        }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, word) = word_before(line, pos);
        let candidates = self
            .completer
            .borrow_mut()
            .all_matches(word)
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

//! CLI Terminal Interface Module
//!
//! The interactive shell in front of the GitHub manager.
//!
//! ## Module Structure
//!
//! - `config` - Shell settings and per-user file locations
//! - `editor` - Line editor capability and its rustyline implementation
//! - `history` - History file persistence
//! - `commands` - Command registry and parser
//! - `completer` - Tab completion over the registry
//! - `similarity` - String similarity for "did you mean" suggestions
//! - `utils` - Small text helpers
//! - `prompter` - The read loop

pub mod config;
pub mod editor;
pub mod history;
pub mod commands;
pub mod completer;
pub mod similarity;
pub mod utils;
pub mod prompter;

// Re-export main types for convenience
pub use prompter::{CliPrompter, Dispatcher, Flow};
pub use config::ShellConfig;
pub use history::History;
pub use editor::{LineEditor, ReadOutcome, RustylineEditor};
pub use commands::{Command, CommandParser, CommandRegistry, CommandSpec, Parsed};
pub use completer::{CommandCompleter, ShellHelper};
pub use similarity::{NormalizedLevenshtein, Similarity};

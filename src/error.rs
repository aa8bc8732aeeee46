//! Error types for the interactive shell.
//!
//! [`ShellError`] covers conditions that stop the session itself (console I/O,
//! line editor failures, unusable configuration). Failures of individual
//! commands never surface here: they are reported by the prompt loop and the
//! session carries on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that end or prevent an interactive session.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Writing to the console or touching a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The line editor could not be created or failed while reading.
    #[error("line editor error: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),

    /// The configuration file exists but could not be used.
    #[error("invalid configuration in {path}: {reason}")]
    Config {
        /// File the configuration was loaded from.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// Two registry entries share a name.
    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),

    /// The manager refused to start a session (e.g. the owner cannot be resolved).
    #[error("cannot start session: {0:#}")]
    Startup(anyhow::Error),

    /// No per-user configuration directory exists on this platform.
    #[error("could not determine the user configuration directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, ShellError>;

//! github-interactive - an interactive shell for managing GitHub repositories
//!
//! Wraps a GitHub manager in a read-eval-print loop with tab completion,
//! persistent history and `&&`-chained commands.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use github_interactive::cli::{CliPrompter, CommandRegistry, ShellConfig};
//! use github_interactive::manager::PreviewManager;
//!
//! let config = ShellConfig::default();
//! let registry = Rc::new(CommandRegistry::repo_helper());
//! let manager = PreviewManager::new(".", Some("octo-org".to_string()));
//!
//! let mut prompter = CliPrompter::new(&config, registry, manager)?;
//! prompter.run()?;
//! # Ok::<(), github_interactive::ShellError>(())
//! ```
//!
//! # Commands
//!
//! Any registered command, plus:
//!
//! - **help** / **h** - list the commands
//! - **quit** / **q** - leave the shell (Ctrl-C and Ctrl-D work too)
//!
//! Failures of individual commands are printed and the session carries on.

pub mod cli;
pub mod error;
pub mod manager;

// Re-export commonly used types for convenience
pub use cli::{CliPrompter, CommandRegistry, ShellConfig};
pub use error::ShellError;
pub use manager::{Manager, ManagerError, PreviewManager};

//! Manager Module
//!
//! The dispatch target of the interactive shell. A manager exposes one
//! operation per command; the shell resolves the command name and hands the
//! remaining words over as positional arguments.

pub mod preview;

use thiserror::Error;

pub use preview::PreviewManager;

/// Failures raised by managers themselves, as opposed to the GitHub calls they make.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManagerError {
    /// No operation with this name exists on the manager.
    #[error("manager has no operation named '{0}'")]
    UnknownOperation(String),

    /// The operation was given the wrong number of arguments.
    #[error("{operation}() takes {expected} positional argument(s) but {given} were given")]
    WrongArgumentCount {
        operation: String,
        expected: String,
        given: usize,
    },
}

/// Performs the GitHub operations behind each shell command.
pub trait Manager {
    /// Check up front that the repository owner can be resolved for `org`.
    fn check_owner(&self, _org: bool) -> anyhow::Result<()> {
        Ok(())
    }

    /// Run `operation` with `args`.
    ///
    /// `org` says whether the repository belongs to an organisation.
    fn invoke(&mut self, operation: &str, args: &[String], org: bool) -> anyhow::Result<()>;
}

/// Check that `args` has between `min` and `max` entries.
pub(crate) fn check_arity(
    operation: &str,
    args: &[String],
    min: usize,
    max: usize,
) -> Result<(), ManagerError> {
    if (min..=max).contains(&args.len()) {
        return Ok(());
    }
    let expected = if min == max {
        min.to_string()
    } else {
        format!("{} to {}", min, max)
    };
    Err(ManagerError::WrongArgumentCount {
        operation: operation.to_string(),
        expected,
        given: args.len(),
    })
}

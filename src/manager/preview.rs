//! Preview manager: describes the GitHub operation each command would run
//! against the repository in a working directory, without touching the network.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use crossterm::style::{style, Stylize};

use super::{check_arity, Manager, ManagerError};

/// Branch protected when `protect_branch` is given no argument.
const DEFAULT_BRANCH: &str = "master";

/// Manager that prints what it would do.
pub struct PreviewManager<W: Write = io::Stdout> {
    repo_dir: PathBuf,
    owner: Option<String>,
    out: W,
}

impl PreviewManager {
    /// Preview operations for the repository in `repo_dir`, printing to stdout.
    pub fn new(repo_dir: impl Into<PathBuf>, owner: Option<String>) -> Self {
        Self::with_writer(repo_dir, owner, io::stdout())
    }
}

impl<W: Write> PreviewManager<W> {
    pub fn with_writer(repo_dir: impl Into<PathBuf>, owner: Option<String>, out: W) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            owner,
            out,
        }
    }

    /// Repository name: the working directory's final component.
    fn repo_name(&self) -> anyhow::Result<String> {
        self.repo_dir
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .with_context(|| format!("cannot derive a repository name from {}", self.repo_dir.display()))
    }

    fn owner_kind(org: bool) -> &'static str {
        if org {
            "organisation"
        } else {
            "user"
        }
    }

    fn target(&self, org: bool) -> anyhow::Result<String> {
        let repo = self.repo_name()?;
        match &self.owner {
            Some(owner) => Ok(format!("{}/{}", owner, repo)),
            None => Ok(format!("<{}>/{}", Self::owner_kind(org), repo)),
        }
    }

    fn describe(&mut self, action: &str, target: &str) -> anyhow::Result<()> {
        writeln!(self.out, "{} {} {}", style("would").dark_grey(), action, style(target).bold())?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Manager for PreviewManager<W> {
    fn check_owner(&self, org: bool) -> anyhow::Result<()> {
        if org && self.owner.as_deref().map_or(true, str::is_empty) {
            bail!("an organisation name is required when operating on an organisation's repositories");
        }
        Ok(())
    }

    fn invoke(&mut self, operation: &str, args: &[String], org: bool) -> anyhow::Result<()> {
        let target = self.target(org)?;
        tracing::debug!(operation, ?args, org, "previewing operation");

        match operation {
            "new" => {
                check_arity(operation, args, 0, 0)?;
                self.describe("create repository", &target)
            }
            "update" => {
                check_arity(operation, args, 0, 0)?;
                self.describe("update description, topics and homepage of", &target)
            }
            "secrets" => {
                check_arity(operation, args, 0, 0)?;
                self.describe("set secrets of", &target)
            }
            "protect_branch" => {
                check_arity(operation, args, 0, 1)?;
                let branch = args.first().map(String::as_str).unwrap_or(DEFAULT_BRANCH);
                self.describe(&format!("protect branch '{}' of", branch), &target)
            }
            "create_labels" => {
                check_arity(operation, args, 0, 0)?;
                self.describe("create labels on", &target)
            }
            "list_labels" => {
                check_arity(operation, args, 0, 0)?;
                self.describe("list labels of", &target)
            }
            "archive" => {
                check_arity(operation, args, 0, 0)?;
                self.describe("archive", &target)
            }
            "unarchive" => {
                check_arity(operation, args, 0, 0)?;
                self.describe("unarchive", &target)
            }
            other => Err(ManagerError::UnknownOperation(other.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(owner: Option<&str>) -> PreviewManager<Vec<u8>> {
        PreviewManager::with_writer("/work/my-project", owner.map(str::to_string), Vec::new())
    }

    fn output(manager: PreviewManager<Vec<u8>>) -> String {
        String::from_utf8(manager.into_inner()).unwrap()
    }

    #[test]
    fn test_protect_branch_defaults_to_master() {
        let mut m = manager(Some("octo-org"));
        m.invoke("protect_branch", &[], true).unwrap();
        let out = output(m);
        assert!(out.contains("protect branch 'master'"));
        assert!(out.contains("octo-org/my-project"));
    }

    #[test]
    fn test_protect_branch_with_argument() {
        let mut m = manager(Some("octo-org"));
        m.invoke("protect_branch", &["main".to_string()], true).unwrap();
        assert!(output(m).contains("protect branch 'main'"));
    }

    #[test]
    fn test_unknown_operation() {
        let mut m = manager(None);
        let err = m.invoke("delete_everything", &[], false).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ManagerError>(),
            Some(&ManagerError::UnknownOperation("delete_everything".to_string()))
        );
    }

    #[test]
    fn test_wrong_argument_count() {
        let mut m = manager(None);
        let err = m.invoke("new", &["extra".to_string()], false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ManagerError>(),
            Some(ManagerError::WrongArgumentCount { given: 1, .. })
        ));
    }

    #[test]
    fn test_user_repositories_without_owner() {
        let mut m = manager(None);
        m.check_owner(false).unwrap();
        m.invoke("create_labels", &[], false).unwrap();
        assert!(output(m).contains("<user>/my-project"));
    }

    #[test]
    fn test_org_requires_owner() {
        assert!(manager(None).check_owner(true).is_err());
        assert!(manager(Some("")).check_owner(true).is_err());
        assert!(manager(Some("octo-org")).check_owner(true).is_ok());
    }
}

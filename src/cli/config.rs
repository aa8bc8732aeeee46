//! Shell Configuration
//!
//! Settings for the interactive prompt and the per-user locations where the
//! shell keeps its history and configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::history::History;
use crate::error::{Result, ShellError};

/// Name of the history file inside the configuration directory.
pub const HISTORY_FILE_NAME: &str = "interactive.hist";

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "interactive.json";

/// Per-user directory holding the shell's files:
/// `<user-config-dir>/github/repo-helper`.
pub fn config_home() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ShellError::NoConfigDir)?;
    Ok(base.join("github").join("repo-helper"))
}

/// Configuration for the interactive shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt shown before every line.
    pub prompt: String,
    /// User or organisation owning the repository.
    pub owner: Option<String>,
    /// Whether repositories belong to an organisation rather than a user.
    pub org: bool,
    /// Overrides the default history file location.
    pub history_file: Option<PathBuf>,
    /// Maximum number of remembered lines. `None` keeps everything.
    pub max_history_size: Option<usize>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            owner: None,
            org: true,
            history_file: None,
            max_history_size: None,
        }
    }
}

impl ShellConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults; a file that exists but cannot be
    /// read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).map_err(|e| ShellError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| ShellError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from the default per-user location.
    pub fn load_default() -> Result<Self> {
        Self::load(&config_home()?.join(CONFIG_FILE_NAME))
    }

    /// History store for this session: the configured file, or the default location.
    pub fn history(&self) -> Result<History> {
        match &self.history_file {
            Some(path) => Ok(History::at(path.clone())),
            None => History::new(),
        }
    }

    /// History capacity handed to the line editor.
    pub fn history_capacity(&self) -> usize {
        self.max_history_size.unwrap_or(usize::MAX)
    }

    /// Get configuration summary for display
    pub fn get_summary(&self) -> Vec<String> {
        vec![
            format!("Prompt: {:?}", self.prompt),
            format!("Owner: {}", self.owner.as_deref().unwrap_or("not set")),
            format!("Organisation: {}", self.org),
            format!(
                "History file: {}",
                self.history_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "default".to_string())
            ),
            format!(
                "Max history size: {}",
                self.max_history_size
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "unlimited".to_string())
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ShellConfig::default();
        assert_eq!(config.prompt, "> ");
        assert!(config.org);
        assert!(config.history_file.is_none());
        assert_eq!(config.history_capacity(), usize::MAX);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ShellConfig::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("interactive.json");
        fs::write(&path, r#"{ "org": false, "owner": "octocat", "max_history_size": 50 }"#).unwrap();

        let config = ShellConfig::load(&path).unwrap();
        assert!(!config.org);
        assert_eq!(config.owner.as_deref(), Some("octocat"));
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.history_capacity(), 50);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("interactive.json");
        fs::write(&path, "{ not json").unwrap();

        match ShellConfig::load(&path) {
            Err(ShellError::Config { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_history_path_override() {
        let config = ShellConfig {
            history_file: Some(PathBuf::from("/tmp/custom.hist")),
            ..ShellConfig::default()
        };
        assert_eq!(config.history().unwrap().file(), Path::new("/tmp/custom.hist"));
    }

    #[test]
    fn test_default_history_location() {
        if let Ok(history) = ShellConfig::default().history() {
            assert!(history.file().ends_with("github/repo-helper/interactive.hist"));
        }
    }

    #[test]
    fn test_summary_mentions_unlimited_history() {
        let summary = ShellConfig::default().get_summary();
        assert!(summary.iter().any(|line| line.contains("unlimited")));
    }
}

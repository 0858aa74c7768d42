use crate::core::error::{ConfigError, RelbookError, RelbookResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for relbook
/// Searched in order: relbook.toml, .relbook.toml, .config/relbook.toml
///
/// Every field has a default, so a repository without a config file behaves
/// exactly like one holding the output of `relbook init`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelbookConfig {
  #[serde(default)]
  pub files: FilesConfig,
  #[serde(default)]
  pub git: GitConfig,
}

/// Locations of the bookkeeping documents, relative to the repository root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesConfig {
  /// Single-line version file (written without trailing newline)
  #[serde(default = "default_version_file")]
  pub version: PathBuf,

  /// Markdown changelog, newest entry first
  #[serde(default = "default_changelog_file")]
  pub changelog: PathBuf,

  /// Markdown status document with Current Version / Next Target fields
  #[serde(default = "default_status_file")]
  pub status: PathBuf,
}

fn default_version_file() -> PathBuf {
  PathBuf::from("VERSION")
}

fn default_changelog_file() -> PathBuf {
  PathBuf::from("CHANGELOG.md")
}

fn default_status_file() -> PathBuf {
  PathBuf::from("STATUS.md")
}

impl Default for FilesConfig {
  fn default() -> Self {
    Self {
      version: default_version_file(),
      changelog: default_changelog_file(),
      status: default_status_file(),
    }
  }
}

/// How relbook talks to git
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitConfig {
  /// Remote that receives the branch and tag (default: "origin")
  #[serde(default = "default_remote")]
  pub remote: String,

  /// Prepended to the version to form the tag name (default: "v")
  #[serde(default = "default_tag_prefix")]
  pub tag_prefix: String,

  /// Environment variables forwarded to git besides PATH and HOME.
  /// Credential helpers and SSH agents need these; nothing else leaks in.
  #[serde(default = "default_pass_env")]
  pub pass_env: Vec<String>,
}

fn default_remote() -> String {
  "origin".to_string()
}

fn default_tag_prefix() -> String {
  "v".to_string()
}

fn default_pass_env() -> Vec<String> {
  ["SSH_AUTH_SOCK", "GIT_SSH_COMMAND", "GIT_ASKPASS", "SSH_ASKPASS"]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for GitConfig {
  fn default() -> Self {
    Self {
      remote: default_remote(),
      tag_prefix: default_tag_prefix(),
      pass_env: default_pass_env(),
    }
  }
}

impl GitConfig {
  /// Tag name for a version, e.g. `v1.2.0`
  pub fn tag_name(&self, version: &str) -> String {
    format!("{}{}", self.tag_prefix, version)
  }
}

impl RelbookConfig {
  /// Default file name written by `relbook init`
  pub const FILE_NAME: &'static str = "relbook.toml";

  /// Find config file in search order: relbook.toml, .relbook.toml, .config/relbook.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join(Self::FILE_NAME),
      path.join(".relbook.toml"),
      path.join(".config").join(Self::FILE_NAME),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config if one exists
  ///
  /// A missing file is not an error; a file that fails to parse or validate is.
  pub fn load(path: &Path) -> RelbookResult<Option<(Self, PathBuf)>> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(None);
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(Some((config, config_path)))
  }

  /// Parse and validate config text
  pub fn parse(content: &str) -> RelbookResult<Self> {
    let config: RelbookConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Save config to relbook.toml (default location)
  pub fn save(&self, path: &Path) -> RelbookResult<PathBuf> {
    let config_path = path.join(Self::FILE_NAME);
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(config_path)
  }

  /// Validate configuration values
  pub fn validate(&self) -> RelbookResult<()> {
    for (field, path) in [
      ("files.version", &self.files.version),
      ("files.changelog", &self.files.changelog),
      ("files.status", &self.files.status),
    ] {
      if path.as_os_str().is_empty() {
        return Err(invalid(field, "path must not be empty"));
      }
      if path.is_absolute() {
        return Err(invalid(field, "path must be relative to the repository root"));
      }
    }

    if self.git.remote.trim().is_empty() {
      return Err(invalid("git.remote", "remote name must not be empty"));
    }

    if self.git.tag_prefix.chars().any(char::is_whitespace) {
      return Err(invalid("git.tag_prefix", "tag prefix must not contain whitespace"));
    }

    Ok(())
  }
}

fn invalid(field: &str, reason: &str) -> RelbookError {
  RelbookError::Config(ConfigError::InvalidField {
    field: field.to_string(),
    reason: reason.to_string(),
  })
}
